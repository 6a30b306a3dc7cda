#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single message as handed over by the mail provider.
///
/// Only `subject` and `snippet` feed the clustering; `from` is used for naming
/// when a cluster has no keywords. Everything else passes through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Document {
    pub id: String,
    pub subject: String,
    pub snippet: String,
    pub from: String,
    pub date: String,
    pub labels: Vec<String>,
}

impl Document {
    pub fn new(
        id: impl Into<String>,
        subject: impl Into<String>,
        snippet: impl Into<String>,
        from: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            subject: subject.into(),
            snippet: snippet.into(),
            from: from.into(),
            ..Self::default()
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// The text that gets tokenized: subject and snippet separated by a space.
    pub fn text(&self) -> String {
        format!("{} {}", self.subject, self.snippet)
    }
}

/// A named group of documents.
///
/// `id` is the k-means cluster index, assigned before the clusters are sorted by
/// size, so the output order does not follow `id`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Cluster<'a> {
    pub id: usize,
    pub name: String,
    pub emails: Vec<&'a Document>,
    pub keywords: Vec<String>,
}

impl<'a> Cluster<'a> {
    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    /// Ids of the member documents, in input order. This is what gets sent back
    /// to the provider when a whole cluster is archived.
    pub fn message_ids(&self) -> Vec<&'a str> {
        self.emails.iter().map(|doc| doc.id.as_str()).collect()
    }
}
