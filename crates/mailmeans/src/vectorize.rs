use crate::tokenize::Tokenizer;
use std::collections::HashMap;

pub const DEFAULT_VOCABULARY_CAP: usize = 100;

/// Which terms become vector axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VocabularyPolicy {
    /// Every distinct term in the corpus, in first-seen order.
    #[default]
    Full,
    /// The `n` most frequent terms across the corpus; equal counts keep first-seen order.
    Capped(usize),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Weighting {
    /// `tf(t, d) * ln(N / df(t))`
    #[default]
    TfIdf,
    /// Raw counts over vocabulary terms, scaled to sum to 1.
    NormalizedTf,
}

/// Ordered, deduplicated terms. Axis `i` of every vector in a batch is `terms()[i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    fn from_terms(terms: Vec<String>) -> Self {
        let index = terms
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();
        Self { terms, index }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Dense row-major storage for one batch of feature vectors, all of length `dim`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureMatrix {
    dim: usize,
    rows: usize,
    data: Vec<f32>,
}

impl FeatureMatrix {
    pub fn zeros(rows: usize, dim: usize) -> Self {
        Self {
            dim,
            rows,
            data: vec![0.0; rows * dim],
        }
    }

    pub fn from_rows(rows: &[Vec<f32>]) -> Self {
        let dim = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * dim);
        for row in rows {
            assert_eq!(row.len(), dim, "all rows must have the same length");
            data.extend_from_slice(row);
        }
        Self {
            dim,
            rows: rows.len(),
            data,
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[f32] {
        &self.data[i * self.dim..(i + 1) * self.dim]
    }

    #[inline]
    fn row_mut(&mut self, i: usize) -> &mut [f32] {
        &mut self.data[i * self.dim..(i + 1) * self.dim]
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f32]> {
        (0..self.rows).map(|i| self.row(i))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vectorized {
    pub vocabulary: Vocabulary,
    pub matrix: FeatureMatrix,
}

#[derive(Debug, Clone, Default)]
pub struct Vectorizer {
    pub tokenizer: Tokenizer,
    pub vocabulary: VocabularyPolicy,
    pub weighting: Weighting,
}

impl Vectorizer {
    pub fn new(tokenizer: Tokenizer, vocabulary: VocabularyPolicy, weighting: Weighting) -> Self {
        Self {
            tokenizer,
            vocabulary,
            weighting,
        }
    }

    pub fn vectorize<S: AsRef<str>>(&self, documents: &[S]) -> Vectorized {
        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| self.tokenizer.tokenize(doc.as_ref()))
            .collect();

        let vocabulary = build_vocabulary(&tokenized, self.vocabulary);
        let matrix = match self.weighting {
            Weighting::TfIdf => tf_idf(&tokenized, &vocabulary),
            Weighting::NormalizedTf => normalized_tf(&tokenized, &vocabulary),
        };

        Vectorized { vocabulary, matrix }
    }
}

fn build_vocabulary(tokenized: &[Vec<String>], policy: VocabularyPolicy) -> Vocabulary {
    // Corpus counts in first-seen order
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for token in tokenized.iter().flatten() {
        match position.get(token.as_str()) {
            Some(&i) => counts[i].1 += 1,
            None => {
                position.insert(token.as_str(), counts.len());
                counts.push((token.as_str(), 1));
            }
        }
    }

    if let VocabularyPolicy::Capped(cap) = policy {
        // Stable, so equal counts stay in first-seen order
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(cap);
    }

    Vocabulary::from_terms(counts.into_iter().map(|(t, _)| t.to_string()).collect())
}

fn term_counts(tokens: &[String], vocabulary: &Vocabulary) -> Vec<(usize, usize)> {
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for token in tokens {
        if let Some(i) = vocabulary.index_of(token) {
            *counts.entry(i).or_insert(0) += 1;
        }
    }
    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_unstable();
    counts
}

fn tf_idf(tokenized: &[Vec<String>], vocabulary: &Vocabulary) -> FeatureMatrix {
    let n_docs = tokenized.len();
    let mut matrix = FeatureMatrix::zeros(n_docs, vocabulary.len());

    let per_doc: Vec<_> = tokenized
        .iter()
        .map(|tokens| term_counts(tokens, vocabulary))
        .collect();

    let mut df = vec![0usize; vocabulary.len()];
    for counts in &per_doc {
        for &(i, _) in counts {
            df[i] += 1;
        }
    }

    // Every vocabulary term occurs somewhere, so df >= 1
    let idf: Vec<f32> = df
        .iter()
        .map(|&df| (n_docs as f32 / df as f32).ln())
        .collect();

    for (d, counts) in per_doc.iter().enumerate() {
        // tf is relative to the full token sequence, not just vocabulary hits
        let len = tokenized[d].len();
        if len == 0 {
            continue;
        }
        let row = matrix.row_mut(d);
        for &(i, count) in counts {
            row[i] = (count as f32 / len as f32) * idf[i];
        }
    }

    matrix
}

fn normalized_tf(tokenized: &[Vec<String>], vocabulary: &Vocabulary) -> FeatureMatrix {
    let mut matrix = FeatureMatrix::zeros(tokenized.len(), vocabulary.len());

    for (d, tokens) in tokenized.iter().enumerate() {
        let counts = term_counts(tokens, vocabulary);
        let total: usize = counts.iter().map(|&(_, c)| c).sum();
        if total == 0 {
            continue;
        }
        let row = matrix.row_mut(d);
        for (i, count) in counts {
            row[i] = count as f32 / total as f32;
        }
    }

    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn full_vocabulary_in_first_seen_order() {
        let out = Vectorizer::default().vectorize(&["invoice payment", "meeting invoice"]);
        assert_eq!(out.vocabulary.terms(), &["invoice", "payment", "meeting"]);
        assert_eq!(out.matrix.len(), 2);
        assert_eq!(out.matrix.dim(), 3);
    }

    #[test]
    fn tf_idf_weights() {
        let docs = ["invoice invoice payment", "meeting agenda", "invoice agenda"];
        let out = Vectorizer::default().vectorize(&docs);
        let v = &out.vocabulary;
        let invoice = v.index_of("invoice").unwrap();
        let payment = v.index_of("payment").unwrap();
        let meeting = v.index_of("meeting").unwrap();

        let row = out.matrix.row(0);
        // invoice: tf 2/3, df 2 of 3
        assert!(close(row[invoice], 2.0 / 3.0 * (3.0f32 / 2.0).ln()));
        // payment: tf 1/3, df 1 of 3
        assert!(close(row[payment], 1.0 / 3.0 * 3.0f32.ln()));
        assert_eq!(row[meeting], 0.0);
    }

    #[test]
    fn term_in_every_document_weighs_zero() {
        let out = Vectorizer::default().vectorize(&["update alpha", "update beta"]);
        let update = out.vocabulary.index_of("update").unwrap();
        assert!(out.matrix.rows().all(|row| row[update] == 0.0));
    }

    #[test]
    fn document_without_tokens_is_zero_vector() {
        let out = Vectorizer::default().vectorize(&["invoice payment", "", "the and of"]);
        assert_eq!(out.matrix.dim(), 2);
        assert!(out.matrix.row(1).iter().all(|&w| w == 0.0));
        assert!(out.matrix.row(2).iter().all(|&w| w == 0.0));
    }

    #[test]
    fn empty_corpus() {
        let docs: [&str; 0] = [];
        let out = Vectorizer::default().vectorize(&docs);
        assert!(out.vocabulary.is_empty());
        assert!(out.matrix.is_empty());
    }

    #[test]
    fn capped_vocabulary_keeps_most_frequent() {
        let vectorizer = Vectorizer {
            vocabulary: VocabularyPolicy::Capped(2),
            ..Vectorizer::default()
        };
        let out = vectorizer.vectorize(&["alpha beta gamma gamma", "beta gamma delta"]);
        assert_eq!(out.vocabulary.terms(), &["gamma", "beta"]);
        assert!(out.matrix.rows().all(|row| row.len() == 2));
    }

    #[test]
    fn capped_vocabulary_ties_keep_first_seen_order() {
        let vectorizer = Vectorizer {
            vocabulary: VocabularyPolicy::Capped(2),
            ..Vectorizer::default()
        };
        let out = vectorizer.vectorize(&["zulu alpha mike"]);
        assert_eq!(out.vocabulary.terms(), &["zulu", "alpha"]);
    }

    #[test]
    fn capped_tf_uses_full_token_count() {
        let vectorizer = Vectorizer {
            vocabulary: VocabularyPolicy::Capped(1),
            ..Vectorizer::default()
        };
        let out = vectorizer.vectorize(&["alpha alpha beta", "gamma"]);
        assert_eq!(out.vocabulary.terms(), &["alpha"]);
        assert!(close(out.matrix.row(0)[0], 2.0 / 3.0 * 2.0f32.ln()));
    }

    #[test]
    fn normalized_tf_sums_to_one() {
        let vectorizer = Vectorizer {
            weighting: Weighting::NormalizedTf,
            ..Vectorizer::default()
        };
        let out = vectorizer.vectorize(&["alpha alpha beta", "beta", ""]);
        let row = out.matrix.row(0);
        assert!(close(row.iter().sum::<f32>(), 1.0));
        assert!(close(row[0], 2.0 / 3.0));
        assert_eq!(out.matrix.row(1), &[0.0, 1.0]);
        assert_eq!(out.matrix.row(2), &[0.0, 0.0]);
    }

    #[test]
    fn vectorize_is_repeatable() {
        let docs = [
            "Invoice due payment please pay your invoice",
            "Meeting agenda project discuss project timeline",
            "Weekly newsletter digest",
        ];
        let vectorizer = Vectorizer::default();
        assert_eq!(vectorizer.vectorize(&docs), vectorizer.vectorize(&docs));
    }

    #[test]
    fn from_rows_keeps_layout() {
        let m = FeatureMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(m.len(), 2);
        assert_eq!(m.dim(), 2);
        assert_eq!(m.row(1), &[3.0, 4.0]);
    }
}
