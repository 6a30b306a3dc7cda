use crate::tokenize::Tokenizer;
use crate::types::Document;
use std::collections::HashMap;

pub const DEFAULT_KEYWORDS_PER_CLUSTER: usize = 3;

/// The `top_n` most frequent terms across the subjects and snippets of `documents`.
///
/// Equal counts are ordered by where the term first appears in the cluster text.
pub fn extract_keywords(tokenizer: &Tokenizer, documents: &[&Document], top_n: usize) -> Vec<String> {
    let text = documents
        .iter()
        .map(|doc| doc.text())
        .collect::<Vec<_>>()
        .join(" ");

    let mut position: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for term in tokenizer.tokenize(&text) {
        match position.get(&term) {
            Some(&i) => counts[i].1 += 1,
            None => {
                position.insert(term.clone(), counts.len());
                counts.push((term, 1));
            }
        }
    }

    // Stable, so ties keep first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(top_n);
    counts.into_iter().map(|(term, _)| term).collect()
}

/// `"Invoice & Payment"` from the top two keywords, or a sender-based name when
/// there are none. Senders with no usable name are skipped, so a cluster with
/// neither keywords nor senders is `"Mixed Messages"`.
pub fn name_cluster(documents: &[&Document], keywords: &[String]) -> String {
    if !keywords.is_empty() {
        return keywords
            .iter()
            .take(2)
            .map(|k| title_case(k))
            .collect::<Vec<_>>()
            .join(" & ");
    }

    let mut senders: Vec<&str> = Vec::new();
    for doc in documents {
        let sender = sender_name(&doc.from);
        if !sender.is_empty() && !senders.contains(&sender) {
            senders.push(sender);
        }
    }

    match senders.len() {
        1 => format!("{} Messages", senders[0]),
        2..=3 => format!("{} Messages", senders[..2].join(", ")),
        _ => "Mixed Messages".to_string(),
    }
}

/// Whatever precedes the `@` of the address, minus a `<...` tail, trimmed.
///
/// `"alerts@service.com"` gives `"alerts"`, `"Jane Doe <jane@example.com>"` gives
/// `"Jane Doe"`.
pub fn sender_name(from: &str) -> &str {
    let before_at = from.split('@').next().unwrap_or_default();
    before_at.split('<').next().unwrap_or_default().trim()
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
