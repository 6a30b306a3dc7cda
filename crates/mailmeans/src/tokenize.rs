//! Text normalization: lowercase, split into words, drop stopwords, stem, drop short
//! terms.

use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, LazyLock};

// ASCII word boundaries, so "abc123" or "foo_bar" are not words at all
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u:\b)[a-z]+(?-u:\b)").expect("word pattern is valid"));

/// Terms of this length or shorter are dropped after stemming.
pub const MAX_DROPPED_TERM_LEN: usize = 2;

const ENGLISH_STOPWORDS: &[&str] = &[
    "the", "is", "at", "which", "on", "a", "an", "as", "are", "was", "were", "been", "be",
    "have", "has", "had", "do", "does", "did", "will", "would", "could", "should", "may",
    "might", "must", "can", "this", "that", "these", "those", "i", "you", "he", "she", "it",
    "we", "they", "what", "who", "when", "where", "why", "how", "all", "each", "every",
    "both", "few", "more", "most", "other", "some", "such", "no", "nor", "not", "only", "own",
    "same", "so", "than", "too", "very", "just", "in", "of", "to", "for", "with", "from",
    "up", "out", "if", "about", "into", "through", "during", "before", "after", "above",
    "below", "between", "under", "again", "further", "then", "once", "and", "but", "or",
    "because", "until", "while", "by", "against", "down", "off", "over",
];

/// A closed set of words that never become terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn new(words: &[&str]) -> Self {
        Self {
            words: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Articles, pronouns, auxiliary verbs, conjunctions and prepositions.
    pub fn english() -> Self {
        Self::new(ENGLISH_STOPWORDS)
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Reduces a lowercase word to its root form.
pub trait Stem: fmt::Debug + Send + Sync {
    fn stem<'a>(&self, word: &'a str) -> Cow<'a, str>;
}

/// Leaves words as they are. Keeps keywords readable in cluster names.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStemming;

impl Stem for NoStemming {
    fn stem<'a>(&self, word: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(word)
    }
}

/// Snowball (Porter 2) English stemmer: "running" -> "run", "invoices" -> "invoic".
pub struct PorterStemmer(Stemmer);

impl PorterStemmer {
    pub fn new() -> Self {
        Self(Stemmer::create(Algorithm::English))
    }
}

impl Default for PorterStemmer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PorterStemmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PorterStemmer")
    }
}

impl Stem for PorterStemmer {
    fn stem<'a>(&self, word: &'a str) -> Cow<'a, str> {
        self.0.stem(word)
    }
}

#[derive(Debug, Clone)]
pub struct Tokenizer {
    stopwords: Arc<StopWords>,
    stemmer: Arc<dyn Stem>,
}

impl Default for Tokenizer {
    /// English stopwords, no stemming.
    fn default() -> Self {
        Self::new(StopWords::english(), NoStemming)
    }
}

impl Tokenizer {
    pub fn new(stopwords: StopWords, stemmer: impl Stem + 'static) -> Self {
        Self {
            stopwords: Arc::new(stopwords),
            stemmer: Arc::new(stemmer),
        }
    }

    pub fn with_stopwords(mut self, stopwords: StopWords) -> Self {
        self.stopwords = Arc::new(stopwords);
        self
    }

    pub fn with_stemmer(mut self, stemmer: impl Stem + 'static) -> Self {
        self.stemmer = Arc::new(stemmer);
        self
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();

        WORD.find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|word| !self.stopwords.contains(word))
            .map(|word| self.stemmer.stem(word))
            .filter(|term| term.len() > MAX_DROPPED_TERM_LEN)
            .map(Cow::into_owned)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokens(text: &str) -> Vec<String> {
        Tokenizer::default().tokenize(text)
    }

    #[test]
    fn lowercases_and_drops_stopwords() {
        assert_eq!(
            tokens("The Invoice is due for Payment"),
            vec!["invoice", "due", "payment"]
        );
    }

    #[test]
    fn empty_input() {
        assert!(tokens("").is_empty());
    }

    #[test]
    fn only_stopwords_and_short_words() {
        assert!(tokens("it is on me, ok? an ox").is_empty());
    }

    #[test]
    fn punctuation_splits_words() {
        assert_eq!(
            tokens("re: project-update (final)!!"),
            vec!["project", "update", "final"]
        );
    }

    #[test]
    fn alphanumeric_runs_are_not_words() {
        assert_eq!(tokens("order abc123 shipped foo_bar"), vec!["order", "shipped"]);
    }

    #[test]
    fn non_ascii_letters_split_words() {
        assert_eq!(tokens("résumé attached"), vec!["sum", "attached"]);
    }

    #[test]
    fn porter_stemming_runs_before_length_filter() {
        let tokenizer = Tokenizer::default().with_stemmer(PorterStemmer::new());
        assert_eq!(
            tokenizer.tokenize("running meetings invoices"),
            vec!["run", "meet", "invoic"]
        );
    }

    #[test]
    fn custom_stopwords_replace_english() {
        let tokenizer = Tokenizer::default().with_stopwords(StopWords::new(&["newsletter"]));
        assert_eq!(
            tokenizer.tokenize("The weekly Newsletter"),
            vec!["the", "weekly"]
        );
    }

    #[test]
    fn no_stopwords_keeps_long_function_words() {
        let tokenizer = Tokenizer::new(StopWords::none(), NoStemming);
        assert_eq!(tokenizer.tokenize("about the time"), vec!["about", "the", "time"]);
    }

    #[test]
    fn english_list_has_no_duplicates() {
        let stopwords = StopWords::english();
        assert!(stopwords.contains("between"));
        assert!(!stopwords.contains("invoice"));
        assert_eq!(stopwords.len(), ENGLISH_STOPWORDS.len());
    }
}
