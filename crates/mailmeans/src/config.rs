use crate::kmeans::DEFAULT_MAX_ITERATIONS;
use crate::summarize::DEFAULT_KEYWORDS_PER_CLUSTER;
use crate::tokenize::Tokenizer;
use crate::vectorize::{Vectorizer, VocabularyPolicy, Weighting, DEFAULT_VOCABULARY_CAP};
use crate::DEFAULT_NUM_CLUSTERS;
use snafu::prelude::*;
use std::str::FromStr;

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ConfigError {
    #[snafu(display(
        "unknown vocabulary policy {value:?}, expected \"full\", \"top\" or \"top:<n>\""
    ))]
    UnknownVocabularyPolicy { value: String },

    #[snafu(display("vocabulary cap must be a positive integer, got {value:?}"))]
    InvalidVocabularyCap {
        value: String,
        source: std::num::ParseIntError,
    },

    #[snafu(display("vocabulary cap must be at least 1"))]
    ZeroVocabularyCap,

    #[snafu(display("unknown weighting {value:?}, expected \"tfidf\" or \"tf\""))]
    UnknownWeighting { value: String },
}

impl FromStr for VocabularyPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "full" => return Ok(VocabularyPolicy::Full),
            "top" => return Ok(VocabularyPolicy::Capped(DEFAULT_VOCABULARY_CAP)),
            _ => {}
        }

        let cap = s
            .strip_prefix("top:")
            .context(UnknownVocabularyPolicySnafu { value: s.as_str() })?;
        let cap: usize = cap
            .parse()
            .context(InvalidVocabularyCapSnafu { value: cap })?;
        ensure!(cap > 0, ZeroVocabularyCapSnafu);

        Ok(VocabularyPolicy::Capped(cap))
    }
}

impl FromStr for Weighting {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tfidf" | "tf-idf" => Ok(Weighting::TfIdf),
            "tf" | "normalized-tf" => Ok(Weighting::NormalizedTf),
            other => UnknownWeightingSnafu { value: other }.fail(),
        }
    }
}

/// Everything [`crate::cluster_emails_extra`] can be tuned with.
#[derive(Debug, Clone)]
pub struct ClusteringConfig {
    /// Requested number of clusters; values below 1 are treated as 1.
    pub num_clusters: usize,
    pub max_iterations: usize,
    pub keywords_per_cluster: usize,
    pub tokenizer: Tokenizer,
    pub vocabulary: VocabularyPolicy,
    pub weighting: Weighting,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            num_clusters: DEFAULT_NUM_CLUSTERS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            keywords_per_cluster: DEFAULT_KEYWORDS_PER_CLUSTER,
            tokenizer: Tokenizer::default(),
            vocabulary: VocabularyPolicy::default(),
            weighting: Weighting::default(),
        }
    }
}

impl ClusteringConfig {
    pub fn with_num_clusters(mut self, num_clusters: usize) -> Self {
        self.num_clusters = num_clusters;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_keywords_per_cluster(mut self, keywords_per_cluster: usize) -> Self {
        self.keywords_per_cluster = keywords_per_cluster;
        self
    }

    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn with_vocabulary(mut self, vocabulary: VocabularyPolicy) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    pub fn with_weighting(mut self, weighting: Weighting) -> Self {
        self.weighting = weighting;
        self
    }

    pub(crate) fn vectorizer(&self) -> Vectorizer {
        Vectorizer::new(self.tokenizer.clone(), self.vocabulary, self.weighting)
    }
}
