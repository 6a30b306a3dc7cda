pub mod config;
#[cfg(feature = "_debug")]
pub mod debug_helpers;
pub mod kmeans;
pub mod rng;
pub mod summarize;
pub mod tokenize;
pub mod types;
pub mod vectorize;

pub use config::{ClusteringConfig, ConfigError};
pub use kmeans::repair::MIN_NON_EMPTY_CLUSTERS;
pub use kmeans::DEFAULT_MAX_ITERATIONS;
pub use summarize::DEFAULT_KEYWORDS_PER_CLUSTER;
pub use types::{Cluster, Document};
pub use vectorize::DEFAULT_VOCABULARY_CAP;

use rand::RngExt;
use tracing::debug;

pub const DEFAULT_NUM_CLUSTERS: usize = 3;

/// Group documents into up to `num_clusters` named clusters.
///
/// ```
/// use mailmeans::Document;
///
/// let emails = vec![
///     Document::new("1", "Invoice due payment", "please pay your invoice", "billing@acme.com"),
///     Document::new("2", "Meeting agenda project", "discuss project timeline", "pm@acme.com"),
/// ];
///
/// let clusters = mailmeans::cluster_emails(&emails, 2);
///
/// assert_eq!(clusters.len(), 2);
/// assert_eq!(clusters.iter().map(|c| c.len()).sum::<usize>(), 2);
/// ```
///
/// Clusters are sorted by size, largest first; equal sizes keep cluster index
/// order. Empty clusters are dropped, so fewer than `num_clusters` may come back.
/// `num_clusters` below 1 is treated as 1, and an empty input gives no clusters.
///
/// Uses the fixed-seed RNG from [`rng::new`], so the same batch always clusters the
/// same way. See [`cluster_emails_extra`] to pass your own RNG and tuning.
pub fn cluster_emails(documents: &[Document], num_clusters: usize) -> Vec<Cluster<'_>> {
    let config = ClusteringConfig::default().with_num_clusters(num_clusters);
    cluster_emails_extra(&mut rng::new(), documents, &config)
}

pub fn cluster_emails_extra<'a>(
    rng: &mut impl RngExt,
    documents: &'a [Document],
    config: &ClusteringConfig,
) -> Vec<Cluster<'a>> {
    cluster_emails_extra_debug(rng, documents, config).0
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebugInfo {
    pub vocabulary_size: usize,
    pub k: usize,
    pub kmeans_loop_iterations: usize,
    pub kmeans_converged: bool,
    pub kmeans_repaired: bool,
}

pub fn cluster_emails_extra_debug<'a>(
    rng: &mut impl RngExt,
    documents: &'a [Document],
    config: &ClusteringConfig,
) -> (Vec<Cluster<'a>>, DebugInfo) {
    if documents.is_empty() {
        return (Vec::new(), DebugInfo::default());
    }

    let num_clusters = config.num_clusters.max(1);
    let k = num_clusters.min(documents.len());

    let corpus: Vec<String> = documents.iter().map(Document::text).collect();
    let vectorized = config.vectorizer().vectorize(&corpus);

    let result = kmeans::find_clusters(rng, &vectorized.matrix, k, config.max_iterations);

    let mut members: Vec<Vec<&'a Document>> = result
        .sizes
        .iter()
        .map(|&size| Vec::with_capacity(size))
        .collect();
    for (doc, &cluster) in documents.iter().zip(&result.assignments) {
        members[cluster].push(doc);
    }

    let mut clusters: Vec<Cluster<'a>> = members
        .into_iter()
        .enumerate()
        .filter(|(_, emails)| !emails.is_empty())
        .map(|(id, emails)| {
            let keywords = summarize::extract_keywords(
                &config.tokenizer,
                &emails,
                config.keywords_per_cluster,
            );
            let name = summarize::name_cluster(&emails, &keywords);
            Cluster {
                id,
                name,
                emails,
                keywords,
            }
        })
        .collect();

    // Stable sort, largest first
    clusters.sort_by(|a, b| b.len().cmp(&a.len()));

    debug!(
        documents = documents.len(),
        vocabulary = vectorized.vocabulary.len(),
        k,
        clusters = ?clusters.iter().map(|c| c.len()).collect::<Vec<_>>(),
        "clustered emails"
    );

    (
        clusters,
        DebugInfo {
            vocabulary_size: vectorized.vocabulary.len(),
            k,
            kmeans_loop_iterations: result.iterations,
            kmeans_converged: result.converged,
            kmeans_repaired: result.repaired,
        },
    )
}
