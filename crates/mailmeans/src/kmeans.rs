use crate::vectorize::FeatureMatrix;
use rand::RngExt;
use tracing::debug;

pub mod lloyds;
pub mod plus_plus_init;
pub mod repair;

// References:
// - k-means++: The Advantages of Careful Seeding (D. Arthur, S. Vassilvitskii)
//   https://theory.stanford.edu/~sergei/papers/kMeansPP-soda.pdf
// - https://scikit-learn.org/stable/modules/generated/sklearn.cluster.KMeans.html
//
// Distances are plain Euclidean even though the vectors are TF-IDF weights; cosine
// would change which documents end up together.

pub const DEFAULT_MAX_ITERATIONS: usize = 30;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KMeans {
    /// One cluster index in `0..k` per input point.
    pub assignments: Vec<usize>,
    /// Number of points in each cluster, after the repair pass.
    pub sizes: Vec<usize>,
    pub iterations: usize,
    pub converged: bool,
    /// Whether [`repair::fill_empty_clusters`] moved any points.
    pub repaired: bool,
}

/// k-means++ seeding, Lloyd's iterations, then the empty-cluster repair pass.
///
/// `k` is clamped to the number of points. A `max_iterations` of zero skips the
/// Lloyd's loop, so every point stays in cluster 0 until the repair pass.
/// No points or `k == 0` gives an empty result.
pub fn find_clusters(
    rng: &mut impl RngExt,
    points: &FeatureMatrix,
    k: usize,
    max_iterations: usize,
) -> KMeans {
    let n = points.len();
    if n == 0 || k == 0 {
        return KMeans::default();
    }
    let k = k.min(n);

    let mut centroids: Vec<Vec<f32>> = plus_plus_init::find_initial(rng, points, k)
        .into_iter()
        .map(|i| points.row(i).to_vec())
        .collect();

    let mut assignments = vec![0usize; n];
    let result = lloyds::lloyds_loop(points, max_iterations, &mut assignments, &mut centroids);
    debug!(
        points = n,
        dim = points.dim(),
        k,
        iterations = result.iterations,
        converged = result.converged,
        "lloyds loop finished"
    );

    let mut sizes = result.counts;
    let repaired = repair::fill_empty_clusters(&mut assignments, &mut sizes);

    KMeans {
        assignments,
        sizes,
        iterations: result.iterations,
        converged: result.converged,
        repaired,
    }
}

/// Cluster index for every point, see [`find_clusters`].
pub fn k_means(
    rng: &mut impl RngExt,
    points: &FeatureMatrix,
    k: usize,
    max_iterations: usize,
) -> Vec<usize> {
    find_clusters(rng, points, k, max_iterations).assignments
}
