use crate::vectorize::FeatureMatrix;

#[inline(always)]
pub fn squared_distance(x: &[f32], y: &[f32]) -> f32 {
    debug_assert_eq!(x.len(), y.len());
    x.iter().zip(y).fold(0.0, |acc, (a, b)| {
        let d = a - b;
        d.mul_add(d, acc)
    })
}

#[inline(always)]
pub fn distance(x: &[f32], y: &[f32]) -> f32 {
    squared_distance(x, y).sqrt()
}

/// Nearest centroid for every point; ties go to the lowest centroid index.
#[inline]
pub fn assign_points(points: &FeatureMatrix, centroids: &[Vec<f32>], assignments: &mut [usize]) {
    for (point, assignment) in points.rows().zip(assignments.iter_mut()) {
        let mut min = f32::INFINITY;
        let mut min_idx = 0;
        for (j, centroid) in centroids.iter().enumerate() {
            let d = distance(point, centroid);
            if d < min {
                min = d;
                min_idx = j;
            }
        }

        *assignment = min_idx;
    }
}

/// Number of points assigned to each of the `k` clusters.
pub fn cluster_sizes(assignments: &[usize], k: usize) -> Vec<usize> {
    let mut counts = vec![0usize; k];
    for &a in assignments {
        counts[a] += 1;
    }
    counts
}

#[derive(Debug)]
pub struct UpdateResult {
    pub counts: Vec<usize>,
}

/// Moves every non-empty centroid to the mean of its points. Empty clusters keep
/// their previous centroid.
#[inline]
pub fn update_centroids(
    points: &FeatureMatrix,
    assignments: &[usize],
    centroids: &mut [Vec<f32>],
) -> UpdateResult {
    let k = centroids.len();
    let dim = points.dim();
    let mut counts = vec![0usize; k];
    let mut sums = vec![vec![0f32; dim]; k];

    for (point, &assigned_c) in points.rows().zip(assignments) {
        assert!(assigned_c < k);

        counts[assigned_c] += 1;
        for (sum, &x) in sums[assigned_c].iter_mut().zip(point) {
            *sum += x;
        }
    }

    for ((centroid, sum), &count) in centroids.iter_mut().zip(sums).zip(&counts) {
        if count == 0 {
            // It's an empty cluster, ignore
            continue;
        }

        for (c, s) in centroid.iter_mut().zip(sum) {
            *c = s / count as f32;
        }
    }

    UpdateResult { counts }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LloydsLoopResult {
    pub iterations: usize,
    pub converged: bool,
    /// Cluster sizes for the assignments left in place on return.
    pub counts: Vec<usize>,
}

/// Alternates assignment and update until the assignments stop changing or
/// `max_iterations` passes have run. A budget of zero runs no pass and leaves
/// `assignments` and `centroids` untouched.
///
/// `assignments` is the starting point for the convergence check (all zeros on
/// the first call) and holds the final assignments on return.
pub fn lloyds_loop(
    points: &FeatureMatrix,
    max_iterations: usize,
    assignments: &mut [usize],
    centroids: &mut [Vec<f32>],
) -> LloydsLoopResult {
    assert_eq!(points.len(), assignments.len());
    assert!(!centroids.is_empty());
    assert!(centroids.len() <= points.len());

    for centroid in centroids.iter() {
        assert_eq!(centroid.len(), points.dim());
    }

    let mut next = vec![0usize; assignments.len()];
    let mut counts = cluster_sizes(assignments, centroids.len());

    for i in 0..max_iterations {
        assign_points(points, centroids, &mut next);

        if next == assignments {
            return LloydsLoopResult {
                iterations: i + 1,
                converged: true,
                counts,
            };
        }

        assignments.copy_from_slice(&next);
        counts = update_centroids(points, assignments, centroids).counts;
    }

    LloydsLoopResult {
        iterations: max_iterations,
        converged: false,
        counts,
    }
}
