use crate::kmeans::lloyds::squared_distance;
use crate::vectorize::FeatureMatrix;
use rand::RngExt;

#[inline(always)]
fn sample_by_distance(rng: &mut impl RngExt, min_distances: &[f32], sum: f32) -> usize {
    let random_threshold = rng.random::<f32>() * sum;
    let mut cumsum = 0.0;

    for (i, &distance) in min_distances.iter().enumerate() {
        cumsum += distance;
        if cumsum > random_threshold {
            return i;
        }
    }

    // Rounding can leave cumsum just short of the threshold; never fall back onto a
    // point that is already a centroid unless every point is one
    min_distances
        .iter()
        .rposition(|&d| d > 0.0)
        .unwrap_or(min_distances.len() - 1)
}

/// k-means++ seeding. Returns the indices of the points chosen as initial centroids.
///
/// The first index is uniform; every following one is drawn with probability
/// proportional to the squared distance to the nearest centroid picked so far.
pub fn find_initial(rng: &mut impl RngExt, points: &FeatureMatrix, k: usize) -> Vec<usize> {
    let n = points.len();

    // More clusters than points => silent clamping
    let k = k.min(n);
    if k == 0 {
        return Vec::new();
    }

    let mut init_points = Vec::<usize>::with_capacity(k);
    let c0 = rng.random_range(0..n);
    init_points.push(c0);

    let first = points.row(c0);
    let mut min_distances: Vec<f32> = points
        .rows()
        .map(|point| squared_distance(point, first))
        .collect();
    let mut min_distances_sum: f32 = min_distances.iter().sum();

    for _ in 1..k {
        let next = sample_by_distance(rng, &min_distances, min_distances_sum);
        let centre = points.row(next);

        min_distances_sum = 0.0;
        for (point, min_distance) in points.rows().zip(min_distances.iter_mut()) {
            *min_distance = min_distance.min(squared_distance(point, centre));
            min_distances_sum += *min_distance;
        }

        init_points.push(next);
    }

    init_points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng;
    use crate::vectorize::Vectorizer;
    use pretty_assertions::assert_eq;

    fn line(values: &[f32]) -> FeatureMatrix {
        let rows: Vec<Vec<f32>> = values.iter().map(|&v| vec![v, 0.0]).collect();
        FeatureMatrix::from_rows(&rows)
    }

    fn sorted(mut indices: Vec<usize>) -> Vec<usize> {
        indices.sort();
        indices
    }

    #[test]
    fn picks_k_distinct_rows() {
        let mut rng = rng::new();
        let points = line(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);

        for k in 1..=points.len() {
            let picked = find_initial(&mut rng, &points, k);
            assert_eq!(picked.len(), k);
            assert!(picked.iter().all(|&i| i < points.len()));

            let mut unique = sorted(picked);
            unique.dedup();
            assert_eq!(unique.len(), k, "k = {k}");
        }
    }

    #[test]
    fn nothing_to_pick() {
        let mut rng = rng::new();
        assert!(find_initial(&mut rng, &FeatureMatrix::default(), 3).is_empty());
        assert!(find_initial(&mut rng, &line(&[1.0, 2.0]), 0).is_empty());
    }

    #[test]
    fn k_above_row_count_takes_every_row() {
        let points = line(&[0.0, 4.0, 8.0]);
        let picked = find_initial(&mut rng::new(), &points, 10);
        assert_eq!(sorted(picked), vec![0, 1, 2]);
    }

    #[test]
    fn far_rows_win_over_a_dense_group() {
        let mut values: Vec<f32> = (0..10).map(|i| i as f32 * 0.01).collect();
        values.extend([50.0, -50.0]);
        let points = line(&values);

        let picked = find_initial(&mut rng::new(), &points, 3);
        assert!(picked.contains(&10) && picked.contains(&11), "picked {picked:?}");
    }

    #[test]
    fn duplicate_rows_are_not_picked_twice() {
        let points = line(&[3.0, 3.0, 9.0]);
        let picked = find_initial(&mut rng::new(), &points, 2);

        assert!(picked.contains(&2), "picked {picked:?}");
    }

    #[test]
    fn zero_width_rows() {
        let points = FeatureMatrix::zeros(4, 0);
        let picked = find_initial(&mut rng::new(), &points, 3);

        assert_eq!(picked.len(), 3);
        assert!(picked.iter().all(|&i| i < 4));
    }

    #[test]
    fn one_seed_per_topic() {
        // Repeated subjects share a vector, so the copy of a picked row weighs nothing
        let subjects = [
            "invoice payment",
            "meeting project",
            "newsletter digest",
            "invoice payment",
            "meeting project",
            "newsletter digest",
        ];
        let points = Vectorizer::default().vectorize(&subjects).matrix;

        for seed in 0..8 {
            let picked = find_initial(&mut rng::from_seed(seed), &points, 3);
            let topics = sorted(picked.iter().map(|&i| i % 3).collect());
            assert_eq!(topics, vec![0, 1, 2], "seed {seed} picked {picked:?}");
        }
    }

    #[test]
    fn same_seed_same_picks() {
        let points = line(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        let a = find_initial(&mut rng::from_seed(7), &points, 3);
        let b = find_initial(&mut rng::from_seed(7), &points, 3);
        assert_eq!(a, b);
    }
}
