use tracing::trace;

/// Below this many non-empty clusters (or `k`, if smaller) the repair pass kicks in.
pub const MIN_NON_EMPTY_CLUSTERS: usize = 3;

/// Fills empty clusters from the largest ones so that small or skewed batches still
/// come out as a few distinct groups.
///
/// Runs only when fewer than `min(3, k)` clusters are non-empty and there are at
/// least 3 points. Each empty cluster, in index order, takes `max(1, size / 3)`
/// points from the currently largest originally non-empty cluster (first one on
/// ties), scanning the assignments front to back. Returns whether anything moved.
///
/// `counts` holds the size of each of the `k` clusters and is kept in step with
/// `assignments`.
pub fn fill_empty_clusters(assignments: &mut [usize], counts: &mut [usize]) -> bool {
    let k = counts.len();
    debug_assert_eq!(counts.iter().sum::<usize>(), assignments.len());

    let non_empty = counts.iter().filter(|&&c| c > 0).count();
    if non_empty >= MIN_NON_EMPTY_CLUSTERS.min(k) || assignments.len() < MIN_NON_EMPTY_CLUSTERS {
        return false;
    }

    let (empty, donors): (Vec<usize>, Vec<usize>) = (0..k).partition(|&c| counts[c] == 0);

    let mut moved_any = false;
    for target in empty {
        let Some(largest) = donors
            .iter()
            .copied()
            .reduce(|best, c| if counts[c] > counts[best] { c } else { best })
        else {
            break;
        };

        let size = counts[largest];
        if size <= 1 {
            continue;
        }

        let quota = (size / 3).max(1);
        let mut moved = 0;
        for assignment in assignments.iter_mut() {
            if moved == quota {
                break;
            }
            if *assignment == largest {
                *assignment = target;
                moved += 1;
            }
        }

        counts[largest] -= moved;
        counts[target] += moved;
        moved_any = true;
        trace!(from = largest, to = target, moved, "filled empty cluster");
    }

    moved_any
}
