use rand::{RngExt, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

// e * 100_000
const RANDOM_SEED: u64 = 271828;

/// The RNG used by [`crate::cluster_emails`]. Fixed seed, so repeated calls on the
/// same batch give the same clusters.
pub fn new() -> impl RngExt {
    from_seed(RANDOM_SEED)
}

pub fn from_seed(seed: u64) -> impl RngExt {
    Xoshiro256PlusPlus::seed_from_u64(seed)
}
