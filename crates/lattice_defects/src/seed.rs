//! Deterministic seed derivation for batches of independent ensembles.
//!
//! Each ensemble in a batch gets its own random source seeded from
//! [`seed_for_ensemble`], so batches can be split across threads and still reproduce
//! exactly for a given base seed.

/// Creates a deterministic seed for ensemble `index` from a base seed.
pub fn seed_for_ensemble(base_seed: u64, index: u64) -> u64 {
    let mixed = base_seed ^ index.wrapping_add(1).wrapping_mul(0x9E3779B97F4A7C15);
    mix_u64(mixed)
}

#[inline]
fn mix_u64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xBF58476D1CE4E5B9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D049BB133111EB);
    x ^ (x >> 31)
}
