//! Sampling policies consumed by the ensemble sampler.
//!
//! A count policy decides how many defects an ensemble should hold; a placement
//! policy decides each defect's Burgers vector and origin. Both are object-safe
//! traits taking the random source explicitly, so policies stay stateless and
//! independent ensembles can be drawn on separate threads with separate sources.
use glam::DVec2;
use rand::RngCore;

pub mod count;
pub mod uniform;

pub use count::{corrected_fixed_count, CountDistribution};
pub use uniform::UniformBurgersVector;

/// Distribution over non-negative defect counts.
pub trait CountPolicy: Send + Sync {
    /// Draws one candidate count. The sampler rejects draws it cannot realise.
    fn sample(&self, rng: &mut dyn RngCore) -> usize;
}

/// Source of individual defect vectors and origins on a finite lattice.
pub trait PlacementPolicy: Send + Sync {
    /// Number of distinct origins, which also bounds the defect count.
    fn system_size(&self) -> usize;

    /// Draws one Burgers vector.
    fn draw_vector(&self, rng: &mut dyn RngCore) -> DVec2;

    /// Draws one origin.
    fn draw_origin(&self, rng: &mut dyn RngCore) -> DVec2;
}

impl<T: CountPolicy + ?Sized> CountPolicy for Box<T> {
    fn sample(&self, rng: &mut dyn RngCore) -> usize {
        (**self).sample(rng)
    }
}

impl<T: PlacementPolicy + ?Sized> PlacementPolicy for Box<T> {
    fn system_size(&self) -> usize {
        (**self).system_size()
    }

    fn draw_vector(&self, rng: &mut dyn RngCore) -> DVec2 {
        (**self).draw_vector(rng)
    }

    fn draw_origin(&self, rng: &mut dyn RngCore) -> DVec2 {
        (**self).draw_origin(rng)
    }
}

/// Returns true for even counts in `[2, capacity]`.
#[inline]
pub(crate) fn is_valid_count(n: usize, capacity: usize) -> bool {
    n != 0 && n % 2 == 0 && n <= capacity
}
