#![forbid(unsafe_code)]
//! lattice_defects: charge-neutral random dislocation ensembles on rectangular lattices.
//!
//! Modules:
//! - lattice / burgers: lattice extents, plaquette centers and Burgers-vector palettes
//! - policy: count policies (binomial or corrected fixed count) and uniform placement
//! - sampler: rejection sampler pairing each dislocation with its exact charge conjugate
//! - distribution: reusable generator owning its random source
//! - seed: per-ensemble seed derivation for reproducible batches
//!
//! Ensembles are consumed by strain-field solvers; see [`ensemble::DislocationEnsemble`].
pub mod burgers;
pub mod distribution;
pub mod ensemble;
pub mod error;
pub mod lattice;
pub mod policy;
pub mod sampler;
pub mod seed;

/// Convenient re-exports for common types. Import with `use lattice_defects::prelude::*;`.
pub mod prelude {
    pub use crate::burgers::BurgersPalette;
    pub use crate::distribution::{DistributionConfig, RandomDislocationDistribution};
    pub use crate::ensemble::{Dislocation, DislocationEnsemble, InvariantViolation};
    pub use crate::error::{Error, Result, SamplingStage};
    pub use crate::lattice::LatticeExtent;
    pub use crate::policy::{
        corrected_fixed_count, CountDistribution, CountPolicy, PlacementPolicy,
        UniformBurgersVector,
    };
    pub use crate::sampler::{
        collect_dislocations, collect_dislocations_with_stats, SamplingBudget, SamplingStats,
    };
    pub use crate::seed::seed_for_ensemble;
}
