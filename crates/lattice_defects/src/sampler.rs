//! Rejection sampler that assembles charge-neutral dislocation ensembles.
//!
//! [`collect_dislocations`] composes a [`CountPolicy`] and a [`PlacementPolicy`]:
//! 1. draw counts until one is even, positive and within the lattice capacity;
//! 2. place `H = N / 2` primary dislocations, redrawing only the origin on collisions;
//! 3. place the `H` charge conjugates (negated vectors) on fresh, unoccupied origins.
//!
//! Every rejection loop runs against a [`SamplingBudget`] and fails with
//! [`Error::SamplingExhausted`] instead of spinning forever.
use std::collections::HashSet;

use glam::DVec2;
use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::ensemble::{origin_key, Dislocation, DislocationEnsemble};
use crate::error::{Error, Result, SamplingStage};
use crate::policy::{is_valid_count, CountPolicy, PlacementPolicy};

pub const DEFAULT_MAX_COUNT_DRAWS: usize = 10_000;
pub const ORIGIN_DRAWS_PER_CELL: usize = 64;
pub const MIN_ORIGIN_DRAWS: usize = 1_024;

/// Attempt limits for the rejection loops.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SamplingBudget {
    /// Maximum count draws per ensemble.
    pub max_count_draws: usize,
    /// Maximum origin draws per dislocation. `None` scales with lattice capacity.
    pub max_origin_draws: Option<usize>,
}

impl Default for SamplingBudget {
    fn default() -> Self {
        Self {
            max_count_draws: DEFAULT_MAX_COUNT_DRAWS,
            max_origin_draws: None,
        }
    }
}

impl SamplingBudget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of count draws.
    pub fn with_max_count_draws(mut self, max_count_draws: usize) -> Self {
        self.max_count_draws = max_count_draws;
        self
    }

    /// Sets a fixed maximum number of origin draws per dislocation.
    pub fn with_max_origin_draws(mut self, max_origin_draws: usize) -> Self {
        self.max_origin_draws = Some(max_origin_draws);
        self
    }

    /// Origin draws allowed per dislocation on a lattice of `capacity` cells.
    pub fn origin_draw_limit(&self, capacity: usize) -> usize {
        self.max_origin_draws.unwrap_or_else(|| {
            capacity
                .saturating_mul(ORIGIN_DRAWS_PER_CELL)
                .max(MIN_ORIGIN_DRAWS)
        })
    }

    /// Validates the budget, returning an error if a limit is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_count_draws == 0 {
            return Err(Error::InvalidConfig("max_count_draws must be > 0".into()));
        }
        if self.max_origin_draws == Some(0) {
            return Err(Error::InvalidConfig("max_origin_draws must be > 0".into()));
        }
        Ok(())
    }
}

/// Rejection counters for one sampled ensemble.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SamplingStats {
    /// Count draws, including the accepted one.
    pub count_draws: usize,
    /// Origins redrawn in the primary half.
    pub primary_collisions: usize,
    /// Origins redrawn in the conjugate half.
    pub conjugate_collisions: usize,
}

impl SamplingStats {
    /// Count draws that were rejected.
    pub fn rejected_counts(&self) -> usize {
        self.count_draws.saturating_sub(1)
    }

    pub fn origin_collisions(&self) -> usize {
        self.primary_collisions + self.conjugate_collisions
    }
}

/// Samples one valid ensemble.
pub fn collect_dislocations<C, P, R>(
    count: &C,
    placement: &P,
    rng: &mut R,
    budget: &SamplingBudget,
) -> Result<DislocationEnsemble>
where
    C: CountPolicy + ?Sized,
    P: PlacementPolicy + ?Sized,
    R: RngCore,
{
    collect_dislocations_with_stats(count, placement, rng, budget).map(|(ensemble, _)| ensemble)
}

/// Samples one valid ensemble and reports how many draws were rejected on the way.
pub fn collect_dislocations_with_stats<C, P, R>(
    count: &C,
    placement: &P,
    rng: &mut R,
    budget: &SamplingBudget,
) -> Result<(DislocationEnsemble, SamplingStats)>
where
    C: CountPolicy + ?Sized,
    P: PlacementPolicy + ?Sized,
    R: RngCore,
{
    budget.validate()?;
    let capacity = placement.system_size();

    let rng: &mut dyn RngCore = rng;
    let mut stats = SamplingStats::default();

    let n = draw_count(count, capacity, rng, budget.max_count_draws, &mut stats)?;
    let half = n / 2;
    let origin_limit = budget.origin_draw_limit(capacity);

    let mut occupied: HashSet<(u64, u64)> = HashSet::with_capacity(n);
    let mut dislocations: Vec<Dislocation> = Vec::with_capacity(n);

    for _ in 0..half {
        let burgers_vector = placement.draw_vector(rng);
        let origin = draw_free_origin(
            placement,
            rng,
            &mut occupied,
            origin_limit,
            SamplingStage::PrimaryOrigin,
            &mut stats.primary_collisions,
        )?;
        dislocations.push(Dislocation::new(burgers_vector, origin));
    }

    for i in 0..half {
        let burgers_vector = -dislocations[i].burgers_vector;
        let origin = draw_free_origin(
            placement,
            rng,
            &mut occupied,
            origin_limit,
            SamplingStage::ConjugateOrigin,
            &mut stats.conjugate_collisions,
        )?;
        dislocations.push(Dislocation::new(burgers_vector, origin));
    }

    debug!(
        "Sampled {} dislocations on {} plaquettes ({} count draws, {} origin collisions).",
        n,
        capacity,
        stats.count_draws,
        stats.origin_collisions()
    );

    Ok((DislocationEnsemble::from_vec_unchecked(dislocations), stats))
}

fn draw_count<C: CountPolicy + ?Sized>(
    count: &C,
    capacity: usize,
    rng: &mut dyn RngCore,
    max_draws: usize,
    stats: &mut SamplingStats,
) -> Result<usize> {
    while stats.count_draws < max_draws {
        stats.count_draws += 1;
        let n = count.sample(rng);
        if is_valid_count(n, capacity) {
            return Ok(n);
        }
        trace!("Rejected defect count {} (capacity {}).", n, capacity);
    }
    Err(Error::SamplingExhausted {
        stage: SamplingStage::Count,
        attempts: stats.count_draws,
    })
}

fn draw_free_origin<P: PlacementPolicy + ?Sized>(
    placement: &P,
    rng: &mut dyn RngCore,
    occupied: &mut HashSet<(u64, u64)>,
    max_draws: usize,
    stage: SamplingStage,
    collisions: &mut usize,
) -> Result<DVec2> {
    for _ in 0..max_draws {
        let origin = placement.draw_origin(rng);
        if occupied.insert(origin_key(origin)) {
            return Ok(origin);
        }
        *collisions += 1;
        trace!("Origin {} already occupied; redrawing {}.", origin, stage);
    }
    Err(Error::SamplingExhausted {
        stage,
        attempts: max_draws,
    })
}
