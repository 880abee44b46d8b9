//! Reusable generator binding a random source to count and placement policies.
use glam::DVec2;
use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::burgers::BurgersPalette;
use crate::ensemble::DislocationEnsemble;
use crate::error::{Error, Result};
use crate::lattice::LatticeExtent;
use crate::policy::count::validate_concentration;
use crate::policy::{CountDistribution, CountPolicy, PlacementPolicy, UniformBurgersVector};
use crate::sampler::{collect_dislocations_with_stats, SamplingBudget, SamplingStats};

/// Configuration for a [`RandomDislocationDistribution`].
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DistributionConfig {
    /// Target fraction of plaquettes carrying a dislocation, in `[0, 1]`.
    pub concentration: f64,
    /// Lattice extent along x in plaquettes.
    pub lx: u32,
    /// Lattice extent along y; `None` means a square lattice.
    pub ly: Option<u32>,
    /// Allowed Burgers vectors.
    pub burgers_vectors: BurgersPalette,
    /// Binomial defect count when true, corrected fixed count otherwise.
    pub random_defect_number: bool,
    /// Attempt limits for the rejection loops.
    pub budget: SamplingBudget,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            concentration: 0.0,
            lx: 1,
            ly: None,
            burgers_vectors: BurgersPalette::tetragonal(),
            random_defect_number: true,
            budget: SamplingBudget::default(),
        }
    }
}

impl DistributionConfig {
    /// Creates a config for a square `lx x lx` lattice at `concentration`.
    pub fn new(concentration: f64, lx: u32) -> Self {
        Self {
            concentration,
            lx,
            ..Default::default()
        }
    }

    /// Sets the y extent.
    pub fn with_ly(mut self, ly: u32) -> Self {
        self.ly = Some(ly);
        self
    }

    /// Sets the Burgers-vector palette.
    pub fn with_burgers_vectors(mut self, burgers_vectors: BurgersPalette) -> Self {
        self.burgers_vectors = burgers_vectors;
        self
    }

    /// Sets the palette from raw vectors, validating it.
    pub fn try_with_burgers_vectors(mut self, vectors: Vec<DVec2>) -> Result<Self> {
        self.burgers_vectors = BurgersPalette::new(vectors)?;
        Ok(self)
    }

    /// Selects random (binomial) or fixed defect counts.
    pub fn with_random_defect_number(mut self, random_defect_number: bool) -> Self {
        self.random_defect_number = random_defect_number;
        self
    }

    /// Sets the rejection-loop budget.
    pub fn with_budget(mut self, budget: SamplingBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Lattice extent described by this config.
    pub fn extent(&self) -> Result<LatticeExtent> {
        LatticeExtent::new(self.lx, self.ly.unwrap_or(self.lx))
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        self.extent()?;
        validate_concentration(self.concentration)?;
        self.budget.validate()
    }
}

/// Generator of independent, charge-neutral dislocation ensembles.
///
/// Owns its random source, so ensembles drawn from two instances with identically
/// seeded sources and identical configuration are bit-identical.
#[derive(Debug, Clone)]
pub struct RandomDislocationDistribution<
    R: RngCore,
    C: CountPolicy = CountDistribution,
    P: PlacementPolicy = UniformBurgersVector,
> {
    rng: R,
    count: C,
    placement: P,
    budget: SamplingBudget,
}

impl<R: RngCore> RandomDislocationDistribution<R> {
    /// Builds the default policies from `config`.
    ///
    /// Fails only on invalid configuration. A configuration whose count distribution
    /// never yields a realisable ensemble (zero concentration, a single plaquette)
    /// still builds; sampling from it returns [`Error::SamplingExhausted`].
    pub fn try_new(config: DistributionConfig, rng: R) -> Result<Self> {
        config.validate()?;
        let extent = config.extent()?;
        let count =
            CountDistribution::new(extent, config.concentration, config.random_defect_number)?;
        let placement = UniformBurgersVector::new(extent, config.burgers_vectors)?;

        info!(
            "Dislocation distribution on {}x{} plaquettes: concentration {}, {} counts, expected {:.2} defects.",
            extent.lx(),
            extent.ly(),
            config.concentration,
            if count.is_random() { "random" } else { "fixed" },
            count.mean()
        );

        Self::try_from_parts(rng, count, placement, config.budget)
    }
}

impl<R: RngCore, C: CountPolicy, P: PlacementPolicy> RandomDislocationDistribution<R, C, P> {
    /// Binds custom policies to a random source.
    pub fn try_from_parts(rng: R, count: C, placement: P, budget: SamplingBudget) -> Result<Self> {
        budget.validate()?;
        Ok(Self {
            rng,
            count,
            placement,
            budget,
        })
    }

    /// Number of plaquettes, the upper bound on ensemble size.
    pub fn system_size(&self) -> usize {
        self.placement.system_size()
    }

    /// Draws one ensemble.
    pub fn collect_dislocations(&mut self) -> Result<DislocationEnsemble> {
        self.collect_dislocations_with_stats()
            .map(|(ensemble, _)| ensemble)
    }

    /// Draws one ensemble together with its rejection counters.
    pub fn collect_dislocations_with_stats(
        &mut self,
    ) -> Result<(DislocationEnsemble, SamplingStats)> {
        collect_dislocations_with_stats(&self.count, &self.placement, &mut self.rng, &self.budget)
    }

    /// Draws `n` independent ensembles in sequence from the owned source.
    pub fn sample_many(&mut self, n: usize) -> Result<Vec<DislocationEnsemble>> {
        (0..n).map(|_| self.collect_dislocations()).collect()
    }

    pub fn count_policy(&self) -> &C {
        &self.count
    }

    pub fn placement_policy(&self) -> &P {
        &self.placement
    }

    pub fn budget(&self) -> &SamplingBudget {
        &self.budget
    }

    /// Mutable access to the random source, e.g. for reseeding.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn into_rng(self) -> R {
        self.rng
    }
}
