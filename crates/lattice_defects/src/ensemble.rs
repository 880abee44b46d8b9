//! Dislocations and charge-neutral dislocation ensembles.
//!
//! An ensemble of `2H` dislocations is laid out as a primary half followed by its
//! charge-conjugate half: the Burgers vector at `H + i` is the exact negation of the one
//! at `i`. Origins are pairwise distinct.
use std::collections::HashSet;

use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lattice::LatticeExtent;

/// A point defect carrying a Burgers vector at a plaquette center.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dislocation {
    /// Displacement vector; its sign is the defect's topological charge.
    pub burgers_vector: DVec2,
    /// Plaquette center the defect sits on.
    pub origin: DVec2,
}

impl Dislocation {
    pub fn new(burgers_vector: DVec2, origin: DVec2) -> Self {
        Self {
            burgers_vector,
            origin,
        }
    }

    /// The pair handed to strain-field consumers that do not depend on glam.
    pub fn to_mint(&self) -> (mint::Vector2<f64>, mint::Point2<f64>) {
        (
            mint::Vector2 {
                x: self.burgers_vector.x,
                y: self.burgers_vector.y,
            },
            mint::Point2 {
                x: self.origin.x,
                y: self.origin.y,
            },
        )
    }
}

/// Reason a sequence of dislocations is not a valid ensemble.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantViolation {
    #[error("ensemble is empty")]
    Empty,

    #[error("ensemble length {0} is odd")]
    OddLength(usize),

    #[error("ensemble length {len} exceeds lattice capacity {capacity}")]
    ExceedsCapacity { len: usize, capacity: usize },

    #[error("dislocation {index} at {origin} is not on a plaquette center")]
    OriginOutsideLattice { index: usize, origin: DVec2 },

    #[error("dislocation {index} repeats origin {origin}")]
    DuplicateOrigin { index: usize, origin: DVec2 },

    #[error("dislocation {index} does not cancel its partner {partner}")]
    UnpairedVector { index: usize, partner: usize },
}

/// Ordered, charge-neutral sequence of dislocations.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DislocationEnsemble {
    dislocations: Vec<Dislocation>,
}

impl DislocationEnsemble {
    /// Wraps dislocations after checking every ensemble invariant against `extent`.
    pub fn try_from_vec(
        dislocations: Vec<Dislocation>,
        extent: &LatticeExtent,
    ) -> Result<Self, InvariantViolation> {
        let ensemble = Self { dislocations };
        ensemble.check_invariants(extent)?;
        Ok(ensemble)
    }

    pub(crate) fn from_vec_unchecked(dislocations: Vec<Dislocation>) -> Self {
        debug_assert!(dislocations.len() % 2 == 0);
        Self { dislocations }
    }

    pub fn len(&self) -> usize {
        self.dislocations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dislocations.is_empty()
    }

    /// Number of primary/conjugate pairs.
    pub fn half(&self) -> usize {
        self.dislocations.len() / 2
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Dislocation> {
        self.dislocations.iter()
    }

    pub fn as_slice(&self) -> &[Dislocation] {
        &self.dislocations
    }

    pub fn into_vec(self) -> Vec<Dislocation> {
        self.dislocations
    }

    /// Iterates `(primary, conjugate)` pairs, i.e. elements `i` and `H + i`.
    pub fn pairs(&self) -> impl Iterator<Item = (&Dislocation, &Dislocation)> + '_ {
        let (primary, conjugate) = self.dislocations.split_at(self.half());
        primary.iter().zip(conjugate.iter())
    }

    /// Sum of all Burgers vectors, accumulated pair by pair.
    pub fn net_burgers_vector(&self) -> DVec2 {
        self.pairs()
            .fold(DVec2::ZERO, |acc, (p, c)| {
                acc + (p.burgers_vector + c.burgers_vector)
            })
    }

    pub fn is_charge_neutral(&self) -> bool {
        self.net_burgers_vector() == DVec2::ZERO
    }

    pub fn has_unique_origins(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.dislocations.len());
        self.dislocations
            .iter()
            .all(|d| seen.insert(origin_key(d.origin)))
    }

    /// Verifies length, placement, origin uniqueness and pairwise cancellation.
    pub fn check_invariants(&self, extent: &LatticeExtent) -> Result<(), InvariantViolation> {
        let len = self.dislocations.len();
        if len == 0 {
            return Err(InvariantViolation::Empty);
        }
        if len % 2 == 1 {
            return Err(InvariantViolation::OddLength(len));
        }
        let capacity = extent.capacity();
        if len > capacity {
            return Err(InvariantViolation::ExceedsCapacity { len, capacity });
        }

        let mut seen = HashSet::with_capacity(len);
        for (index, d) in self.dislocations.iter().enumerate() {
            if !extent.contains_origin(d.origin) {
                return Err(InvariantViolation::OriginOutsideLattice {
                    index,
                    origin: d.origin,
                });
            }
            if !seen.insert(origin_key(d.origin)) {
                return Err(InvariantViolation::DuplicateOrigin {
                    index,
                    origin: d.origin,
                });
            }
        }

        let half = self.half();
        for (i, (p, c)) in self.pairs().enumerate() {
            if c.burgers_vector != -p.burgers_vector {
                return Err(InvariantViolation::UnpairedVector {
                    index: half + i,
                    partner: i,
                });
            }
        }

        Ok(())
    }

    /// `(Burgers vector, origin)` pairs in ensemble order for strain-field aggregation.
    pub fn to_mint_pairs(&self) -> Vec<(mint::Vector2<f64>, mint::Point2<f64>)> {
        self.dislocations.iter().map(Dislocation::to_mint).collect()
    }
}

impl<'a> IntoIterator for &'a DislocationEnsemble {
    type Item = &'a Dislocation;
    type IntoIter = std::slice::Iter<'a, Dislocation>;

    fn into_iter(self) -> Self::IntoIter {
        self.dislocations.iter()
    }
}

/// Exact-equality key for an origin.
#[inline]
pub(crate) fn origin_key(origin: DVec2) -> (u64, u64) {
    (origin.x.to_bits(), origin.y.to_bits())
}
