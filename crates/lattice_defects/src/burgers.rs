//! Burgers-vector palettes: the finite sets of displacement vectors a defect may carry.
use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Ordered, non-empty set of allowed Burgers vectors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<DVec2>", into = "Vec<DVec2>")
)]
pub struct BurgersPalette {
    vectors: Vec<DVec2>,
}

impl Default for BurgersPalette {
    fn default() -> Self {
        Self::tetragonal()
    }
}

impl BurgersPalette {
    /// Creates a palette from explicit vectors.
    ///
    /// The palette must be non-empty and every component finite.
    pub fn new(vectors: Vec<DVec2>) -> Result<Self> {
        if vectors.is_empty() {
            return Err(Error::InvalidConfig(
                "burgers vector palette must not be empty".into(),
            ));
        }
        if let Some(bad) = vectors.iter().find(|v| !v.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "burgers vector {bad} is not finite"
            )));
        }
        Ok(Self { vectors })
    }

    /// The four axis-aligned unit vectors of a tetragonal lattice: `+x, +y, -x, -y`.
    pub fn tetragonal() -> Self {
        Self {
            vectors: vec![DVec2::X, DVec2::Y, DVec2::NEG_X, DVec2::NEG_Y],
        }
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Always false for a constructed palette; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<DVec2> {
        self.vectors.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.vectors.iter().copied()
    }

    pub fn as_slice(&self) -> &[DVec2] {
        &self.vectors
    }

    /// Whether `-b` is in the palette for every `b` in it.
    pub fn is_closed_under_negation(&self) -> bool {
        self.vectors.iter().all(|b| self.vectors.contains(&-*b))
    }
}

impl TryFrom<Vec<DVec2>> for BurgersPalette {
    type Error = Error;

    fn try_from(vectors: Vec<DVec2>) -> Result<Self> {
        Self::new(vectors)
    }
}

impl From<BurgersPalette> for Vec<DVec2> {
    fn from(palette: BurgersPalette) -> Self {
        palette.vectors
    }
}
