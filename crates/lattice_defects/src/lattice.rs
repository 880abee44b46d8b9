//! Rectangular lattice extents measured in unit plaquettes.
//!
//! Dislocations sit at plaquette centers. With the one-based cell convention used
//! throughout the crate, the cell `(u, v)` with `u` in `[1, lx]` and `v` in `[1, ly]`
//! has its center at `(u + 0.5, v + 0.5)`.
use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Size of a rectangular lattice in plaquettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LatticeExtent {
    lx: u32,
    ly: u32,
}

impl LatticeExtent {
    /// Creates an extent, rejecting empty axes.
    pub fn new(lx: u32, ly: u32) -> Result<Self> {
        if lx == 0 {
            return Err(Error::InvalidConfig("lx must be > 0".into()));
        }
        if ly == 0 {
            return Err(Error::InvalidConfig("ly must be > 0".into()));
        }
        Ok(Self { lx, ly })
    }

    /// Creates a square extent `l x l`.
    pub fn square(l: u32) -> Result<Self> {
        Self::new(l, l)
    }

    pub fn lx(&self) -> u32 {
        self.lx
    }

    pub fn ly(&self) -> u32 {
        self.ly
    }

    /// Number of plaquettes, which bounds the number of defects an ensemble can hold.
    pub fn capacity(&self) -> usize {
        self.lx as usize * self.ly as usize
    }

    /// Returns the plaquette whose center is exactly `origin`, if any.
    pub fn cell_of(&self, origin: DVec2) -> Option<(u32, u32)> {
        let u = origin.x - 0.5;
        let v = origin.y - 0.5;
        if u.fract() != 0.0 || v.fract() != 0.0 {
            return None;
        }
        if u < 1.0 || v < 1.0 || u > self.lx as f64 || v > self.ly as f64 {
            return None;
        }
        Some((u as u32, v as u32))
    }

    /// Whether `origin` is the center of one of this lattice's plaquettes.
    pub fn contains_origin(&self, origin: DVec2) -> bool {
        self.cell_of(origin).is_some()
    }

    /// Center of plaquette `(u, v)`.
    #[inline]
    pub fn cell_center(u: u32, v: u32) -> DVec2 {
        DVec2::new(0.5 + u as f64, 0.5 + v as f64)
    }
}
