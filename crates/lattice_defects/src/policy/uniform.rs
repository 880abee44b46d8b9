//! Uniform placement: any palette vector at any plaquette center, independently.
use glam::DVec2;
use rand::distr::{Distribution, Uniform};
use rand::RngCore;

use crate::burgers::BurgersPalette;
use crate::error::{Error, Result};
use crate::lattice::LatticeExtent;
use crate::policy::PlacementPolicy;

/// Draws palette vectors and cell-center origins uniformly and statelessly.
#[derive(Debug, Clone)]
pub struct UniformBurgersVector {
    extent: LatticeExtent,
    palette: BurgersPalette,
    palette_index: Uniform<usize>,
    cell_x: Uniform<u32>,
    cell_y: Uniform<u32>,
}

impl UniformBurgersVector {
    pub fn new(extent: LatticeExtent, palette: BurgersPalette) -> Result<Self> {
        let palette_index = Uniform::new(0, palette.len())
            .map_err(|e| Error::InvalidConfig(format!("burgers vector palette: {e}")))?;
        let cell_x = Uniform::new_inclusive(1, extent.lx())
            .map_err(|e| Error::InvalidConfig(format!("lx: {e}")))?;
        let cell_y = Uniform::new_inclusive(1, extent.ly())
            .map_err(|e| Error::InvalidConfig(format!("ly: {e}")))?;
        Ok(Self {
            extent,
            palette,
            palette_index,
            cell_x,
            cell_y,
        })
    }

    /// Uniform placement with the tetragonal palette.
    pub fn tetragonal(extent: LatticeExtent) -> Result<Self> {
        Self::new(extent, BurgersPalette::tetragonal())
    }

    pub fn extent(&self) -> LatticeExtent {
        self.extent
    }

    pub fn palette(&self) -> &BurgersPalette {
        &self.palette
    }
}

impl PlacementPolicy for UniformBurgersVector {
    fn system_size(&self) -> usize {
        self.extent.capacity()
    }

    fn draw_vector(&self, rng: &mut dyn RngCore) -> DVec2 {
        let index = self.palette_index.sample(rng);
        self.palette.as_slice()[index]
    }

    fn draw_origin(&self, rng: &mut dyn RngCore) -> DVec2 {
        let u = self.cell_x.sample(rng);
        let v = self.cell_y.sample(rng);
        LatticeExtent::cell_center(u, v)
    }
}
