//! Cell lattice parameters for the shallow-wave initial conditions.

use glam::DVec2;

use crate::error::{Error, Result};

/// Square cell lattice laid over a rectangle of the XZ plane
#[derive(Debug, Clone, PartialEq)]
pub struct CellGridParams {
    /// Cells per side; the ocean feeding Phillips presets must match it
    /// Demo value: 128
    pub size: usize,

    /// Position of cell (0, 0) (meters)
    /// Demo value: (-20, -20)
    pub min: DVec2,

    /// Position of cell (size-1, size-1) (meters)
    /// Demo value: (20, 20)
    pub max: DVec2,

    /// Physical side length the lattice stands for (meters)
    /// Demo value: 64
    pub physical_size_m: f64,
}

impl Default for CellGridParams {
    fn default() -> Self {
        Self {
            size: 128,
            min: DVec2::new(-20.0, -20.0),
            max: DVec2::new(20.0, 20.0),
            physical_size_m: 64.0,
        }
    }
}

impl CellGridParams {
    /// Need two cells per side to span `min..=max` and an ordered, finite rectangle
    pub fn validate(&self) -> Result<()> {
        if self.size < 2 {
            return Err(Error::InvalidLatticeSize(self.size));
        }
        if !self.min.is_finite() || !self.max.is_finite() || self.min.cmpge(self.max).any() {
            return Err(Error::InvalidDomainBounds {
                min: self.min,
                max: self.max,
            });
        }
        if !self.physical_size_m.is_finite() || self.physical_size_m <= 0.0 {
            return Err(Error::InvalidDomainLength(self.physical_size_m));
        }
        Ok(())
    }

    /// Distance between neighbouring cell centers along x and z
    pub fn step(&self) -> DVec2 {
        (self.max - self.min) / (self.size as f64 - 1.0)
    }

    /// Physical lattice spacing (meters per cell)
    pub fn lambda_m(&self) -> f64 {
        self.physical_size_m / self.size as f64
    }

    /// Extent of the rectangle along x and z
    pub fn extent(&self) -> DVec2 {
        self.max - self.min
    }
}
