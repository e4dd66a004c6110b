//! Spectral ocean parameters.

use glam::DVec2;

use crate::error::{Error, Result};

/// Gravitational acceleration at the sea surface (m/s²)
pub const GRAVITY_M_PER_S2: f64 = 9.81;

/// Repeat period of the quantized dispersion relation (seconds)
///
/// Every wave frequency is a multiple of 2π / this, so the surface loops
/// without a seam after one period.
pub const DISPERSION_PERIOD_S: f64 = 200.0;

/// Fraction of the wind length scale below which waves are suppressed
pub const PHILLIPS_DAMPING: f64 = 0.001;

/// Ocean patch parameters
#[derive(Debug, Clone, PartialEq)]
pub struct OceanParams {
    /// Lattice cells per side (N). Power of two keeps the FFT fast.
    pub lattice_size: usize,

    /// Phillips spectrum scaling constant (A, dimensionless)
    /// Demo value: 0.00005
    pub amplitude: f64,

    /// Wind velocity (m/s); direction aligns waves, magnitude sets the
    /// largest wave length scale |w|²/g
    /// Demo value: (0, 32)
    pub wind: DVec2,

    /// Side length of the periodic patch (meters)
    /// Demo value: 64
    pub length_m: f64,

    /// Seed for the Gaussian amplitude draws
    pub seed: u64,
}

impl Default for OceanParams {
    fn default() -> Self {
        Self {
            lattice_size: 64,
            amplitude: 0.00005,
            wind: DVec2::new(0.0, 32.0),
            length_m: 64.0,
            seed: 42,
        }
    }
}

impl OceanParams {
    /// Reject lattice sizes and lengths that cannot describe a patch
    pub fn validate(&self) -> Result<()> {
        if self.lattice_size == 0 {
            return Err(Error::InvalidLatticeSize(self.lattice_size));
        }
        if !self.length_m.is_finite() || self.length_m <= 0.0 {
            return Err(Error::InvalidDomainLength(self.length_m));
        }
        Ok(())
    }

    /// Lattice vertices per side, including the tiling row/column
    pub fn vertices_per_side(&self) -> usize {
        self.lattice_size + 1
    }
}
