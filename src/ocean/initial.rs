//! Initial water column for the shallow-wave cell lattice.
//!
//! Each cell gets a position `(x, h, z, 1)` and two mass-flow vectors
//! derived from its height. The height comes from Gaussian bumps, the
//! spectral ocean, or both summed.

use glam::DVec2;
use log::debug;

use super::system::SpectralOcean;
use crate::error::{Error, Result};
use crate::params::CellGridParams;

/// Peak height of one Gaussian bump (meters)
pub const BUMP_AMPLITUDE: f64 = 4.0;

/// Falloff of a bump in units of the lattice width
const BUMP_SHARPNESS: f64 = 50.0;

/// Initial flow is this fraction of the cell height
const FLOW_PER_HEIGHT: f64 = 0.2;

/// Ocean time sampled by the spectral presets (seconds)
pub const PRESET_TIME_S: f64 = 1.0 / 30.0;

/// Times the seeded wave repeats across the surface
pub const WAVE_NUMBER: f32 = 1.0;

/// How cell heights are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialPreset {
    /// Four bumps centered a quarter extent from the middle on each diagonal
    Gaussian,
    /// Spectral ocean heights at [`PRESET_TIME_S`]
    Phillips,
    /// Bumps on top of the spectral ocean
    GaussianAndPhillips,
}

/// Upload-ready initial conditions, one entry per cell (z outer, x inner)
#[derive(Debug, Clone)]
pub struct InitialState {
    positions: Vec<[f32; 4]>,
    mass_flow0: Vec<[f32; 4]>,
    mass_flow1: Vec<[f32; 4]>,
    heights: Vec<f64>,
    size: usize,
    lambda_m: f64,
}

impl InitialState {
    /// Build `preset`; `ocean` is only evaluated by the spectral presets
    pub fn from_preset(
        grid: &CellGridParams,
        preset: InitialPreset,
        ocean: &mut SpectralOcean,
    ) -> Result<Self> {
        match preset {
            InitialPreset::Gaussian => Self::gaussian(grid),
            InitialPreset::Phillips => Self::phillips(grid, ocean),
            InitialPreset::GaussianAndPhillips => Self::gaussian_and_phillips(grid, ocean),
        }
    }

    pub fn gaussian(grid: &CellGridParams) -> Result<Self> {
        grid.validate()?;
        let extent = grid.extent();
        Ok(Self::from_heights(grid, |_, _, pos| bumps(pos, extent)))
    }

    pub fn phillips(grid: &CellGridParams, ocean: &mut SpectralOcean) -> Result<Self> {
        grid.validate()?;
        sample_ocean(grid, ocean)?;
        Ok(Self::from_heights(grid, |x, z, _| ocean.height(x, z)))
    }

    pub fn gaussian_and_phillips(grid: &CellGridParams, ocean: &mut SpectralOcean) -> Result<Self> {
        grid.validate()?;
        sample_ocean(grid, ocean)?;
        let extent = grid.extent();
        Ok(Self::from_heights(grid, |x, z, pos| {
            bumps(pos, extent) + ocean.height(x, z)
        }))
    }

    fn from_heights<F>(grid: &CellGridParams, mut height_at: F) -> Self
    where
        F: FnMut(usize, usize, DVec2) -> f64,
    {
        let cells = grid.size * grid.size;
        let mut state = Self {
            positions: Vec::with_capacity(cells),
            mass_flow0: Vec::with_capacity(cells),
            mass_flow1: Vec::with_capacity(cells),
            heights: Vec::with_capacity(cells),
            size: grid.size,
            lambda_m: grid.lambda_m(),
        };

        let step = grid.step();
        for z in 0..grid.size {
            for x in 0..grid.size {
                let pos = grid.min + step * DVec2::new(x as f64, z as f64);
                let height = height_at(x, z, pos);
                let flow = (height * FLOW_PER_HEIGHT) as f32;

                state.heights.push(height);
                state
                    .positions
                    .push([pos.x as f32, height as f32, pos.y as f32, 1.0]);
                state.mass_flow0.push([flow; 4]);
                state.mass_flow1.push([flow, WAVE_NUMBER, 0.0, 0.0]);
            }
        }

        debug!(
            "Initial state: {}x{} cells, lambda {} m",
            state.size, state.size, state.lambda_m
        );
        state
    }

    /// `(x, h, z, 1)` per cell
    pub fn positions(&self) -> &[[f32; 4]] {
        &self.positions
    }

    /// `(f, f, f, f)` per cell with `f = h / 5`
    pub fn mass_flow0(&self) -> &[[f32; 4]] {
        &self.mass_flow0
    }

    /// `(f, wave number, 0, 0)` per cell
    pub fn mass_flow1(&self) -> &[[f32; 4]] {
        &self.mass_flow1
    }

    /// Heights with stride `size`
    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    pub fn height(&self, x: usize, z: usize) -> f64 {
        self.heights[z * self.size + x]
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Physical lattice spacing (meters per cell)
    pub fn lambda_m(&self) -> f64 {
        self.lambda_m
    }
}

/// Sum of the four bumps at `pos`
fn bumps(pos: DVec2, extent: DVec2) -> f64 {
    let quarter = 0.25 * extent;
    let centers = [
        -quarter,
        quarter,
        DVec2::new(-quarter.x, quarter.y),
        DVec2::new(quarter.x, -quarter.y),
    ];

    centers
        .iter()
        .map(|center| {
            let length = (pos - *center).length() / extent.x;
            BUMP_AMPLITUDE * (-BUMP_SHARPNESS * length * length).exp()
        })
        .sum()
}

/// Evaluate the ocean at the preset time after checking it covers the grid
fn sample_ocean(grid: &CellGridParams, ocean: &mut SpectralOcean) -> Result<()> {
    if ocean.lattice_size() != grid.size {
        return Err(Error::LatticeMismatch {
            mesh: grid.size,
            ocean: ocean.lattice_size(),
        });
    }
    ocean.evaluate_waves_fft(PRESET_TIME_S);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::OceanParams;

    fn small_grid() -> CellGridParams {
        // Unit step, so bump centers land on cells 1 and 3
        CellGridParams {
            size: 5,
            min: DVec2::new(-2.0, -2.0),
            max: DVec2::new(2.0, 2.0),
            physical_size_m: 5.0,
        }
    }

    fn ocean(lattice_size: usize) -> SpectralOcean {
        SpectralOcean::new(&OceanParams {
            lattice_size,
            ..OceanParams::default()
        })
        .unwrap()
    }

    #[test]
    fn test_bump_peaks_on_quarter_diagonals() {
        let state = InitialState::gaussian(&small_grid()).unwrap();
        assert_eq!(state.size(), 5);
        assert_eq!(state.heights().len(), 25);

        for (x, z) in [(1, 1), (3, 1), (1, 3), (3, 3)] {
            let peak = state.height(x, z);
            assert!((peak - BUMP_AMPLITUDE).abs() < 1e-3, "peak {} at ({}, {})", peak, x, z);
            for (nx, nz) in [(x - 1, z), (x + 1, z), (x, z - 1), (x, z + 1)] {
                assert!(state.height(nx, nz) < peak);
            }
        }
        assert!(state.height(2, 2) < 0.1);
        assert!((state.height(0, 1) - state.height(4, 3)).abs() < 1e-12);
    }

    #[test]
    fn test_flow_is_fifth_of_height() {
        let state = InitialState::gaussian(&small_grid()).unwrap();
        for ((position, flow0), flow1) in state
            .positions()
            .iter()
            .zip(state.mass_flow0())
            .zip(state.mass_flow1())
        {
            let flow = position[1] / 5.0;
            assert!((flow0[0] - flow).abs() <= 1e-6 * flow.abs().max(1e-6));
            assert!(flow0.iter().all(|f| *f == flow0[0]));
            assert_eq!(*flow1, [flow0[0], WAVE_NUMBER, 0.0, 0.0]);
            assert_eq!(position[3], 1.0);
        }
    }

    #[test]
    fn test_positions_span_grid() {
        let state = InitialState::gaussian(&small_grid()).unwrap();
        let positions = state.positions();
        assert_eq!(positions[0][0], -2.0);
        assert_eq!(positions[0][2], -2.0);
        assert_eq!(positions[24][0], 2.0);
        assert_eq!(positions[24][2], 2.0);
        assert_eq!(positions[7][0], 0.0);
        assert_eq!(positions[7][2], -1.0);
        assert_eq!(state.lambda_m(), 1.0);
    }

    #[test]
    fn test_phillips_reads_ocean_heights() {
        let grid = CellGridParams {
            size: 8,
            ..CellGridParams::default()
        };
        let mut source = ocean(8);
        let state = InitialState::phillips(&grid, &mut source).unwrap();

        let mut reference = ocean(8);
        reference.evaluate_waves_fft(PRESET_TIME_S);
        for z in 0..8 {
            for x in 0..8 {
                assert_eq!(state.height(x, z), reference.height(x, z));
            }
        }
    }

    #[test]
    fn test_combined_preset_sums_both() {
        let grid = CellGridParams {
            size: 8,
            ..CellGridParams::default()
        };
        let mut sea = ocean(8);
        let gaussian = InitialState::gaussian(&grid).unwrap();
        let phillips = InitialState::phillips(&grid, &mut sea).unwrap();
        let combined = InitialState::from_preset(&grid, InitialPreset::GaussianAndPhillips, &mut sea)
            .unwrap();

        for ((g, p), c) in gaussian
            .heights()
            .iter()
            .zip(phillips.heights())
            .zip(combined.heights())
        {
            assert!((g + p - c).abs() < 1e-12);
        }
    }

    #[test]
    fn test_spectral_presets_need_matching_ocean() {
        let mut sea = ocean(16);
        let result = InitialState::phillips(&CellGridParams::default(), &mut sea);
        assert!(matches!(
            result,
            Err(Error::LatticeMismatch {
                mesh: 128,
                ocean: 16
            })
        ));

        // The Gaussian preset never touches the ocean
        assert!(
            InitialState::from_preset(&CellGridParams::default(), InitialPreset::Gaussian, &mut sea)
                .is_ok()
        );
    }
}
