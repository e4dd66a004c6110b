//! Heightmap export as 16-bit grayscale PNG.

use std::path::Path;

use image::{ImageBuffer, Luma};
use log::info;

use crate::error::{Error, Result};
use crate::ocean::{InitialState, SpectralOcean};

pub type Heightmap = ImageBuffer<Luma<u16>, Vec<u16>>;

/// Map a square height field onto the full 16-bit range
///
/// Lowest height becomes 0 and highest 65535. A flat field maps to 0.
/// NaN or infinite heights are reported rather than clamped.
pub fn heightmap_image(heights: &[f64], side: usize) -> Result<Heightmap> {
    if heights.len() != side * side {
        return Err(Error::HeightmapSize {
            expected: side * side,
            actual: heights.len(),
        });
    }
    if let Some(index) = heights.iter().position(|h| !h.is_finite()) {
        return Err(Error::NonFiniteHeight(index));
    }

    let (min, max) = heights
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), h| {
            (lo.min(*h), hi.max(*h))
        });
    let range = max - min;

    let pixels = heights
        .iter()
        .map(|h| {
            if range > 0.0 {
                ((h - min) / range * u16::MAX as f64).round() as u16
            } else {
                0
            }
        })
        .collect();

    ImageBuffer::from_raw(side as u32, side as u32, pixels).ok_or(Error::HeightmapSize {
        expected: side * side,
        actual: heights.len(),
    })
}

/// Write the ocean's current height field to `path`
pub fn save_heightmap(ocean: &SpectralOcean, path: impl AsRef<Path>) -> Result<()> {
    save_heights(ocean.heights(), ocean.lattice_size() + 1, path.as_ref())
}

/// Write the cell heights of an initial state to `path`
pub fn save_initial_heightmap(state: &InitialState, path: impl AsRef<Path>) -> Result<()> {
    save_heights(state.heights(), state.size(), path.as_ref())
}

fn save_heights(heights: &[f64], side: usize, path: &Path) -> Result<()> {
    let image = heightmap_image(heights, side)?;
    image.save(path)?;
    info!("Wrote {}x{} heightmap to {}", side, side, path.display());
    Ok(())
}
