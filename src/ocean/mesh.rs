//! Lattice mesh that carries spectral ocean heights to the GPU.

use bytemuck::{Pod, Zeroable};

use super::system::SpectralOcean;
use crate::error::{Error, Result};

/// Vertex data for ocean mesh (homogeneous position + UV coordinates)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 4],
    pub uv: [f32; 2],
}

/// Coordinate of lattice line `index` on a patch centered at the origin
pub fn lattice_offset(index: usize, lattice_size: usize, length_m: f64) -> f64 {
    index as f64 * length_m / lattice_size as f64 - length_m / 2.0
}

/// Ocean patch mesh: (N+1)² vertices on the XZ plane
pub struct OceanGrid {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    lattice_size: usize,
}

impl OceanGrid {
    /// Create a flat grid covering `length_m` × `length_m`
    pub fn new(lattice_size: usize, length_m: f64) -> Self {
        let mut vertices = Vec::with_capacity((lattice_size + 1).pow(2));
        let mut indices = Vec::with_capacity(lattice_size.pow(2) * 6);

        // Generate flat XZ plane grid
        for z in 0..=lattice_size {
            for x in 0..=lattice_size {
                vertices.push(Vertex {
                    position: [
                        lattice_offset(x, lattice_size, length_m) as f32,
                        0.0,
                        lattice_offset(z, lattice_size, length_m) as f32,
                        1.0,
                    ],
                    uv: [
                        x as f32 / lattice_size as f32,
                        z as f32 / lattice_size as f32,
                    ],
                });
            }
        }

        // Generate triangle indices (counter-clockwise winding)
        for z in 0..lattice_size {
            for x in 0..lattice_size {
                let top_left = (z * (lattice_size + 1) + x) as u32;
                let top_right = top_left + 1;
                let bottom_left = ((z + 1) * (lattice_size + 1) + x) as u32;
                let bottom_right = bottom_left + 1;

                indices.extend_from_slice(&[
                    top_left,
                    bottom_left,
                    top_right,
                    top_right,
                    bottom_left,
                    bottom_right,
                ]);
            }
        }

        Self {
            vertices,
            indices,
            lattice_size,
        }
    }

    /// Build a grid matching an ocean's lattice and patch size
    pub fn for_ocean(ocean: &SpectralOcean) -> Self {
        Self::new(ocean.lattice_size(), ocean.params().length_m)
    }

    /// Copy the ocean's current height field into the vertex y components
    pub fn apply_heights(&mut self, ocean: &SpectralOcean) -> Result<()> {
        if ocean.lattice_size() != self.lattice_size {
            return Err(Error::LatticeMismatch {
                mesh: self.lattice_size,
                ocean: ocean.lattice_size(),
            });
        }

        for (vertex, height) in self.vertices.iter_mut().zip(ocean.heights()) {
            vertex.position[1] = *height as f32;
        }
        Ok(())
    }

    /// Raw vertex bytes for buffer upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn lattice_size(&self) -> usize {
        self.lattice_size
    }
}
