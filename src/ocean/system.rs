//! Spectral ocean: cached Phillips amplitudes evolved in time and
//! transformed into a tileable height field.

use std::sync::Arc;

use log::{debug, warn};
use rand::{rngs::SmallRng, SeedableRng};
use rustfft::{num_complex::Complex, Fft, FftPlanner};

use super::mesh::lattice_offset;
use super::spectrum::{gaussian_complex, Spectrum};
use crate::error::Result;
use crate::params::OceanParams;

/// Ocean height field generator over an N×N periodic lattice
///
/// Owns every buffer it needs: the amplitude cache, the FFT work buffers
/// and the (N+1)×(N+1) height field. Nothing is reallocated after
/// construction.
pub struct SpectralOcean {
    params: OceanParams,
    spectrum: Spectrum,
    /// ĥ₀ per lattice point, row-major (m outer, n inner)
    h_tilde0: Vec<Complex<f64>>,
    /// Frequency-domain input, transformed in place
    fft_buffer: Vec<Complex<f64>>,
    /// Column pass works on the transpose
    transposed: Vec<Complex<f64>>,
    fft_scratch: Vec<Complex<f64>>,
    fft: Arc<dyn Fft<f64>>,
    /// Vertex heights with stride N+1
    heights: Vec<f64>,
}

impl SpectralOcean {
    /// Validate parameters, allocate buffers, plan the FFT and draw amplitudes
    pub fn new(params: &OceanParams) -> Result<Self> {
        params.validate()?;

        let size = params.lattice_size;
        if !size.is_power_of_two() {
            warn!(
                "Lattice size {} is not a power of two; FFT will use a slower path",
                size
            );
        }

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let fft_scratch = vec![Complex::default(); fft.get_inplace_scratch_len()];

        let mut ocean = Self {
            params: params.clone(),
            spectrum: Spectrum::new(params),
            h_tilde0: Vec::with_capacity(size * size),
            fft_buffer: vec![Complex::default(); size * size],
            transposed: vec![Complex::default(); size * size],
            fft_scratch,
            fft,
            heights: vec![0.0; params.vertices_per_side().pow(2)],
        };
        ocean.draw_amplitudes(params.seed);

        debug!(
            "Ocean lattice {}x{} over {} m, wind ({}, {}) m/s, seed {}",
            size, size, params.length_m, params.wind.x, params.wind.y, params.seed
        );

        Ok(ocean)
    }

    /// Redraw every ĥ₀ from a new seed
    ///
    /// The height field keeps its old contents until the next evaluation.
    pub fn reseed(&mut self, seed: u64) {
        self.params.seed = seed;
        self.draw_amplitudes(seed);
        debug!("Ocean reseeded with {}", seed);
    }

    fn draw_amplitudes(&mut self, seed: u64) {
        let size = self.lattice_size();
        let mut rng = SmallRng::seed_from_u64(seed);

        self.h_tilde0.clear();
        for m in 0..size {
            for n in 0..size {
                let draw = gaussian_complex(&mut rng);
                self.h_tilde0
                    .push(self.spectrum.amplitude_from_draw(n, m, draw));
            }
        }
    }

    /// Quantized angular frequency at lattice point (n, m)
    pub fn dispersion(&self, n: usize, m: usize) -> f64 {
        self.spectrum.dispersion(n, m)
    }

    /// Phillips spectral density at lattice point (n, m)
    pub fn phillips(&self, n: usize, m: usize) -> f64 {
        self.spectrum.phillips(n, m)
    }

    /// Cached initial amplitude ĥ₀(n, m), or `None` outside `[0, N)²`
    pub fn h_tilde0(&self, n: usize, m: usize) -> Option<Complex<f64>> {
        let size = self.lattice_size();
        if n >= size || m >= size {
            return None;
        }
        Some(self.cached_h_tilde0(n, m))
    }

    fn cached_h_tilde0(&self, n: usize, m: usize) -> Complex<f64> {
        self.h_tilde0[m * self.lattice_size() + n]
    }

    /// Amplitude at time `t` (seconds)
    ///
    /// ĥ(k, t) = ĥ₀(k)·e^{iωt} + conj(ĥ₀(−k))·e^{−iωt}, with −k read from
    /// the cached draw at the lattice point mirrored through the center.
    pub fn h_tilde(&self, t: f64, n: usize, m: usize) -> Complex<f64> {
        let h_tilde0 = self.cached_h_tilde0(n, m);
        let h_tilde0_mk_conj = self.cached_h_tilde0(self.mirror(n), self.mirror(m)).conj();

        let omega_t = self.dispersion(n, m) * t;
        let (sin_omega_t, cos_omega_t) = omega_t.sin_cos();

        let c0 = Complex::new(cos_omega_t, sin_omega_t);
        let c1 = Complex::new(cos_omega_t, -sin_omega_t);

        h_tilde0 * c0 + h_tilde0_mk_conj * c1
    }

    /// Lattice index of −k, i.e. −i mod N
    fn mirror(&self, index: usize) -> usize {
        let size = self.lattice_size();
        (size - index) % size
    }

    /// Refresh the height field for time `t` (seconds)
    ///
    /// O(N² log N); callers choose how often to pay for it.
    pub fn evaluate_waves_fft(&mut self, t: f64) {
        let size = self.lattice_size();

        for m in 0..size {
            for n in 0..size {
                // Checkerboard sign centers the zero frequency
                let sign = if (n + m) & 1 == 0 { 1.0 } else { -1.0 };
                let value = self.h_tilde(t, n, m) * sign;
                self.fft_buffer[m * size + n] = value;
            }
        }

        self.fft_2d();
        self.write_heights();

        debug!("Evaluated {}x{} ocean at t = {:.4} s", size, size, t);
    }

    /// Forward 2D FFT of `fft_buffer` in place: rows, then columns
    fn fft_2d(&mut self) {
        let size = self.lattice_size();

        self.fft
            .process_with_scratch(&mut self.fft_buffer, &mut self.fft_scratch);
        transpose(&self.fft_buffer, &mut self.transposed, size);
        self.fft
            .process_with_scratch(&mut self.transposed, &mut self.fft_scratch);
        transpose(&self.transposed, &mut self.fft_buffer, size);
    }

    fn write_heights(&mut self) {
        let size = self.lattice_size();
        let stride = size + 1;

        for m in 0..size {
            for n in 0..size {
                self.heights[m * stride + n] = self.fft_buffer[m * size + n].re;
            }
            // Column N repeats column 0
            self.heights[m * stride + size] = self.heights[m * stride];
        }

        // Row N repeats row 0, corner included
        let (body, last_row) = self.heights.split_at_mut(size * stride);
        last_row.copy_from_slice(&body[..stride]);
    }

    /// Height field, (N+1)² values with stride N+1
    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    /// Height at vertex (n, m), both in `[0, N]`
    pub fn height(&self, n: usize, m: usize) -> f64 {
        self.heights[m * (self.lattice_size() + 1) + n]
    }

    /// Vertex positions (x, height, z, 1) centered on the origin
    pub fn vertices(&self) -> Vec<[f32; 4]> {
        let size = self.lattice_size();
        let length = self.params.length_m;
        let mut vertices = Vec::with_capacity(self.heights.len());

        for m in 0..=size {
            for n in 0..=size {
                vertices.push([
                    lattice_offset(n, size, length) as f32,
                    self.height(n, m) as f32,
                    lattice_offset(m, size, length) as f32,
                    1.0,
                ]);
            }
        }
        vertices
    }

    pub fn lattice_size(&self) -> usize {
        self.params.lattice_size
    }

    pub fn params(&self) -> &OceanParams {
        &self.params
    }
}

/// Square transpose, `src` and `dst` both `size * size`
fn transpose(src: &[Complex<f64>], dst: &mut [Complex<f64>], size: usize) {
    for row in 0..size {
        for col in 0..size {
            dst[col * size + row] = src[row * size + col];
        }
    }
}
