//! Phillips spectrum and deep-water dispersion over the wave-vector lattice.
//!
//! See Tessendorf, "Simulating Ocean Water", equations 33-35 and 40-42.

use std::f64::consts::PI;

use glam::DVec2;
use rand::Rng;
use rustfft::num_complex::Complex;

use crate::params::{OceanParams, DISPERSION_PERIOD_S, GRAVITY_M_PER_S2, PHILLIPS_DAMPING};

/// Wave vectors below this magnitude carry no energy
const MIN_WAVE_NUMBER: f64 = 1e-6;

/// Spectral model of one periodic ocean patch
#[derive(Debug, Clone)]
pub struct Spectrum {
    lattice_size: usize,
    amplitude: f64,
    wind: DVec2,
    length_m: f64,
}

impl Spectrum {
    pub fn new(params: &OceanParams) -> Self {
        Self {
            lattice_size: params.lattice_size,
            amplitude: params.amplitude,
            wind: params.wind,
            length_m: params.length_m,
        }
    }

    /// Wave vector k for lattice point (n, m); zero at (N/2, N/2)
    pub fn wave_vector(&self, n: usize, m: usize) -> DVec2 {
        let size = self.lattice_size as f64;
        DVec2::new(
            PI * (2.0 * n as f64 - size) / self.length_m,
            PI * (2.0 * m as f64 - size) / self.length_m,
        )
    }

    /// Quantized deep-water angular frequency (rad/s)
    pub fn dispersion(&self, n: usize, m: usize) -> f64 {
        let w_0 = 2.0 * PI / DISPERSION_PERIOD_S;
        let k_length = self.wave_vector(n, m).length();
        let l = self.length_m;

        let omega = (GRAVITY_M_PER_S2 * k_length * (1.0 + k_length * k_length * l * l)).sqrt();

        // Snap to a multiple of w_0 so the surface repeats every period
        (omega / w_0).floor() * w_0
    }

    /// Phillips spectral density with small-wave suppression
    ///
    /// Zero wind has no direction, so the cosine factor (and the result)
    /// is NaN for every non-zero wave vector.
    pub fn phillips(&self, n: usize, m: usize) -> f64 {
        let k = self.wave_vector(n, m);
        let k_length = k.length();
        if k_length < MIN_WAVE_NUMBER {
            return 0.0;
        }

        let w_length = self.wind.length();
        let k_length2 = k_length * k_length;
        let k_length4 = k_length2 * k_length2;

        // Waves travelling perpendicular to the wind vanish
        let k_dot_w = k.dot(self.wind) / (k_length * w_length);
        let k_dot_w2 = k_dot_w * k_dot_w;

        let wave_scale = w_length * w_length / GRAVITY_M_PER_S2;
        let wave_scale2 = wave_scale * wave_scale;
        let l2 = wave_scale2 * PHILLIPS_DAMPING * PHILLIPS_DAMPING;

        self.amplitude * ((-1.0 / (k_length2 * wave_scale2)).exp() / k_length4)
            * k_dot_w2
            * (-k_length2 * l2).exp()
    }

    /// Initial amplitude ĥ₀ from one complex Gaussian draw
    pub fn amplitude_from_draw(&self, n: usize, m: usize, draw: Complex<f64>) -> Complex<f64> {
        draw * (self.phillips(n, m) / 2.0).sqrt()
    }

    pub fn lattice_size(&self) -> usize {
        self.lattice_size
    }
}

/// Two independent standard normals packed as a complex number
///
/// Marsaglia polar method: rejection-sample the unit disc, then scale.
pub fn gaussian_complex<R: Rng>(rng: &mut R) -> Complex<f64> {
    loop {
        let x1: f64 = rng.gen_range(-1.0..1.0);
        let x2: f64 = rng.gen_range(-1.0..1.0);
        let w = x1 * x1 + x2 * x2;
        if w > 0.0 && w < 1.0 {
            let scale = (-2.0 * w.ln() / w).sqrt();
            return Complex::new(x1 * scale, x2 * scale);
        }
    }
}
