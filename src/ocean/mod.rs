//! Ocean surface synthesis from the Phillips spectrum via inverse FFT.

mod initial;
mod mesh;
mod spectrum;
mod system;

// Re-export public types
pub use initial::{InitialPreset, InitialState, BUMP_AMPLITUDE, PRESET_TIME_S, WAVE_NUMBER};
pub use mesh::{lattice_offset, OceanGrid, Vertex};
pub use spectrum::{gaussian_complex, Spectrum};
pub use system::SpectralOcean;
