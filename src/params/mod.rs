//! Parameter definitions with physical units and documented semantics.
//!
//! Constants from the singularity and wave demos are collected here with:
//! - Physical units (meters, seconds, kilograms)
//! - Documented ranges and meanings
//! - Validation before any buffer is allocated

mod grid;
mod ocean;
mod particles;

// Re-export all types
pub use grid::CellGridParams;
pub use ocean::{OceanParams, DISPERSION_PERIOD_S, GRAVITY_M_PER_S2, PHILLIPS_DAMPING};
pub use particles::ParticleParams;
