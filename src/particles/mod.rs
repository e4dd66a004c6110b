//! Point masses integrated with RK4 around a fixed attractor.

mod integrator;
mod system;

// Re-export public types
pub use integrator::{
    acceleration, gravity, integrate, rk4_step, Derivative, State, GRAVITATIONAL_CONSTANT,
};
pub use system::{Particle, ParticleSystem, StepReport};
