//! Particle system parameters (singularity demo).

use crate::error::{Error, Result};

/// Particle system parameters
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleParams {
    /// Number of bodies
    pub count: usize,

    /// Attractor mass at the origin (kg)
    /// Demo value: 9.5e9
    pub singularity_mass: f64,

    /// Mass of each body (kg)
    /// Demo value: 1e5
    pub particle_mass: f64,

    /// Fixed integration step (seconds)
    /// Demo value: 0.01
    pub time_step_s: f64,

    /// Bodies farther than this from the origin are relaunched (meters)
    /// Demo value: 100
    pub boundary_radius_m: f64,

    /// Launch speed, identical for every body (m/s)
    /// Demo value: 3.51
    pub launch_speed: f64,

    /// Launch distance along +x from the attractor (meters)
    /// Demo value: 0.1
    pub launch_offset_m: f64,

    /// Seed for launch directions
    pub seed: u64,
}

impl Default for ParticleParams {
    fn default() -> Self {
        Self {
            count: 10_000,
            singularity_mass: 9.5e9,
            particle_mass: 1e5,
            time_step_s: 0.01,
            boundary_radius_m: 100.0,
            launch_speed: 3.51,
            launch_offset_m: 0.1,
            seed: 42,
        }
    }
}

impl ParticleParams {
    /// Validate configuration (masses and distances positive, etc.)
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("singularity_mass", self.singularity_mass),
            ("particle_mass", self.particle_mass),
            ("time_step_s", self.time_step_s),
            ("boundary_radius_m", self.boundary_radius_m),
            ("launch_offset_m", self.launch_offset_m),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidParticleParams(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )));
            }
        }
        if !self.launch_speed.is_finite() || self.launch_speed < 0.0 {
            return Err(Error::InvalidParticleParams(format!(
                "launch_speed must be non-negative, got {}",
                self.launch_speed
            )));
        }
        if self.launch_offset_m >= self.boundary_radius_m {
            return Err(Error::InvalidParticleParams(format!(
                "launch offset {} m lies outside boundary radius {} m",
                self.launch_offset_m, self.boundary_radius_m
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ParticleParams::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_offset() {
        // Bodies launched at the origin would hit the singular acceleration
        let params = ParticleParams {
            launch_offset_m: 0.0,
            ..ParticleParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(Error::InvalidParticleParams(_))
        ));
    }

    #[test]
    fn test_rejects_negative_mass() {
        let params = ParticleParams {
            particle_mass: -1.0,
            ..ParticleParams::default()
        };
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("particle_mass"));
    }

    #[test]
    fn test_rejects_launch_outside_boundary() {
        let params = ParticleParams {
            launch_offset_m: 200.0,
            ..ParticleParams::default()
        };
        assert!(params.validate().is_err());
    }
}
