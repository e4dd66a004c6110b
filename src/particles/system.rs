//! Particle system orbiting a point singularity.

use std::f64::consts::PI;

use glam::DVec3;
use log::{debug, warn};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use rayon::prelude::*;

use super::integrator::{integrate, State};
use crate::error::Result;
use crate::params::ParticleParams;

/// One body and the state it is relaunched from
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub state: State,
    pub initial: State,
}

impl Particle {
    fn new(initial: State) -> Self {
        Self {
            state: initial,
            initial,
        }
    }

    fn step(&mut self, dt: f64, m1: f64, m2: f64, boundary_radius: f64) -> StepReport {
        match integrate(self.state, 0.0, dt, m1, m2) {
            Ok(next)
                if !next.position.is_finite() || next.position.length() > boundary_radius =>
            {
                self.state = self.initial;
                StepReport::escaped()
            }
            Ok(next) => {
                self.state = next;
                StepReport::advanced()
            }
            Err(_) => {
                self.state = self.initial;
                StepReport::singular()
            }
        }
    }
}

/// Counts from one [`ParticleSystem::update`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Bodies that took a normal step
    pub advanced: usize,
    /// Bodies relaunched after leaving the boundary sphere
    pub escaped: usize,
    /// Bodies relaunched after landing on the singularity
    pub singular: usize,
}

impl StepReport {
    fn advanced() -> Self {
        Self {
            advanced: 1,
            ..Self::default()
        }
    }

    fn escaped() -> Self {
        Self {
            escaped: 1,
            ..Self::default()
        }
    }

    fn singular() -> Self {
        Self {
            singular: 1,
            ..Self::default()
        }
    }

    /// Sum two reports
    pub fn merge(self, other: Self) -> Self {
        Self {
            advanced: self.advanced + other.advanced,
            escaped: self.escaped + other.escaped,
            singular: self.singular + other.singular,
        }
    }

    /// Bodies relaunched for any reason
    pub fn resets(&self) -> usize {
        self.escaped + self.singular
    }
}

/// Bodies falling toward a singularity at the origin
pub struct ParticleSystem {
    particles: Vec<Particle>,
    params: ParticleParams,
}

impl ParticleSystem {
    /// Launch `params.count` bodies from `(launch_offset, 0, 0)` in random directions
    pub fn new(params: &ParticleParams) -> Result<Self> {
        params.validate()?;

        let mut rng = SmallRng::seed_from_u64(params.seed);
        let position = DVec3::new(params.launch_offset_m, 0.0, 0.0);
        let particles = (0..params.count)
            .map(|_| {
                let velocity = random_direction(&mut rng) * params.launch_speed;
                Particle::new(State::new(position, velocity))
            })
            .collect();

        debug!(
            "Launched {} particles at {} m/s, seed {}",
            params.count, params.launch_speed, params.seed
        );

        Ok(Self {
            particles,
            params: params.clone(),
        })
    }

    /// Use caller-supplied launch states; `params.count` is ignored
    pub fn from_states(params: &ParticleParams, states: Vec<State>) -> Result<Self> {
        params.validate()?;
        let particles = states.into_iter().map(Particle::new).collect::<Vec<_>>();
        Ok(Self {
            params: ParticleParams {
                count: particles.len(),
                ..params.clone()
            },
            particles,
        })
    }

    /// Advance every body one time step, relaunching escaped or singular ones
    pub fn update(&mut self) -> StepReport {
        let dt = self.params.time_step_s;
        let m1 = self.params.singularity_mass;
        let m2 = self.params.particle_mass;
        let boundary_radius = self.params.boundary_radius_m;

        let report = self
            .particles
            .par_iter_mut()
            .map(|particle| particle.step(dt, m1, m2, boundary_radius))
            .reduce(StepReport::default, StepReport::merge);

        if report.singular > 0 {
            warn!(
                "{} particle(s) hit the singularity and were relaunched",
                report.singular
            );
        }
        report
    }

    /// Put every body back at its launch state
    pub fn reset(&mut self) {
        for particle in &mut self.particles {
            particle.state = particle.initial;
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn positions(&self) -> impl Iterator<Item = DVec3> + '_ {
        self.particles.iter().map(|p| p.state.position)
    }

    /// Positions as (x, y, z, 1) for vertex upload
    pub fn position_data(&self) -> Vec<[f32; 4]> {
        self.positions()
            .map(|p| [p.x as f32, p.y as f32, p.z as f32, 1.0])
            .collect()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn singularity_mass(&self) -> f64 {
        self.params.singularity_mass
    }

    pub fn set_singularity_mass(&mut self, mass: f64) -> Result<()> {
        let params = ParticleParams {
            singularity_mass: mass,
            ..self.params.clone()
        };
        params.validate()?;
        debug!("Singularity mass set to {} kg", mass);
        self.params = params;
        Ok(())
    }

    pub fn particle_mass(&self) -> f64 {
        self.params.particle_mass
    }

    pub fn set_particle_mass(&mut self, mass: f64) -> Result<()> {
        let params = ParticleParams {
            particle_mass: mass,
            ..self.params.clone()
        };
        params.validate()?;
        debug!("Particle mass set to {} kg", mass);
        self.params = params;
        Ok(())
    }

    pub fn params(&self) -> &ParticleParams {
        &self.params
    }
}

/// Unit vector from two uniform angles
fn random_direction<R: Rng>(rng: &mut R) -> DVec3 {
    let theta: f64 = rng.gen_range(0.0..2.0 * PI);
    let phi: f64 = rng.gen_range(0.0..2.0 * PI);

    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_phi, cos_phi) = phi.sin_cos();
    DVec3::new(cos_phi * sin_theta, sin_phi * sin_theta, cos_theta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn params(count: usize) -> ParticleParams {
        ParticleParams {
            count,
            ..ParticleParams::default()
        }
    }

    #[test]
    fn test_launch_states() {
        let system = ParticleSystem::new(&params(500)).unwrap();
        assert_eq!(system.len(), 500);

        for particle in system.particles() {
            assert_eq!(particle.state, particle.initial);
            assert_eq!(particle.state.position, DVec3::new(0.1, 0.0, 0.0));
            assert!((particle.state.velocity.length() - 3.51).abs() < 1e-12);
        }
    }

    #[test]
    fn test_same_seed_same_launch() {
        let a = ParticleSystem::new(&params(64)).unwrap();
        let b = ParticleSystem::new(&params(64)).unwrap();
        assert_eq!(a.particles(), b.particles());

        let c = ParticleSystem::new(&ParticleParams {
            seed: 7,
            ..params(64)
        })
        .unwrap();
        assert_ne!(a.particles(), c.particles());
    }

    #[test]
    fn test_update_advances_particles() {
        let mut system = ParticleSystem::new(&params(32)).unwrap();
        let report = system.update();

        assert_eq!(report.advanced + report.resets(), 32);
        assert!(system
            .particles()
            .iter()
            .any(|p| p.state.position != p.initial.position));
    }

    #[test]
    fn test_escaped_particle_is_relaunched() {
        let launch = State::new(DVec3::new(99.9, 0.0, 0.0), DVec3::new(100.0, 0.0, 0.0));
        let mut system = ParticleSystem::from_states(&params(0), vec![launch]).unwrap();

        let report = system.update();
        assert_eq!(report.escaped, 1);
        assert_eq!(system.particles()[0].state, launch);
    }

    #[test]
    fn test_singular_particle_is_skipped() {
        let stuck = State::new(DVec3::ZERO, DVec3::ZERO);
        let fine = State::new(DVec3::new(1.0, 0.0, 0.0), DVec3::new(0.0, 0.7, 0.0));
        let mut system = ParticleSystem::from_states(&params(0), vec![stuck, fine]).unwrap();

        let report = system.update();
        assert_eq!(report.singular, 1);
        assert_eq!(report.advanced, 1);
        assert_ne!(system.particles()[1].state, fine);
    }

    #[test]
    fn test_reset_restores_launch() {
        let mut system = ParticleSystem::new(&params(16)).unwrap();
        for _ in 0..10 {
            system.update();
        }
        system.reset();
        assert!(system.particles().iter().all(|p| p.state == p.initial));
    }

    #[test]
    fn test_mass_setters_validate() {
        let mut system = ParticleSystem::new(&params(4)).unwrap();
        assert!(system.set_singularity_mass(1e10).is_ok());
        assert_eq!(system.singularity_mass(), 1e10);
        assert!(system.set_singularity_mass(0.0).is_err());
        assert_eq!(system.singularity_mass(), 1e10);

        assert!(system.set_particle_mass(2e5).is_ok());
        assert_eq!(system.particle_mass(), 2e5);
        assert!(system.set_particle_mass(f64::NAN).is_err());
        assert!(matches!(
            system.set_particle_mass(-1.0),
            Err(Error::InvalidParticleParams(_))
        ));
        assert_eq!(system.particle_mass(), 2e5);
    }

    #[test]
    fn test_near_origin_particle_is_relaunched() {
        let launch = State::new(DVec3::new(1e-155, 0.0, 0.0), DVec3::ZERO);
        let mut system = ParticleSystem::from_states(&params(0), vec![launch]).unwrap();

        let report = system.update();
        assert_eq!(report.singular, 1);
        assert!(system.particles()[0].state.position.is_finite());
    }

    #[test]
    fn test_position_data() {
        let system = ParticleSystem::new(&params(3)).unwrap();
        let data = system.position_data();
        assert_eq!(data.len(), 3);
        assert!(data.iter().all(|p| *p == [0.1f32, 0.0, 0.0, 1.0]));
    }
}
