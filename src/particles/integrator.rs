//! Fixed-step fourth-order Runge-Kutta integration of a point mass
//! falling toward an attractor at the origin.

use glam::DVec3;

use crate::error::{Error, Result};

/// Newtonian gravitational constant (N·m²/kg²)
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67e-11;

/// Position and velocity of one body
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct State {
    pub position: DVec3,
    pub velocity: DVec3,
}

impl State {
    pub fn new(position: DVec3, velocity: DVec3) -> Self {
        Self { position, velocity }
    }

    /// Euler-advance by `derivative` over `dt`
    fn advanced(&self, derivative: &Derivative, dt: f64) -> Self {
        Self {
            position: self.position + derivative.dx * dt,
            velocity: self.velocity + derivative.dv * dt,
        }
    }
}

/// Time derivative of a [`State`]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Derivative {
    pub dx: DVec3,
    pub dv: DVec3,
}

/// Magnitude of the attraction between masses `m1` and `m2` (kg) at `r` meters
pub fn gravity(m1: f64, m2: f64, r: f64) -> f64 {
    GRAVITATIONAL_CONSTANT * m1 * m2 / (r * r)
}

/// Acceleration of a body of mass `m2` at `position`, pulled by `m1` at the origin
///
/// Fails with [`Error::SingularAcceleration`] when the position has no
/// finite direction (the origin, or a non-finite vector) or is so close to
/// the origin that the pull overflows.
pub fn acceleration(position: DVec3, m1: f64, m2: f64) -> Result<DVec3> {
    let direction = position
        .try_normalize()
        .ok_or(Error::SingularAcceleration)?;

    // F = ma => a = F/m
    let force = -direction * gravity(m1, m2, position.length());
    let accel = force / m2;
    if !accel.is_finite() {
        return Err(Error::SingularAcceleration);
    }
    Ok(accel)
}

/// One classic RK4 step of `state` from `t` to `t + dt`
///
/// `f` evaluates the derivative at a trial state and time; its first error
/// aborts the step.
pub fn rk4_step<F>(state: State, t: f64, dt: f64, mut f: F) -> Result<State>
where
    F: FnMut(&State, f64) -> Result<Derivative>,
{
    let half_dt = dt * 0.5;

    let k1 = f(&state, t)?;
    let k2 = f(&state.advanced(&k1, half_dt), t + half_dt)?;
    let k3 = f(&state.advanced(&k2, half_dt), t + half_dt)?;
    let k4 = f(&state.advanced(&k3, dt), t + dt)?;

    let dxdt = (k1.dx + 2.0 * (k2.dx + k3.dx) + k4.dx) / 6.0;
    let dvdt = (k1.dv + 2.0 * (k2.dv + k3.dv) + k4.dv) / 6.0;

    Ok(State {
        position: state.position + dxdt * dt,
        velocity: state.velocity + dvdt * dt,
    })
}

/// Advance one body by `dt` seconds under the attractor `m1` (body mass `m2`)
pub fn integrate(state: State, t: f64, dt: f64, m1: f64, m2: f64) -> Result<State> {
    rk4_step(state, t, dt, |s, _t| {
        Ok(Derivative {
            dx: s.velocity,
            dv: acceleration(s.position, m1, m2)?,
        })
    })
}
