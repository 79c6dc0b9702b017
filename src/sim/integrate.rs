//! Step functions for the two force models
//!
//! Each function advances one live particle by `dt`. The RK4 variants are
//! closed-form blends for these specific forces, not general ODE solvers:
//! velocity is sampled at the start and end of the step and the midpoint
//! samples are their average.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::mode::{Integrator, Model};
use super::pool::ParticlePool;
use super::state::Particle;
use crate::consts::{ATTRACTOR_STRENGTH, GRAVITY, MIN_R2};

/// Force constants shared by all step functions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Forces {
    /// Vertical acceleration of the gravity model
    pub gravity: f32,
    /// `C` in `a = C / r²`
    pub attractor_strength: f32,
    /// Floor on r² near the attractor
    pub min_r2: f32,
}

impl Default for Forces {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            attractor_strength: ATTRACTOR_STRENGTH,
            min_r2: MIN_R2,
        }
    }
}

impl Forces {
    /// Magnitude of the central pull at `pos`
    ///
    /// r² is floored at `min_r2`, so a particle at the origin gets a large but
    /// finite pull instead of an infinite one.
    #[inline]
    pub fn attractor_accel(&self, pos: Vec3) -> f32 {
        self.attractor_strength / pos.length_squared().max(self.min_r2)
    }
}

/// Signature shared by the four step functions
pub type StepFn = fn(&mut Particle, f32, &Forces);

/// The four runnable (model, integrator) pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scheme {
    GravityEuler,
    GravityRk4,
    AttractorEuler,
    AttractorRk4,
}

impl Scheme {
    pub const ALL: [Scheme; 4] = [
        Scheme::GravityEuler,
        Scheme::GravityRk4,
        Scheme::AttractorEuler,
        Scheme::AttractorRk4,
    ];

    /// Scheme for a model/integrator pair; frozen has none
    pub fn new(model: Model, integrator: Integrator) -> Option<Self> {
        match (model, integrator) {
            (Model::Frozen, _) => None,
            (Model::Gravity, Integrator::Euler) => Some(Scheme::GravityEuler),
            (Model::Gravity, Integrator::Rk4) => Some(Scheme::GravityRk4),
            (Model::Attractor, Integrator::Euler) => Some(Scheme::AttractorEuler),
            (Model::Attractor, Integrator::Rk4) => Some(Scheme::AttractorRk4),
        }
    }

    pub fn model(&self) -> Model {
        match self {
            Scheme::GravityEuler | Scheme::GravityRk4 => Model::Gravity,
            Scheme::AttractorEuler | Scheme::AttractorRk4 => Model::Attractor,
        }
    }

    pub fn integrator(&self) -> Integrator {
        match self {
            Scheme::GravityEuler | Scheme::AttractorEuler => Integrator::Euler,
            Scheme::GravityRk4 | Scheme::AttractorRk4 => Integrator::Rk4,
        }
    }

    pub fn step_fn(&self) -> StepFn {
        match self {
            Scheme::GravityEuler => gravity_euler,
            Scheme::GravityRk4 => gravity_rk4,
            Scheme::AttractorEuler => attractor_euler,
            Scheme::AttractorRk4 => attractor_rk4,
        }
    }
}

/// Advance every live particle in the pool by one step
pub fn integrate(pool: &mut ParticlePool, scheme: Scheme, dt: f32, forces: &Forces) {
    let step = scheme.step_fn();
    for particle in pool.live_mut() {
        step(particle, dt, forces);
    }
}

/// Semi-implicit Euler under uniform gravity
pub fn gravity_euler(p: &mut Particle, dt: f32, forces: &Forces) {
    p.vel.y += forces.gravity * dt;
    p.pos.y += p.vel.y * dt;
    p.pos.x += p.vel.x * dt;
}

/// Gravity with the velocity averaged over the step (trapezoidal position)
pub fn gravity_rk4(p: &mut Particle, dt: f32, forces: &Forces) {
    let k1 = p.vel.y;
    let k4 = k1 + forces.gravity * dt;
    let k2 = (k1 + k4) / 2.0;
    let k3 = k2;

    p.vel.y = k4;
    p.pos.y += dt * (k1 + 2.0 * k2 + 2.0 * k3 + k4) / 6.0;
    p.pos.x += p.vel.x * dt;
}

/// Semi-implicit Euler toward the attractor at the origin
///
/// Stores the pull in `acceleration` so a later switch to RK4 has a seed.
pub fn attractor_euler(p: &mut Particle, dt: f32, forces: &Forces) {
    let a = forces.attractor_accel(p.pos);
    p.acceleration = a;

    p.vel.x += -p.pos.x * a * dt;
    p.vel.y += -p.pos.y * a * dt;
    p.pos.y += p.vel.y * dt;
    p.pos.x += p.vel.x * dt;
}

/// RK4 blend toward the attractor
///
/// `k1` is the pull stored at the end of the previous tick, `k4` the pull at
/// the current position. Each axis only reads its own coordinate.
pub fn attractor_rk4(p: &mut Particle, dt: f32, forces: &Forces) {
    let k1 = p.acceleration;
    let k4 = forces.attractor_accel(p.pos);
    let k2 = (k1 + k4) / 2.0;
    let k3 = k2;
    p.acceleration = k4;

    let pull = (k1 + 2.0 * k2 + 2.0 * k3 + k4) / 6.0;
    blend_axis(&mut p.pos.y, &mut p.vel.y, pull, dt);
    blend_axis(&mut p.pos.x, &mut p.vel.x, pull, dt);
}

#[inline]
fn blend_axis(pos: &mut f32, vel: &mut f32, pull: f32, dt: f32) {
    let v1 = *vel;
    let v4 = *vel - *pos * pull * dt;
    let v2 = (v1 + v4) / 2.0;
    let v3 = v2;

    *vel = v4;
    *pos += dt * (v1 + 2.0 * v2 + 2.0 * v3 + v4) / 6.0;
}
