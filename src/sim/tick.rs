//! Per-frame simulation tick
//!
//! One tick is: optional spawn, one integration pass with the active mode,
//! then aging. The host owns the clock and calls `tick` on its own schedule.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::integrate::{Forces, integrate};
use super::mode::{Mode, ModeCommand};
use super::pool::ParticlePool;
use crate::consts::{JITTER_VX, JITTER_VY};

/// Request to spawn one particle (world coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpawnRequest {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
}

impl SpawnRequest {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.vx, self.vy)
    }
}

/// Inputs collected between two ticks
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Spawn while the pointer is held
    pub spawn: Option<SpawnRequest>,
    /// Mode switch, applied before the tick runs
    pub command: Option<ModeCommand>,
}

/// Seeded velocity jitter for spawned particles
#[derive(Debug, Clone)]
pub struct SpawnJitter {
    rng: Pcg32,
}

impl SpawnJitter {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Randomize the velocity; vertical jitter only ever pushes upward
    pub fn apply(&mut self, request: SpawnRequest) -> SpawnRequest {
        SpawnRequest {
            vx: request.vx + self.rng.random_range(-JITTER_VX..=JITTER_VX),
            vy: request.vy + self.rng.random_range(0.0..=JITTER_VY),
            ..request
        }
    }
}

/// Advance the pool by one tick under `mode`
pub fn tick(
    pool: &mut ParticlePool,
    mode: &Mode,
    forces: &Forces,
    age_decrement: f64,
    spawn: Option<SpawnRequest>,
) {
    if let Some(request) = spawn {
        pool.spawn(request.position(), request.velocity());
    }

    // Frozen: no motion, no aging
    let Some(scheme) = mode.scheme() else {
        return;
    };

    integrate(pool, scheme, mode.time_step, forces);
    pool.age(age_decrement);
}
