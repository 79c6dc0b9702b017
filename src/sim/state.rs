//! Particle types and the simulation aggregate
//!
//! `Simulation` bundles everything one running session owns. The pure pieces
//! (`ParticlePool`, `Mode`, `tick`) stay usable on their own.

use std::num::NonZeroUsize;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::integrate::Forces;
use super::mode::{Integrator, Mode, ModeCommand, ModeController};
use super::pool::{ParticlePool, Snapshot};
use super::tick::{SpawnJitter, TickInput, tick};
use crate::consts::*;
use crate::error::SimError;
use crate::settings::Settings;

/// A single pool slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub exists: bool,
    pub pos: Vec3,
    /// Planar velocity; z velocity is always zero
    pub vel: Vec2,
    /// Central pull magnitude at the end of the previous tick
    pub acceleration: f32,
    /// Remaining lifetime
    pub ttl: f64,
}

impl Particle {
    /// An empty slot
    pub fn dormant(max_ttl: f64) -> Self {
        Self {
            exists: false,
            pos: Vec3::ZERO,
            vel: Vec2::ZERO,
            acceleration: 0.0,
            ttl: max_ttl,
        }
    }

    /// Bring the slot to life at `pos` (z = 0) with a full lifetime
    pub fn revive(&mut self, pos: Vec2, vel: Vec2, max_ttl: f64) {
        self.exists = true;
        self.pos = pos.extend(0.0);
        self.vel = vel;
        self.acceleration = 0.0;
        self.ttl = max_ttl;
    }

    /// Retire the slot
    pub fn expire(&mut self, max_ttl: f64) {
        self.exists = false;
        self.ttl = max_ttl;
        self.acceleration = 0.0;
    }
}

/// Read-only render view of a live particle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParticleView {
    pub pos: Vec3,
    /// Remaining lifetime fraction in (0, 1], drives fade-out
    pub ttl_ratio: f32,
    /// Integrator active when the snapshot was taken (selects the hue)
    pub integrator: Integrator,
}

/// One running session: pool, mode, forces and spawn jitter
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Seed of the jitter stream
    pub seed: u64,
    /// Ticks advanced so far (frozen ticks included)
    pub time_ticks: u64,
    pool: ParticlePool,
    controller: ModeController,
    forces: Forces,
    age_decrement: f64,
    jitter: SpawnJitter,
}

impl Simulation {
    /// Default session with the given jitter seed
    pub fn new(seed: u64) -> Self {
        let controller = ModeController::default();
        let capacity = NonZeroUsize::new(POOL_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        Self {
            seed,
            time_ticks: 0,
            pool: ParticlePool::new(capacity, controller.mode().max_ttl),
            controller,
            forces: Forces::default(),
            age_decrement: AGE_DECREMENT,
            jitter: SpawnJitter::new(seed),
        }
    }

    /// Build a session from validated settings
    pub fn from_settings(settings: &Settings) -> Result<Self, SimError> {
        settings.validate()?;
        let capacity = NonZeroUsize::new(settings.pool_capacity).ok_or(SimError::InvalidSetting {
            field: "pool_capacity",
            reason: "must be at least 1".to_string(),
        })?;
        let seed = settings.seed.unwrap_or_else(rand::random);
        let controller = ModeController::default();

        log::info!(
            "Simulation: {} slots, seed {}, g={}, C={}",
            capacity,
            seed,
            settings.forces.gravity,
            settings.forces.attractor_strength
        );

        Ok(Self {
            seed,
            time_ticks: 0,
            pool: ParticlePool::new(capacity, controller.mode().max_ttl),
            controller,
            forces: settings.forces,
            age_decrement: settings.age_decrement,
            jitter: SpawnJitter::new(seed),
        })
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn mode(&self) -> &Mode {
        self.controller.mode()
    }

    pub fn forces(&self) -> &Forces {
        &self.forces
    }

    /// Apply a command between ticks. Returns the label if it was accepted.
    pub fn command(&mut self, command: ModeCommand) -> Option<&'static str> {
        self.controller.apply(command, &mut self.pool)
    }

    /// Advance by one tick: command first, then spawn, integrate and age
    pub fn advance(&mut self, input: &TickInput) -> Option<&'static str> {
        let label = input.command.and_then(|c| self.command(c));

        let spawn = input.spawn.map(|req| self.jitter.apply(req));
        let mode = *self.controller.mode();
        tick(&mut self.pool, &mode, &self.forces, self.age_decrement, spawn);
        self.time_ticks += 1;

        label
    }

    /// Live particles for rendering
    pub fn snapshot(&self) -> Snapshot<'_> {
        self.pool.snapshot(self.controller.mode().integrator)
    }
}
