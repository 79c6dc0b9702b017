//! Deterministic simulation module
//!
//! All particle logic lives here. This module must be pure and deterministic:
//! - Timestep comes from the active mode, never from a wall clock
//! - Seeded RNG only
//! - Stable iteration order (by pool slot)
//! - No rendering or platform dependencies

pub mod integrate;
pub mod mode;
pub mod pool;
pub mod state;
pub mod tick;

pub use integrate::{
    Forces, Scheme, StepFn, attractor_euler, attractor_rk4, gravity_euler, gravity_rk4,
    integrate,
};
pub use mode::{Integrator, Mode, ModeCommand, ModeController, Model, Preset};
pub use pool::{ParticlePool, Snapshot, SnapshotIter};
pub use state::{Particle, ParticleView, Simulation};
pub use tick::{SpawnJitter, SpawnRequest, TickInput, tick};
