//! RK Particles - a particle fountain for comparing integrators
//!
//! Core modules:
//! - `sim`: Deterministic simulation (particle pool, integrators, mode presets, tick)
//! - `pointer`: Pointer events to spawn requests
//! - `settings`: Data-driven configuration
//! - `error`: Configuration errors

pub mod error;
pub mod pointer;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use pointer::PointerTracker;
pub use settings::{PointSizeStep, Settings};

/// Simulation constants and defaults
pub mod consts {
    /// Uniform gravity (world units/s², negative is down)
    pub const GRAVITY: f32 = -9.8;
    /// Strength of the central attractor (a = C / r²)
    pub const ATTRACTOR_STRENGTH: f32 = 10.0;
    /// Floor on r² so the attractor stays finite at the origin
    pub const MIN_R2: f32 = 1e-4;

    /// Number of particle slots
    pub const POOL_CAPACITY: usize = 500;
    /// TTL removed per tick, independent of the timestep
    pub const AGE_DECREMENT: f64 = 0.1;
    /// Max TTL before any preset is selected
    pub const DEFAULT_MAX_TTL: f64 = 15.0;
    /// Timestep before any preset is selected
    pub const DEFAULT_TIME_STEP: f32 = 0.005;

    /// Host tick period
    pub const TICK_INTERVAL_MS: u64 = 15;
    /// Square viewport edge in pixels
    pub const SCREEN_SIZE: f32 = 1000.0;
    /// Sampling interval used to turn pointer deltas into a velocity
    pub const POINTER_SAMPLE_DT: f32 = 0.005;
    /// Initial point size
    pub const POINT_SIZE: f32 = 5.0;

    /// Horizontal spawn jitter half-width
    pub const JITTER_VX: f32 = 0.75;
    /// Upward spawn jitter range
    pub const JITTER_VY: f32 = 0.75;
}

/// Map a pixel coordinate on a square screen to world space [-1, 1] (y up)
#[inline]
pub fn screen_to_world(x: f32, y: f32, screen_size: f32) -> (f32, f32) {
    (x / screen_size * 2.0 - 1.0, -y / screen_size * 2.0 + 1.0)
}
