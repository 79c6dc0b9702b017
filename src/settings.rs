//! Simulation settings
//!
//! Loaded from a JSON file; every field is optional and falls back to the
//! defaults in `consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;
use crate::sim::Forces;

/// Point size adjustment (rendering only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointSizeStep {
    Grow,
    Shrink,
}

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Number of particle slots
    pub pool_capacity: usize,
    /// Jitter seed; None picks a fresh one per run
    pub seed: Option<u64>,
    /// Square viewport edge in pixels
    pub screen_size: f32,
    /// Host tick period
    pub tick_interval_ms: u64,
    /// Rendered point size
    pub point_size: f32,
    /// Force constants
    pub forces: Forces,
    /// TTL removed per tick
    pub age_decrement: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pool_capacity: POOL_CAPACITY,
            seed: None,
            screen_size: SCREEN_SIZE,
            tick_interval_ms: TICK_INTERVAL_MS,
            point_size: POINT_SIZE,
            forces: Forces::default(),
            age_decrement: AGE_DECREMENT,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a settings file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        fn invalid(field: &'static str, reason: &str) -> Result<(), SimError> {
            Err(SimError::InvalidSetting {
                field,
                reason: reason.to_string(),
            })
        }

        if self.pool_capacity == 0 {
            return invalid("pool_capacity", "must be at least 1");
        }
        if !(self.screen_size.is_finite() && self.screen_size > 0.0) {
            return invalid("screen_size", "must be a positive number");
        }
        if self.tick_interval_ms == 0 {
            return invalid("tick_interval_ms", "must be at least 1");
        }
        if !(self.point_size.is_finite() && self.point_size >= 1.0) {
            return invalid("point_size", "must be at least 1");
        }
        if !self.forces.gravity.is_finite() {
            return invalid("forces.gravity", "must be finite");
        }
        if !(self.forces.attractor_strength.is_finite() && self.forces.attractor_strength >= 0.0) {
            return invalid("forces.attractor_strength", "must be finite and non-negative");
        }
        if !(self.forces.min_r2.is_finite() && self.forces.min_r2 > 0.0) {
            return invalid("forces.min_r2", "must be a positive number");
        }
        if !(self.age_decrement.is_finite() && self.age_decrement > 0.0) {
            return invalid("age_decrement", "must be a positive number");
        }
        Ok(())
    }

    /// Grow or shrink the point size. Returns the new size if it changed.
    pub fn adjust_point_size(&mut self, step: PointSizeStep) -> Option<f32> {
        match step {
            PointSizeStep::Grow => {
                self.point_size += 1.0;
                log::info!("Point size increased to {}", self.point_size);
            }
            PointSizeStep::Shrink if self.point_size > 1.0 => {
                self.point_size -= 1.0;
                log::info!("Point size decreased to {}", self.point_size);
            }
            PointSizeStep::Shrink => return None,
        }
        Some(self.point_size)
    }
}
