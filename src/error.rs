//! Error types for configuration loading.
//!
//! The simulation core itself has no failure paths; only the settings
//! surface can fail.

use std::fmt;

/// Errors from loading or validating `Settings`.
#[derive(Debug)]
pub enum SimError {
    /// Failed to read the settings file.
    Io(std::io::Error),
    /// Settings file is not valid JSON for `Settings`.
    Parse(serde_json::Error),
    /// A setting is out of range.
    InvalidSetting { field: &'static str, reason: String },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Io(e) => write!(f, "Failed to read settings: {}", e),
            SimError::Parse(e) => write!(f, "Failed to parse settings: {}", e),
            SimError::InvalidSetting { field, reason } => {
                write!(f, "Invalid setting `{}`: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Io(e) => Some(e),
            SimError::Parse(e) => Some(e),
            SimError::InvalidSetting { .. } => None,
        }
    }
}

impl From<std::io::Error> for SimError {
    fn from(e: std::io::Error) -> Self {
        SimError::Io(e)
    }
}

impl From<serde_json::Error> for SimError {
    fn from(e: serde_json::Error) -> Self {
        SimError::Parse(e)
    }
}
