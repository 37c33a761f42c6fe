// ## 📂 File: `src/config.rs`

//! config.rs
//! Decode options.
//!
//! Design notes:
//! - Defaults reproduce the plain decoder exactly; every option is opt-in
//!   hardening or observability.
//! - Options load from JSON with missing keys falling back to defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("malformed decode options: {0}")]
    Json(String),
    #[error("max_outer_iterations must be greater than zero")]
    ZeroIterationLimit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Compare the block's required length with the buffer before reading.
    pub preflight_bounds: bool,
    /// Record counters and stage timers into a `TelemetrySnapshot`.
    pub collect_telemetry: bool,
    /// Refuse headers that would run more outer iterations than this.
    pub max_outer_iterations: Option<u64>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            preflight_bounds: false,
            collect_telemetry: true,
            max_outer_iterations: None,
        }
    }
}

impl DecodeOptions {
    /// Options for untrusted input: preflight on, bounded iterations.
    pub fn strict(max_outer_iterations: u64) -> Self {
        Self {
            preflight_bounds: true,
            collect_telemetry: true,
            max_outer_iterations: Some(max_outer_iterations),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let opts: DecodeOptions = serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_outer_iterations == Some(0) {
            return Err(ConfigError::ZeroIterationLimit);
        }
        Ok(())
    }
}
