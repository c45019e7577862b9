//! Sky computation settings loaded from JSON
//!
//! ```json
//! {
//!   "observer": { "latitude": 40.7, "longitude": -74.0 },
//!   "render_radius": 100.0,
//!   "rise_set": { "horizon_sine": 0.01454, "solver": "iterative" }
//! }
//! ```
//!
//! Everything except `observer` may be omitted.

use crate::almanac::RiseSetConfig;
use crate::observer::Observer;
use crate::{Result, SkyError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default radius of the render sphere
pub const DEFAULT_RENDER_RADIUS: f64 = 100.0;

fn default_render_radius() -> f64 {
    DEFAULT_RENDER_RADIUS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkyConfig {
    pub observer: Observer,
    #[serde(default = "default_render_radius")]
    pub render_radius: f64,
    #[serde(default)]
    pub rise_set: RiseSetConfig,
}

impl SkyConfig {
    pub fn new(observer: Observer) -> Self {
        Self {
            observer,
            render_radius: DEFAULT_RENDER_RADIUS,
            rise_set: RiseSetConfig::default(),
        }
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SkyConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        log::debug!("loaded sky config from {}", path.as_ref().display());
        Self::from_json_str(&contents)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the values serde cannot check on its own
    pub fn validate(&self) -> Result<()> {
        if !(self.render_radius.is_finite() && self.render_radius > 0.0) {
            return Err(SkyError::Config(format!(
                "render_radius must be positive, got {}",
                self.render_radius
            )));
        }
        let k = self.rise_set.horizon_sine;
        if !(k.is_finite() && k.abs() < 1.0) {
            return Err(SkyError::Config(format!(
                "rise_set.horizon_sine must lie in (-1, 1), got {k}"
            )));
        }
        Ok(())
    }
}
