//! Build Configuration
//!
//! Tuning constants for placement snapping, validation tolerances and
//! structural support matching. `Default` returns the stock values; a JSON
//! file may override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::building::SupportTolerance;
use crate::world::GridConfig;

/// Central configuration for the building core.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Foundation grid cell size; also the footprint width of every part (meters)
    pub grid_size: f32,
    /// Maximum distance from the aim point to a snap point (meters)
    pub snap_distance: f32,
    /// Allowed interpenetration between part bounds on any axis (meters)
    pub overlap_epsilon: f32,
    /// Minimum height of a part center above the water plane (meters)
    pub water_clearance: f32,
    /// Maximum height difference across a foundation's corners (meters)
    pub max_ground_variance: f32,
    /// Horizontal slack when matching a part to a support snap point (meters)
    pub support_horizontal_tolerance: f32,
    /// Vertical slack when matching a part to a support snap point (meters)
    pub support_vertical_tolerance: f32,
    /// Yaw slack for side-by-side (adjacent) support (radians)
    pub adjacent_yaw_tolerance: f32,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            grid_size: 4.0,
            snap_distance: 3.0,
            overlap_epsilon: 0.1,
            water_clearance: 0.05,
            max_ground_variance: 1.0,
            support_horizontal_tolerance: 0.5,
            support_vertical_tolerance: 0.2,
            adjacent_yaw_tolerance: 0.05,
        }
    }
}

/// Why a configuration could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} = {value} is out of range")]
    OutOfRange { field: &'static str, value: f32 },
}

impl BuildConfig {
    /// Parse a (possibly partial) JSON configuration and check its ranges.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Every value must be finite and non-negative; the grid must be wider
    /// than zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("grid_size", self.grid_size),
            ("snap_distance", self.snap_distance),
            ("overlap_epsilon", self.overlap_epsilon),
            ("water_clearance", self.water_clearance),
            ("max_ground_variance", self.max_ground_variance),
            ("support_horizontal_tolerance", self.support_horizontal_tolerance),
            ("support_vertical_tolerance", self.support_vertical_tolerance),
            ("adjacent_yaw_tolerance", self.adjacent_yaw_tolerance),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 || (field == "grid_size" && value <= 0.0) {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        Ok(())
    }

    /// Load configuration from `path`, falling back to defaults when the file
    /// is missing or malformed.
    pub fn load_or_default(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                log::warn!("[Config] {} unreadable ({}), using defaults", path.display(), err);
                return Self::default();
            }
        };
        match Self::from_json_str(&text) {
            Ok(config) => {
                log::info!("[Config] Loaded build config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("[Config] {} is not valid ({}), using defaults", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn grid(&self) -> GridConfig {
        GridConfig::new(self.grid_size)
    }

    pub fn support_tolerance(&self) -> SupportTolerance {
        SupportTolerance {
            horizontal: self.support_horizontal_tolerance,
            vertical: self.support_vertical_tolerance,
            adjacent_yaw: self.adjacent_yaw_tolerance,
        }
    }
}
