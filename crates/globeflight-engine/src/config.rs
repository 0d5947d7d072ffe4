//! Engine configuration.
//!
//! Every field has a default from `globeflight_core::constants`, so a config
//! file only needs to name what it changes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use globeflight_core::constants::*;
use globeflight_core::types::Viewport;
use globeflight_core::LocationId;

/// Why an engine could not be built.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} = {value} is out of range ({expected})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },
    #[error("no rendering surface configured")]
    MissingSurface,
    #[error("no arrival hook configured")]
    MissingArrivalHook,
    #[error("default location {0} has no geometry")]
    DefaultLocationUnresolvable(LocationId),
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tuning for one engine instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub viewport: Viewport,
    pub morph_duration_secs: f64,
    pub flight_duration_secs: f64,
    pub heading_freeze_progress: f64,
    pub heading_min_screen_distance: f64,
    pub initial_heading_min_screen_distance: f64,
    pub flat_scale_divisor: f64,
    pub globe_scale_divisor: f64,
    pub flat_clip_angle: f64,
    pub globe_clip_angle: f64,
    pub marker_glyph_offset_deg: f64,
    /// Start point used when the last location has no geometry.
    pub default_location: LocationId,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            morph_duration_secs: MORPH_DURATION_SECS,
            flight_duration_secs: FLIGHT_DURATION_SECS,
            heading_freeze_progress: HEADING_FREEZE_PROGRESS,
            heading_min_screen_distance: HEADING_MIN_SCREEN_DISTANCE,
            initial_heading_min_screen_distance: INITIAL_HEADING_MIN_SCREEN_DISTANCE,
            flat_scale_divisor: FLAT_SCALE_DIVISOR,
            globe_scale_divisor: GLOBE_SCALE_DIVISOR,
            flat_clip_angle: FLAT_CLIP_ANGLE,
            globe_clip_angle: GLOBE_CLIP_ANGLE,
            marker_glyph_offset_deg: MARKER_GLYPH_OFFSET_DEG,
            default_location: LocationId::Korea,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("viewport.width", self.viewport.width)?;
        positive("viewport.height", self.viewport.height)?;
        positive("morph_duration_secs", self.morph_duration_secs)?;
        positive("flight_duration_secs", self.flight_duration_secs)?;
        positive("flat_scale_divisor", self.flat_scale_divisor)?;
        positive("globe_scale_divisor", self.globe_scale_divisor)?;
        non_negative("heading_min_screen_distance", self.heading_min_screen_distance)?;
        non_negative(
            "initial_heading_min_screen_distance",
            self.initial_heading_min_screen_distance,
        )?;
        clip_angle("flat_clip_angle", self.flat_clip_angle)?;
        clip_angle("globe_clip_angle", self.globe_clip_angle)?;

        let freeze = self.heading_freeze_progress;
        if !(freeze > 0.0 && freeze <= 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "heading_freeze_progress",
                value: freeze,
                expected: "0 < x <= 1",
            });
        }
        if !self.marker_glyph_offset_deg.is_finite() {
            return Err(ConfigError::OutOfRange {
                field: "marker_glyph_offset_deg",
                value: self.marker_glyph_offset_deg,
                expected: "finite",
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            expected: "finite, > 0",
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            expected: "finite, >= 0",
        })
    }
}

fn clip_angle(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 180.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            expected: "0 < x <= 180 degrees",
        })
    }
}
