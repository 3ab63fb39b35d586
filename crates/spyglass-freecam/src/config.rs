//! Freecam settings
//!
//! Reading and writing the backing file is the host config layer's job; this
//! module only defines the schema, its defaults, and TOML conversion.

use crate::motion::MotionSettings;
use serde::{Deserialize, Serialize};
use spyglass_core::{Result, SpyglassError};

/// User-adjustable freecam settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreecamConfig {
    /// Movement speed in distance units per second
    #[serde(default = "default_base_speed")]
    pub base_speed: f32,
    /// Speed factor while the fast modifier is held
    #[serde(default = "default_fast_multiplier")]
    pub fast_multiplier: f32,
    /// Degrees of rotation per unit of cursor movement
    #[serde(default = "default_look_sensitivity")]
    pub look_sensitivity: f32,
    /// Drive the scene's own camera instead of a separate freecam camera
    #[serde(default)]
    pub use_host_camera: bool,
    /// Seconds between position field refreshes (0 = every frame)
    #[serde(default)]
    pub position_refresh_interval: f32,
}

fn default_base_speed() -> f32 {
    10.0
}
fn default_fast_multiplier() -> f32 {
    10.0
}
fn default_look_sensitivity() -> f32 {
    0.3
}

impl Default for FreecamConfig {
    fn default() -> Self {
        Self {
            base_speed: default_base_speed(),
            fast_multiplier: default_fast_multiplier(),
            look_sensitivity: default_look_sensitivity(),
            use_host_camera: false,
            position_refresh_interval: 0.0,
        }
    }
}

impl FreecamConfig {
    /// Parse and validate a TOML document; missing keys take defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: FreecamConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        check_non_negative("base_speed", self.base_speed)?;
        check_non_negative("fast_multiplier", self.fast_multiplier)?;
        check_non_negative("look_sensitivity", self.look_sensitivity)?;
        check_non_negative("position_refresh_interval", self.position_refresh_interval)?;
        Ok(())
    }

    pub fn motion(&self) -> MotionSettings {
        MotionSettings {
            base_speed: self.base_speed,
            fast_multiplier: self.fast_multiplier,
            look_sensitivity: self.look_sensitivity,
        }
    }
}

pub(crate) fn check_non_negative(field: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SpyglassError::ValueOutOfRange {
            field: field.to_string(),
            min: 0.0,
            max: f32::MAX as f64,
            value: value as f64,
        })
    }
}
