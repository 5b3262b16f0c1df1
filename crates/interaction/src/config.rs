use std::path::{Path, PathBuf};

use scene::{RegionLayout, projection::GroundProjection};
use serde::{Deserialize, Serialize};

/// Tunables for the interaction core. Every field has a default, so a config
/// file only needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub extrusion: ExtrusionConfig,
    pub mood: MoodConfig,
    pub layout: LayoutConfig,
    pub ground: GroundConfig,
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtrusionConfig {
    pub extrude_duration_s: f64,
    pub extrude_scale: f64,
    pub retract_duration_s: f64,
    pub rest_scale: f64,
}

impl Default for ExtrusionConfig {
    fn default() -> Self {
        Self {
            extrude_duration_s: 5.0,
            extrude_scale: 3.0,
            retract_duration_s: 1.0,
            rest_scale: scene::REST_SCALE_Z,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoodConfig {
    /// Maximum angular speed of the sun (degrees per second).
    pub rate_deg_per_s: f64,
    /// Within this distance of the target the elevation snaps onto it.
    pub snap_epsilon_deg: f64,
    pub initial_elevation_deg: f64,
    pub sun_azimuth_deg: f64,
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            rate_deg_per_s: 30.0,
            snap_epsilon_deg: 0.1,
            initial_elevation_deg: 2.0,
            sun_azimuth_deg: 180.0,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// World units per degree of longitude/latitude.
    pub world_scale: f64,
    /// Unscaled region depth in degree units.
    pub region_depth: f64,
    pub base_y: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            world_scale: 15.0,
            region_depth: 1.0,
            base_y: 0.0,
        }
    }
}

impl LayoutConfig {
    pub fn region_layout(&self) -> RegionLayout {
        RegionLayout {
            projection: GroundProjection::new(self.world_scale),
            base_y: self.base_y,
            depth: self.region_depth,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    /// Height of the ocean floor.
    pub floor_height: f64,
    /// Hover height above the floor when no region is below.
    pub floor_clearance: f64,
    /// Hover height above a region's top.
    pub eye_height: f64,
    /// Fall speed (units per second).
    pub gravity: f64,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            floor_height: 8.5,
            floor_clearance: 12.0,
            eye_height: 2.0,
            gravity: 9.81 * 2.0,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read config {}: {source}", path.display())
            }
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl InteractionConfig {
    pub fn from_json_str(payload: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(payload).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let payload = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json_str(&payload)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("extrusion.extrude_duration_s", self.extrusion.extrude_duration_s),
            ("extrusion.retract_duration_s", self.extrusion.retract_duration_s),
            ("mood.snap_epsilon_deg", self.mood.snap_epsilon_deg),
            ("ground.gravity", self.ground.gravity),
        ];
        for (name, v) in non_negative {
            if !v.is_finite() || v < 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be >= 0, got {v}")));
            }
        }

        let positive = [
            ("mood.rate_deg_per_s", self.mood.rate_deg_per_s),
            ("layout.world_scale", self.layout.world_scale),
        ];
        for (name, v) in positive {
            if !v.is_finite() || v <= 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be > 0, got {v}")));
            }
        }

        let finite = [
            ("extrusion.extrude_scale", self.extrusion.extrude_scale),
            ("extrusion.rest_scale", self.extrusion.rest_scale),
            ("mood.initial_elevation_deg", self.mood.initial_elevation_deg),
            ("mood.sun_azimuth_deg", self.mood.sun_azimuth_deg),
            ("layout.region_depth", self.layout.region_depth),
            ("layout.base_y", self.layout.base_y),
            ("ground.floor_height", self.ground.floor_height),
            ("ground.floor_clearance", self.ground.floor_clearance),
            ("ground.eye_height", self.ground.eye_height),
        ];
        for (name, v) in finite {
            if !v.is_finite() {
                return Err(ConfigError::Invalid(format!("{name} must be finite")));
            }
        }
        Ok(())
    }
}
