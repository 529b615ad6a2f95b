//! # Configuration
//!
//! Everything tunable about the haunted house lives in [`WorldConfig`]: the house
//! measurement table, the graveyard seed, the window, the camera and the fog.
//! Configs are TOML files; every field is optional and falls back to the default
//! scene.
//!
//! ```toml
//! seed = 1234
//!
//! [house]
//! width = 5.0
//! door_height = 1.8
//!
//! [camera]
//! fov_degrees = 60.0
//!
//! [fog]
//! enabled = false
//! ```

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::gfx::scene::{
    lights::{Fog, Lighting},
    material::color_from_hex,
    measurements::HouseMeasurements,
};

/// Environment variable naming a config file when none is passed on the command line.
pub const CONFIG_ENV_VAR: &str = "HAUNTED_HOUSE_CONFIG";

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Haunted House".to_string(),
            width: 1200,
            height: 800,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
    /// Share of pending orbit motion applied per frame; `None` disables inertia.
    pub damping: Option<f32>,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 100.0,
            position: [4.0, 2.0, 5.0],
            target: [0.0, 0.0, 0.0],
            damping: Some(0.05),
            rotate_speed: 0.005,
            zoom_speed: 0.1,
            min_distance: 1.1,
            max_distance: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FogConfig {
    pub enabled: bool,
    /// `#rrggbb`
    pub color: String,
    pub density: f32,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            color: "#04343f".to_string(),
            density: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Graveyard seed; a time based seed is drawn when absent.
    pub seed: Option<u64>,
    pub house: HouseMeasurements,
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub fog: FogConfig,
}

impl WorldConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Self::from_toml_str(&contents)
    }

    /// Loads `path` if given, otherwise returns the validated defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let bad = self.house.non_positive_fields();
        if !bad.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "house measurements must be positive: {}",
                bad.join(", ")
            )));
        }
        if self.house.door_height >= self.house.height {
            log::warn!(
                "door height {} reaches past the wall height {}",
                self.house.door_height,
                self.house.height
            );
        }
        if self.house.width + 1.0 >= crate::gfx::scene::measurements::WORLD_BOUND {
            return Err(ConfigError::Invalid(format!(
                "house width {} leaves no room for the graveyard",
                self.house.width
            )));
        }
        if self.house.footprint_radius() >= self.house.grave_inner_radius() {
            return Err(ConfigError::Invalid(format!(
                "house reaches {:.2} from the centre, graves start at {:.2}",
                self.house.footprint_radius(),
                self.house.grave_inner_radius()
            )));
        }

        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid("window size must be non-zero".to_string()));
        }

        let camera = &self.camera;
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "camera fov {} must be within (0, 180) degrees",
                camera.fov_degrees
            )));
        }
        if !(camera.near > 0.0 && camera.far > camera.near) {
            return Err(ConfigError::Invalid(format!(
                "camera clip planes must satisfy 0 < near < far (near {}, far {})",
                camera.near, camera.far
            )));
        }
        if !(camera.min_distance > 0.0 && camera.max_distance >= camera.min_distance) {
            return Err(ConfigError::Invalid(
                "camera distance bounds must satisfy 0 < min <= max".to_string(),
            ));
        }
        if let Some(damping) = camera.damping {
            if !(damping > 0.0 && damping <= 1.0) {
                return Err(ConfigError::Invalid(format!(
                    "camera damping {damping} must be within (0, 1]"
                )));
            }
        }

        parse_hex_color(&self.fog.color)?;
        if !(self.fog.density >= 0.0) {
            return Err(ConfigError::Invalid("fog density must not be negative".to_string()));
        }

        Ok(())
    }

    /// The configured seed, or one derived from the system clock.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_nanos() as u64)
                .unwrap_or_default()
        })
    }

    /// Default lights with the configured fog.
    pub fn lighting(&self) -> Result<Lighting, ConfigError> {
        let fog = if self.fog.enabled {
            Some(Fog {
                color: color_from_hex(parse_hex_color(&self.fog.color)?),
                density: self.fog.density,
            })
        } else {
            None
        };
        Ok(Lighting {
            fog,
            ..Lighting::default()
        })
    }
}

/// Parses `#rrggbb` (the `#` is optional) into `0xRRGGBB`.
pub fn parse_hex_color(color: &str) -> Result<u32, ConfigError> {
    let digits = color.strip_prefix('#').unwrap_or(color);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ConfigError::Invalid(format!("colour {color:?} is not #rrggbb")));
    }
    u32::from_str_radix(digits, 16)
        .map_err(|_| ConfigError::Invalid(format!("colour {color:?} is not #rrggbb")))
}
