//! Game configuration read from TOML at startup.
//!
//! Conventions
//! - Every table and key is optional; anything missing keeps its default.
//! - The file path comes from `DUEL_DRIVE_CONFIG`, falling back to `assets/duel_drive.toml`.
//! - A missing file is normal. A broken file is logged and ignored.

use std::{
    env, fmt, fs, io,
    path::{Path, PathBuf},
};

use bevy::prelude::*;
use serde::Deserialize;
use shared::{SpeedUnit, VehicleTuning};

pub const CONFIG_ENV_VAR: &str = "DUEL_DRIVE_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "assets/duel_drive.toml";

pub(super) fn plugin(app: &mut App) {
    app.insert_resource(GameConfig::load_or_default(&config_path()));
}

#[derive(Resource, Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub vehicle: VehicleTuning,
    pub camera: CameraSettings,
    pub hud: HudSettings,
}

/// How a player's camera trails their car.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Offset from the car, in the car's frame when `rotate_with_target` is set.
    pub offset: [f32; 3],
    /// Exponential decay rate for position smoothing (1/s).
    pub follow_speed: f32,
    pub look_at_target: bool,
    pub look_at_offset: [f32; 3],
    pub look_speed: f32,
    pub rotate_with_target: bool,
    pub rotation_follow_speed: f32,
    /// Locked axes keep the camera's current coordinate on that axis.
    pub lock_x: bool,
    pub lock_y: bool,
    pub lock_z: bool,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            offset: [0.0, 6.0, 8.0],
            follow_speed: 8.0,
            look_at_target: true,
            look_at_offset: [0.0, 1.0, 0.0],
            look_speed: 12.0,
            rotate_with_target: true,
            rotation_follow_speed: 8.0,
            lock_x: false,
            lock_y: false,
            lock_z: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct HudSettings {
    pub unit: SpeedUnit,
    pub decimal_places: usize,
}

impl Default for HudSettings {
    fn default() -> Self {
        Self {
            unit: SpeedUnit::KilometersPerHour,
            decimal_places: 1,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "failed to read config: {err}"),
            ConfigError::Parse(err) => write!(f, "failed to parse config: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}

pub fn config_path() -> PathBuf {
    env::var_os(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

impl GameConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Read `path`, falling back to defaults on any error.
    ///
    /// Out-of-range vehicle tuning is also replaced by the defaults, since a car cannot attach
    /// with it.
    pub fn load_or_default(path: &Path) -> Self {
        let mut config = match Self::load(path) {
            Ok(config) => {
                info!("Loaded game config from {}", path.display());
                config
            }
            Err(ConfigError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
                info!("No config at {}, using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                warn!("{} ({}), using defaults", err, path.display());
                Self::default()
            }
        };

        if let Err(err) = config.vehicle.validate() {
            warn!("Ignoring vehicle tuning: {err}");
            config.vehicle = VehicleTuning::default();
        }

        config
    }
}
