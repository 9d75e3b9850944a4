//! roomar-config: TOML configuration for the room planner
//!
//! Lookup order: an explicit path, then `ROOMAR_CONFIG`, then
//! `<config dir>/roomar/config.toml`, then built-in defaults.

mod model;

use std::collections::HashSet;
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::{debug, info};

pub use model::{
    AppConfig, BindingConfig, CameraConfig, CaptureConfig, LoggingConfig, OverlayConfig,
    RoomConfig, ViewportConfig,
};

/// Environment variable naming a config file
pub const CONFIG_ENV_VAR: &str = "ROOMAR_CONFIG";

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Where the effective configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    Environment(PathBuf),
    UserDir(PathBuf),
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Explicit(path) => write!(f, "{}", path.display()),
            ConfigSource::Environment(path) => write!(f, "{} (from {})", path.display(), CONFIG_ENV_VAR),
            ConfigSource::UserDir(path) => write!(f, "{}", path.display()),
            ConfigSource::Defaults => f.write_str("built-in defaults"),
        }
    }
}

impl AppConfig {
    /// Read, parse and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Platform config path, e.g. `~/.config/roomar/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "roomar").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Resolve configuration using the process environment
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, ConfigSource)> {
        Self::discover_from(
            explicit,
            std::env::var_os(CONFIG_ENV_VAR),
            Self::default_path(),
        )
    }

    /// Resolve configuration from explicit inputs.
    ///
    /// An explicit or environment path must exist; the user-dir file is
    /// optional.
    pub fn discover_from(
        explicit: Option<&Path>,
        env_value: Option<OsString>,
        user_path: Option<PathBuf>,
    ) -> Result<(Self, ConfigSource)> {
        let (config, source) = if let Some(path) = explicit {
            (Self::load(path)?, ConfigSource::Explicit(path.to_path_buf()))
        } else if let Some(value) = env_value.filter(|v| !v.is_empty()) {
            let path = PathBuf::from(value);
            (Self::load(&path)?, ConfigSource::Environment(path))
        } else if let Some(path) = user_path.filter(|p| p.is_file()) {
            (Self::load(&path)?, ConfigSource::UserDir(path))
        } else {
            (Self::default(), ConfigSource::Defaults)
        };
        info!("Using configuration from {}", source);
        Ok((config, source))
    }

    /// Reject values the renderer cannot work with
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.viewport.width == 0 || self.viewport.height == 0 {
            return invalid(format!(
                "viewport must be non-empty, got {}x{}",
                self.viewport.width, self.viewport.height
            ));
        }

        let cam = &self.camera;
        if !(cam.fov_degrees > 0.0 && cam.fov_degrees < 180.0) {
            return invalid(format!("camera.fov_degrees must be in (0, 180), got {}", cam.fov_degrees));
        }
        if !(cam.near > 0.0 && cam.near.is_finite()) {
            return invalid(format!("camera.near must be positive, got {}", cam.near));
        }
        if !(cam.far > cam.near) {
            return invalid(format!(
                "camera.far ({}) must be greater than camera.near ({})",
                cam.far, cam.near
            ));
        }
        if !(cam.orbit_distance > 0.0 && cam.orbit_distance.is_finite()) {
            return invalid(format!("camera.orbit_distance must be positive, got {}", cam.orbit_distance));
        }

        let room = &self.room;
        if !(room.units_per_foot > 0.0 && room.units_per_foot.is_finite()) {
            return invalid(format!("room.units_per_foot must be positive, got {}", room.units_per_foot));
        }
        if !(room.grid_size >= 0.0 && room.grid_size.is_finite()) {
            return invalid(format!("room.grid_size must not be negative, got {}", room.grid_size));
        }

        if self.capture.shutdown_timeout_ms == 0 {
            return invalid("capture.shutdown_timeout_ms must be positive".to_string());
        }

        let opacity = self.overlay.fill_opacity;
        if !(0.0..=1.0).contains(&opacity) {
            return invalid(format!("overlay.fill_opacity must be within [0, 1], got {opacity}"));
        }

        let mut seen = HashSet::new();
        for binding in &self.bindings {
            if !seen.insert(binding.marker_id) {
                return invalid(format!("marker {} is bound more than once", binding.marker_id));
            }
        }

        Ok(())
    }
}
