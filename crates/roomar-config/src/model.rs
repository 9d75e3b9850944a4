//! Configuration sections

use roomar_core::{Color, ObjectKind};
use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub viewport: ViewportConfig,
    pub camera: CameraConfig,
    pub room: RoomConfig,
    pub capture: CaptureConfig,
    pub overlay: OverlayConfig,
    pub logging: LoggingConfig,
    /// Marker bindings; an explicit empty list disables every overlay
    pub bindings: Vec<BindingConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            viewport: ViewportConfig::default(),
            camera: CameraConfig::default(),
            room: RoomConfig::default(),
            capture: CaptureConfig::default(),
            overlay: OverlayConfig::default(),
            logging: LoggingConfig::default(),
            bindings: default_bindings(),
        }
    }
}

/// Output image size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Planner camera and orbit defaults
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub orbit_distance: f32,
    pub orbit_azimuth_degrees: f32,
    pub orbit_elevation_degrees: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            near: 0.1,
            far: 10_000.0,
            orbit_distance: 700.0,
            orbit_azimuth_degrees: 45.0,
            orbit_elevation_degrees: 35.0,
        }
    }
}

/// Room shell and placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    pub width_ft: f32,
    pub depth_ft: f32,
    pub height_ft: f32,
    pub units_per_foot: f32,
    pub grid_size: f32,
    pub snap_to_grid: bool,
    /// Draw the floor grid and centre axes in the planner view
    pub show_grid: bool,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            width_ft: 30.0,
            depth_ft: 24.0,
            height_ft: 10.0,
            units_per_foot: 25.0,
            grid_size: 25.0,
            snap_to_grid: true,
            show_grid: true,
        }
    }
}

/// Camera capture thread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub device_index: u32,
    pub poll_interval_ms: u64,
    pub shutdown_timeout_ms: u64,
    /// Flip frames horizontally before drawing
    pub mirror: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            device_index: 0,
            poll_interval_ms: 10,
            shutdown_timeout_ms: 2_000,
            mirror: true,
        }
    }
}

/// AR overlay painting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub fill_opacity: f32,
    /// Border color; omit for no border
    pub outline_color: Option<Color>,
    pub outline_width: u32,
    /// Flat face shading in planner mode
    pub shading: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            fill_opacity: 0.5,
            outline_color: Some(Color::GREEN),
            outline_width: 2,
            shading: true,
        }
    }
}

/// One marker → object binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingConfig {
    pub marker_id: u32,
    pub kind: ObjectKind,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

fn default_bindings() -> Vec<BindingConfig> {
    vec![
        BindingConfig {
            marker_id: 23,
            kind: ObjectKind::Desk,
            color: Color::BLUE,
        },
        BindingConfig {
            marker_id: 24,
            kind: ObjectKind::Chair,
            color: Color::RED,
        },
        BindingConfig {
            marker_id: 25,
            kind: ObjectKind::Cabinet,
            color: Color::YELLOW,
        },
    ]
}
