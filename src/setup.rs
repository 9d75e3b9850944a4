//! Builds runtime components from an [`AppConfig`]

use std::time::Duration;

use roomar_config::AppConfig;
use roomar_core::{
    OrbitRig, PlacementRules, Point3D, Room, RoomDimensions, RoomError, VirtualCamera, Viewport,
};
use roomar_vision::{CaptureSettings, CompositorStyle, MarkerBinding, MarkerBindings, Outline};

use crate::renderer::RendererOptions;

pub fn room(config: &AppConfig) -> Result<Room, RoomError> {
    let r = &config.room;
    Room::with_units(
        RoomDimensions::new(r.width_ft, r.depth_ft, r.height_ft),
        r.units_per_foot,
    )
}

pub fn renderer_options(config: &AppConfig) -> RendererOptions {
    let cam = &config.camera;
    let viewport = Viewport::new(config.viewport.width, config.viewport.height);
    let overlay = &config.overlay;

    RendererOptions {
        camera: VirtualCamera::perspective(cam.fov_degrees, viewport).with_clip(cam.near, cam.far),
        orbit: OrbitRig::new(
            Point3D::ORIGIN,
            cam.orbit_distance,
            cam.orbit_azimuth_degrees,
            cam.orbit_elevation_degrees,
        ),
        placement: PlacementRules::new(config.room.grid_size, config.room.snap_to_grid),
        planner_style: CompositorStyle::planner().with_shading(overlay.shading),
        ar_style: CompositorStyle::ar()
            .with_opacity(overlay.fill_opacity)
            .with_outline(
                overlay
                    .outline_color
                    .map(|color| Outline::new(color, overlay.outline_width)),
            ),
        mirror: config.capture.mirror,
        show_grid: config.room.show_grid,
        ..RendererOptions::default()
    }
}

pub fn bindings(config: &AppConfig) -> MarkerBindings {
    config
        .bindings
        .iter()
        .map(|b| MarkerBinding::new(b.marker_id, b.kind, b.color))
        .collect()
}

pub fn capture_settings(config: &AppConfig) -> CaptureSettings {
    CaptureSettings {
        poll_interval: Duration::from_millis(config.capture.poll_interval_ms),
        shutdown_timeout: Duration::from_millis(config.capture.shutdown_timeout_ms),
    }
}
