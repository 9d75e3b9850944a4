//! Render loop: planner and AR views over one scene
//!
//! The renderer owns everything that lives on the render thread. Capture
//! runs elsewhere (inside [`FrameSource`]); the loop only ever reads its
//! latest frame and drains its events, so a stuck camera cannot stall a tick.

use std::fmt;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use image::RgbImage;
use roomar_core::{
    Color, Object3D, ObjectId, ObjectKind, OrbitRig, PlacementRules, Point3D, PoseDelta, Projector,
    Room, SceneError, SceneHistory, SceneModel, VirtualCamera, Viewport,
};
use roomar_vision::{
    CaptureEvent, Compositor, CompositorStyle, FrameSource, MarkerBindings, MarkerBridge,
    MarkerDetection, OverlayLabel,
};
use tracing::{debug, info, warn};

use crate::presenter::Presenter;

/// Which view the loop renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Planner,
    Ar,
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Planner => f.write_str("planner"),
            ViewMode::Ar => f.write_str("ar"),
        }
    }
}

/// User-facing conditions, each reported once when it happens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// AR is disabled for the rest of the session
    CameraUnavailable(String),
    /// The camera did not shut down in time and was detached
    ShutdownTimeout,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::CameraUnavailable(reason) => write!(f, "AR unavailable: {reason}"),
            Notice::ShutdownTimeout => f.write_str("Camera did not shut down in time"),
        }
    }
}

/// Result of one tick
#[derive(Debug, Clone)]
pub struct TickOutput {
    pub tick: u64,
    pub mode: ViewMode,
    pub image: RgbImage,
    pub notices: Vec<Notice>,
    /// Markers found this tick (AR mode only)
    pub detections: Vec<MarkerDetection>,
    /// Captions for the drawn overlays (AR mode only)
    pub labels: Vec<OverlayLabel>,
}

/// Lens, styles and behaviour switches for a [`Renderer`]
#[derive(Debug, Clone)]
pub struct RendererOptions {
    pub camera: VirtualCamera,
    pub orbit: OrbitRig,
    pub placement: PlacementRules,
    pub planner_style: CompositorStyle,
    pub ar_style: CompositorStyle,
    /// Flip camera frames horizontally before detection and drawing
    pub mirror: bool,
    /// Floor grid and centre axes in the planner view
    pub show_grid: bool,
    pub background: Color,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            camera: VirtualCamera::default(),
            orbit: OrbitRig::default(),
            placement: PlacementRules::default(),
            planner_style: CompositorStyle::planner(),
            ar_style: CompositorStyle::ar(),
            mirror: true,
            show_grid: true,
            background: Color::BACKDROP,
        }
    }
}

pub struct Renderer {
    scene: SceneModel,
    history: SceneHistory,
    room: Room,
    rig: OrbitRig,
    camera: VirtualCamera,
    placement: PlacementRules,
    projector: Projector,
    planner: Compositor,
    overlay: Compositor,
    bridge: MarkerBridge,
    bindings: MarkerBindings,
    frames: Option<FrameSource>,
    mode: ViewMode,
    ar_disabled: bool,
    mirror: bool,
    show_grid: bool,
    background: Color,
    tick: u64,
    pending: Vec<Notice>,
}

impl Renderer {
    pub fn new(room: Room, options: RendererOptions, bridge: MarkerBridge, bindings: MarkerBindings) -> Self {
        let scene = SceneModel::new();
        let history = SceneHistory::new(&scene);
        let mut rig = options.orbit;
        rig.frame_room(&room);
        Self {
            scene,
            history,
            room,
            rig,
            camera: options.camera,
            placement: options.placement,
            projector: Projector::new(),
            planner: Compositor::new(options.planner_style),
            overlay: Compositor::new(options.ar_style),
            bridge,
            bindings,
            frames: None,
            mode: ViewMode::Planner,
            ar_disabled: false,
            mirror: options.mirror,
            show_grid: options.show_grid,
            background: options.background,
            tick: 0,
            pending: Vec::new(),
        }
    }

    /// Attach the camera used in AR mode
    pub fn with_frame_source(mut self, frames: FrameSource) -> Self {
        self.frames = Some(frames);
        self
    }

    pub fn scene(&self) -> &SceneModel {
        &self.scene
    }

    pub fn room(&self) -> &Room {
        &self.room
    }

    pub fn rig(&self) -> &OrbitRig {
        &self.rig
    }

    pub fn bindings(&self) -> &MarkerBindings {
        &self.bindings
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.show_grid = show;
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// False once the camera has been reported unavailable
    pub fn ar_available(&self) -> bool {
        !self.ar_disabled
    }

    /// Planner camera at the rig's current pose
    pub fn planner_camera(&self) -> VirtualCamera {
        self.camera.with_pose(self.rig.pose())
    }

    pub fn viewport(&self) -> Viewport {
        self.camera.viewport
    }

    // Scene editing. Every successful edit is one undo step.

    /// Place an object where the pixel (x, y) meets the floor
    pub fn place_at_pixel(&mut self, kind: ObjectKind, x: f32, y: f32) -> ObjectId {
        let hit = self
            .projector
            .unproject_to_floor(x, y, &self.planner_camera(), 0.0);
        self.place(kind, hit)
    }

    /// Place an object at a floor point, after snapping and clamping
    pub fn place(&mut self, kind: ObjectKind, point: Point3D) -> ObjectId {
        let pose = self.placement.pose_for(kind, point, &self.room);
        let id = self.scene.add_object(kind, pose);
        self.history.commit(&self.scene);
        id
    }

    pub fn update(&mut self, id: ObjectId, delta: &PoseDelta) -> Result<(), SceneError> {
        self.scene.update_object(id, delta)?;
        self.history.commit(&self.scene);
        Ok(())
    }

    pub fn remove(&mut self, id: ObjectId) -> Result<Object3D, SceneError> {
        let removed = self.scene.remove_object(id)?;
        self.history.commit(&self.scene);
        Ok(removed)
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.scene)
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.scene)
    }

    pub fn orbit(&mut self, d_azimuth: f32, d_elevation: f32) {
        self.rig.orbit(d_azimuth, d_elevation);
    }

    pub fn zoom(&mut self, factor: f32) {
        self.rig.zoom(factor);
    }

    /// Switch views. Entering AR starts capture; leaving it stops capture.
    pub fn set_mode(&mut self, mode: ViewMode) {
        if mode == self.mode {
            return;
        }
        info!("Switching to {} view", mode);
        self.mode = mode;

        match mode {
            ViewMode::Ar => self.start_capture(),
            ViewMode::Planner => {
                if let Some(frames) = self.frames.as_mut() {
                    frames.stop();
                }
            }
        }
    }

    fn start_capture(&mut self) {
        if self.ar_disabled {
            debug!("AR disabled, not starting capture");
            return;
        }
        match self.frames.as_mut() {
            Some(frames) => frames.start(),
            None => self.disable_ar("no capture device configured".to_string()),
        }
    }

    fn disable_ar(&mut self, reason: String) {
        if self.ar_disabled {
            return;
        }
        warn!("AR disabled: {}", reason);
        self.ar_disabled = true;
        self.pending.push(Notice::CameraUnavailable(reason));
    }

    fn collect_events(&mut self) {
        let events = match self.frames.as_ref() {
            Some(frames) => frames.drain_events(),
            None => return,
        };
        for event in events {
            match event {
                CaptureEvent::CameraUnavailable(e) => self.disable_ar(e.to_string()),
                CaptureEvent::ShutdownTimeout => self.pending.push(Notice::ShutdownTimeout),
            }
        }
    }

    /// Render one image for the current mode. Never fails; degraded
    /// conditions come back as notices.
    pub fn tick(&mut self) -> TickOutput {
        self.tick += 1;
        self.collect_events();

        let (image, detections) = match self.mode {
            ViewMode::Planner => (self.render_planner(), Vec::new()),
            ViewMode::Ar => self.render_ar(),
        };
        let labels = Compositor::ar_labels(&detections, &self.bindings);

        TickOutput {
            tick: self.tick,
            mode: self.mode,
            image,
            notices: std::mem::take(&mut self.pending),
            detections,
            labels,
        }
    }

    fn blank_canvas(&self) -> RgbImage {
        let viewport = self.camera.viewport;
        RgbImage::from_pixel(
            viewport.width.max(1),
            viewport.height.max(1),
            image::Rgb(self.background.to_array()),
        )
    }

    /// Floor, then grid, then walls, then furniture
    fn render_planner(&self) -> RgbImage {
        let camera = self.planner_camera();
        let (floor, shell): (Vec<_>, Vec<_>) = self
            .room
            .surfaces()
            .into_iter()
            .partition(|s| s.name == "floor");

        let mut canvas = self.blank_canvas();
        let floor = self.planner.surface_shapes(&floor, &camera, &self.projector);
        self.planner.draw(&mut canvas, &floor);

        if self.show_grid {
            let lines = self.room.floor_grid(self.placement.grid_size);
            let strokes = Compositor::grid_strokes(&lines, &camera, &self.projector);
            self.planner.draw_strokes(&mut canvas, &strokes);
        }

        let mut shapes = self.planner.surface_shapes(&shell, &camera, &self.projector);
        shapes.extend(
            self.planner
                .planner_shapes(self.scene.list_objects(), &camera, &self.projector),
        );
        self.planner.draw(&mut canvas, &shapes);
        canvas
    }

    fn render_ar(&mut self) -> (RgbImage, Vec<MarkerDetection>) {
        let latest = if self.ar_disabled {
            None
        } else {
            self.frames.as_ref().and_then(|f| f.latest())
        };
        let Some(frame) = latest else {
            return (self.blank_canvas(), Vec::new());
        };

        let frame = if self.mirror { frame.mirrored() } else { frame };
        let detections = self.bridge.detect(&frame);
        let shapes = Compositor::ar_shapes(&detections, &self.bindings);
        debug!(
            "Frame {}: {} detection(s), {} overlay(s)",
            frame.sequence(),
            detections.len(),
            shapes.len()
        );
        (self.overlay.compose(frame.pixels(), &shapes), detections)
    }

    /// Tick at a fixed rate, presenting every image. Runs `ticks` times, or
    /// until the presenter fails when `ticks` is `None`.
    pub fn run(
        &mut self,
        presenter: &mut dyn Presenter,
        ticks: Option<u64>,
        tick_rate: Duration,
    ) -> Result<Vec<Notice>> {
        let mut notices = Vec::new();
        let mut done = 0u64;

        while ticks.map_or(true, |limit| done < limit) {
            let started = Instant::now();
            let output = self.tick();
            for notice in &output.notices {
                warn!("{}", notice);
            }
            for label in &output.labels {
                debug!("{} at ({:.0}, {:.0})", label.text, label.anchor.x, label.anchor.y);
            }
            presenter
                .present(&output.image, output.tick)
                .with_context(|| format!("Failed to present tick {}", output.tick))?;
            notices.extend(output.notices);
            done += 1;

            let finished = ticks.is_some_and(|limit| done >= limit);
            let remaining = tick_rate.checked_sub(started.elapsed()).unwrap_or_default();
            if !finished && !remaining.is_zero() {
                thread::sleep(remaining);
            }
        }

        info!("Rendered {} tick(s)", done);
        Ok(notices)
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        if let Some(frames) = self.frames.as_mut() {
            frames.stop();
        }
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("mode", &self.mode)
            .field("objects", &self.scene.len())
            .field("ar_available", &self.ar_available())
            .field("tick", &self.tick)
            .finish_non_exhaustive()
    }
}
