//! roomar: room layout planner with marker-anchored AR overlays
//!
//! The member crates provide the pieces (`roomar-core` for the scene and
//! projection, `roomar-vision` for capture, markers and compositing,
//! `roomar-config` for settings). This crate wires them into a render loop.

pub mod demo;
pub mod presenter;
pub mod renderer;
pub mod setup;

pub use presenter::{NullPresenter, PngPresenter, Presenter};
pub use renderer::{Notice, Renderer, RendererOptions, TickOutput, ViewMode};
