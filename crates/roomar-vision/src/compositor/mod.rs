//! Draws filled polygons onto frames
//!
//! Both view modes reduce to a list of [`Shape`]s painted in order onto a
//! copy of a base image: projected furniture faces in planner mode, marker
//! quads in AR mode. The planner floor grid is drawn as [`Stroke`]s.

pub mod raster;
mod style;

use image::RgbImage;
use roomar_core::{Color, FloorLine, Object3D, Point2D, Projector, Surface, VirtualCamera};
use tracing::trace;

use crate::marker::{MarkerBindings, MarkerDetection};

pub use style::{CompositorStyle, Outline};

/// A screen polygon and the color to fill it with
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub polygon: Vec<Point2D>,
    pub color: Color,
}

impl Shape {
    pub fn new(polygon: Vec<Point2D>, color: Color) -> Self {
        Self { polygon, color }
    }
}

/// A projected line segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub from: Point2D,
    pub to: Point2D,
    pub color: Color,
    pub width: u32,
}

/// Caption for a bound marker, anchored just above its first corner.
/// Glyphs are left to whoever presents the frame.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLabel {
    pub text: String,
    pub anchor: Point2D,
    pub color: Color,
}

/// Pixels between a marker's first corner and its label baseline
const LABEL_RISE: f32 = 15.0;

#[derive(Debug, Clone, Default)]
pub struct Compositor {
    style: CompositorStyle,
}

impl Compositor {
    pub fn new(style: CompositorStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &CompositorStyle {
        &self.style
    }

    /// Paint `shapes` onto a copy of `base`, first to last. `base` is not
    /// modified.
    pub fn compose(&self, base: &RgbImage, shapes: &[Shape]) -> RgbImage {
        let mut canvas = base.clone();
        self.draw(&mut canvas, shapes);
        canvas
    }

    /// Paint `shapes` in place, first to last
    pub fn draw(&self, canvas: &mut RgbImage, shapes: &[Shape]) {
        for shape in shapes {
            let filled = raster::fill_polygon(canvas, &shape.polygon, shape.color, self.style.fill_opacity);
            if let Some(outline) = self.style.outline {
                raster::stroke_polygon(canvas, &shape.polygon, outline.color, outline.width);
            }
            if !filled {
                trace!("Skipped degenerate shape with {} points", shape.polygon.len());
            }
        }
    }

    /// Paint `strokes` in place, first to last
    pub fn draw_strokes(&self, canvas: &mut RgbImage, strokes: &[Stroke]) {
        for stroke in strokes {
            raster::stroke_line(canvas, stroke.from, stroke.to, stroke.color, stroke.width);
        }
    }

    /// Floor grid lines projected to the screen. Lines with an end behind
    /// the camera are dropped.
    pub fn grid_strokes(lines: &[FloorLine], camera: &VirtualCamera, projector: &Projector) -> Vec<Stroke> {
        lines
            .iter()
            .filter_map(|line| {
                let from = projector.project(line.start, camera)?;
                let to = projector.project(line.end, camera)?;
                let color = if line.axis { Color::GRID_AXIS } else { Color::GRID };
                Some(Stroke { from, to, color, width: 1 })
            })
            .collect()
    }

    /// Faces of every object, object by object in list order. Objects with
    /// any vertex behind the camera are left out entirely.
    pub fn planner_shapes(
        &self,
        objects: &[Object3D],
        camera: &VirtualCamera,
        projector: &Projector,
    ) -> Vec<Shape> {
        let mut shapes = Vec::new();
        for object in objects {
            let Some(faces) = projector.project_object(object, camera) else {
                trace!("{} {} not projectable, skipped", object.kind(), object.id());
                continue;
            };
            for face in faces {
                let mut intensity = face.tint;
                if self.style.shading {
                    intensity *= style::face_intensity(face.normal);
                }
                shapes.push(Shape::new(face.points, object.color.shade(intensity)));
            }
        }
        shapes
    }

    /// Room shell polygons that face the camera and project cleanly
    pub fn surface_shapes(
        &self,
        surfaces: &[Surface],
        camera: &VirtualCamera,
        projector: &Projector,
    ) -> Vec<Shape> {
        surfaces
            .iter()
            .filter(|s| s.visible_from(camera.pose.position))
            .filter_map(|s| {
                let polygon = projector.project_polygon(&s.vertices, camera)?;
                Some(Shape::new(polygon, s.color))
            })
            .collect()
    }

    /// One quad per bound detection, in detection order. Unbound ids are
    /// ignored.
    pub fn ar_shapes(detections: &[MarkerDetection], bindings: &MarkerBindings) -> Vec<Shape> {
        detections
            .iter()
            .filter_map(|d| {
                let binding = bindings.get(d.id)?;
                Some(Shape::new(d.corners.to_vec(), binding.color))
            })
            .collect()
    }

    /// Captions naming the bound object for each bound detection
    pub fn ar_labels(detections: &[MarkerDetection], bindings: &MarkerBindings) -> Vec<OverlayLabel> {
        detections
            .iter()
            .filter_map(|d| {
                let binding = bindings.get(d.id)?;
                let corner = d.corners[0];
                Some(OverlayLabel {
                    text: format!("Object: {} (ID: {})", binding.kind, d.id),
                    anchor: Point2D::new(corner.x, corner.y - LABEL_RISE),
                    color: Color::GREEN,
                })
            })
            .collect()
    }
}
