use roomar_core::{Color, Vector3D};

/// Edge stroke drawn around each filled shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outline {
    pub color: Color,
    pub width: u32,
}

impl Outline {
    pub fn new(color: Color, width: u32) -> Self {
        Self { color, width }
    }
}

/// How shapes are painted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositorStyle {
    /// 0.0 leaves the base untouched, 1.0 paints solid
    pub fill_opacity: f32,
    pub outline: Option<Outline>,
    /// Flat per-face shading for planner objects
    pub shading: bool,
}

impl CompositorStyle {
    /// Solid faces with dark edges and flat shading
    pub fn planner() -> Self {
        Self {
            fill_opacity: 1.0,
            outline: Some(Outline::new(Color::BLACK, 2)),
            shading: true,
        }
    }

    /// Half-transparent overlays with a green border
    pub fn ar() -> Self {
        Self {
            fill_opacity: 0.5,
            outline: Some(Outline::new(Color::GREEN, 2)),
            shading: false,
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.fill_opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_outline(mut self, outline: Option<Outline>) -> Self {
        self.outline = outline;
        self
    }

    pub fn with_shading(mut self, shading: bool) -> Self {
        self.shading = shading;
        self
    }
}

impl Default for CompositorStyle {
    fn default() -> Self {
        Self {
            fill_opacity: 1.0,
            outline: None,
            shading: false,
        }
    }
}

const AMBIENT: f32 = 0.4;

/// Flat Lambert term for a face. Faces are two-sided, so the normal's sign
/// is ignored.
pub(crate) fn face_intensity(normal: Vector3D) -> f32 {
    let light = Vector3D::new(0.3, 1.0, 0.5).normalize();
    let diffuse = normal.normalize().dot(&light).abs();
    (AMBIENT + (1.0 - AMBIENT) * diffuse).clamp(0.0, 1.0)
}
