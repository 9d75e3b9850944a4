//! Polygon fill and outline on RGB canvases

use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::drawing::{draw_line_segment_mut, draw_polygon_mut};
use imageproc::point::Point;
use roomar_core::{Color, Point2D};

/// Keeps wildly off-screen vertices from overflowing integer math
const COORD_LIMIT: f32 = (1 << 20) as f32;

/// Integer polygon ready for imageproc, or `None` if it collapses below a
/// triangle once rounded to pixels.
fn pixel_polygon(points: &[Point2D]) -> Option<Vec<Point<i32>>> {
    let mut poly: Vec<Point<i32>> = Vec::with_capacity(points.len());
    for p in points {
        if !p.is_finite() {
            return None;
        }
        let px = Point::new(
            p.x.clamp(-COORD_LIMIT, COORD_LIMIT).round() as i32,
            p.y.clamp(-COORD_LIMIT, COORD_LIMIT).round() as i32,
        );
        if poly.last() != Some(&px) {
            poly.push(px);
        }
    }
    // imageproc rejects an explicitly closed ring
    while poly.len() > 1 && poly.first() == poly.last() {
        poly.pop();
    }
    (poly.len() >= 3).then_some(poly)
}

/// Fill a polygon, blending with the existing pixels at `opacity`.
///
/// Returns false when nothing was drawn.
pub fn fill_polygon(canvas: &mut RgbImage, points: &[Point2D], color: Color, opacity: f32) -> bool {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || canvas.width() == 0 || canvas.height() == 0 {
        return false;
    }
    let Some(poly) = pixel_polygon(points) else {
        return false;
    };

    if opacity >= 1.0 {
        draw_polygon_mut(canvas, &poly, Rgb(color.to_array()));
        return true;
    }

    let mut mask = GrayImage::new(canvas.width(), canvas.height());
    draw_polygon_mut(&mut mask, &poly, Luma([255u8]));

    let (x0, y0, x1, y1) = bounds(&poly, canvas.width(), canvas.height());
    for y in y0..y1 {
        for x in x0..x1 {
            if mask.get_pixel(x, y)[0] == 0 {
                continue;
            }
            let pixel = canvas.get_pixel_mut(x, y);
            let under = Color::from(pixel.0);
            *pixel = Rgb(under.blend(&color, opacity).to_array());
        }
    }
    true
}

/// Closed outline of `width` pixels
pub fn stroke_polygon(canvas: &mut RgbImage, points: &[Point2D], color: Color, width: u32) {
    if width == 0 || points.len() < 2 || !points.iter().all(|p| p.is_finite()) {
        return;
    }
    let pixel = Rgb(color.to_array());
    for (i, start) in points.iter().enumerate() {
        let end = points[(i + 1) % points.len()];
        stroke_segment(canvas, *start, end, pixel, width);
    }
}

/// Straight line of `width` pixels. Non-finite endpoints draw nothing.
pub fn stroke_line(canvas: &mut RgbImage, start: Point2D, end: Point2D, color: Color, width: u32) {
    if width == 0 || !start.is_finite() || !end.is_finite() {
        return;
    }
    stroke_segment(canvas, start, end, Rgb(color.to_array()), width);
}

fn stroke_segment(canvas: &mut RgbImage, start: Point2D, end: Point2D, pixel: Rgb<u8>, width: u32) {
    let clamp = |v: f32| v.clamp(-COORD_LIMIT, COORD_LIMIT);
    let (sx, sy) = (clamp(start.x), clamp(start.y));
    let (ex, ey) = (clamp(end.x), clamp(end.y));

    let (dx, dy) = (ex - sx, ey - sy);
    let len = (dx * dx + dy * dy).sqrt();
    let (nx, ny) = if len > f32::EPSILON {
        (-dy / len, dx / len)
    } else {
        (0.0, 0.0)
    };

    let half = (width as f32 - 1.0) / 2.0;
    for i in 0..width {
        let offset = i as f32 - half;
        draw_line_segment_mut(
            canvas,
            (sx + nx * offset, sy + ny * offset),
            (ex + nx * offset, ey + ny * offset),
            pixel,
        );
    }
}

/// Pixel-space bounding box clipped to the canvas, as half-open ranges
fn bounds(poly: &[Point<i32>], width: u32, height: u32) -> (u32, u32, u32, u32) {
    let min_x = poly.iter().map(|p| p.x).min().unwrap_or(0).max(0) as u32;
    let min_y = poly.iter().map(|p| p.y).min().unwrap_or(0).max(0) as u32;
    let max_x = poly.iter().map(|p| p.x).max().unwrap_or(0).max(-1);
    let max_y = poly.iter().map(|p| p.y).max().unwrap_or(0).max(-1);
    let end_x = ((max_x + 1) as u32).min(width);
    let end_y = ((max_y + 1) as u32).min(height);
    (min_x.min(end_x), min_y.min(end_y), end_x, end_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f32, y0: f32, size: f32) -> Vec<Point2D> {
        vec![
            Point2D::new(x0, y0),
            Point2D::new(x0 + size, y0),
            Point2D::new(x0 + size, y0 + size),
            Point2D::new(x0, y0 + size),
        ]
    }

    #[test]
    fn test_opaque_fill() {
        let mut canvas = RgbImage::new(20, 20);
        assert!(fill_polygon(&mut canvas, &square(5.0, 5.0, 10.0), Color::RED, 1.0));
        assert_eq!(canvas.get_pixel(10, 10), &Rgb([255, 0, 0]));
        assert_eq!(canvas.get_pixel(1, 1), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_translucent_fill_blends() {
        let mut canvas = RgbImage::from_pixel(20, 20, Rgb([0, 0, 200]));
        fill_polygon(&mut canvas, &square(2.0, 2.0, 10.0), Color::RED, 0.5);
        let px = canvas.get_pixel(6, 6);
        assert!((120..=135).contains(&px[0]), "{px:?}");
        assert!((95..=105).contains(&px[2]), "{px:?}");
        assert_eq!(canvas.get_pixel(18, 18), &Rgb([0, 0, 200]));
    }

    #[test]
    fn test_degenerate_polygon_skipped() {
        let mut canvas = RgbImage::new(10, 10);
        let dot = vec![Point2D::new(3.2, 3.1); 4];
        assert!(!fill_polygon(&mut canvas, &dot, Color::RED, 1.0));

        let closed = vec![
            Point2D::new(1.0, 1.0),
            Point2D::new(8.0, 1.0),
            Point2D::new(8.0, 8.0),
            Point2D::new(1.0, 1.0),
        ];
        assert!(fill_polygon(&mut canvas, &closed, Color::RED, 1.0));
    }

    #[test]
    fn test_offscreen_polygon_is_harmless() {
        let mut canvas = RgbImage::new(10, 10);
        fill_polygon(&mut canvas, &square(-1e9, -1e9, 5e8), Color::RED, 0.5);
        fill_polygon(&mut canvas, &square(50.0, 50.0, 10.0), Color::RED, 1.0);
        assert!(canvas.pixels().all(|p| p.0 == [0, 0, 0]));
    }

    #[test]
    fn test_stroke_outline() {
        let mut canvas = RgbImage::new(20, 20);
        stroke_polygon(&mut canvas, &square(4.0, 4.0, 10.0), Color::GREEN, 2);
        assert_eq!(canvas.get_pixel(9, 4), &Rgb([0, 255, 0]));
        assert_eq!(canvas.get_pixel(9, 9), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_stroke_line() {
        let mut canvas = RgbImage::new(20, 20);
        stroke_line(&mut canvas, Point2D::new(2.0, 10.0), Point2D::new(17.0, 10.0), Color::BLUE, 1);
        assert_eq!(canvas.get_pixel(9, 10), &Rgb(Color::BLUE.to_array()));
        assert_eq!(canvas.get_pixel(9, 12), &Rgb([0, 0, 0]));

        stroke_line(&mut canvas, Point2D::new(f32::NAN, 0.0), Point2D::new(5.0, 5.0), Color::RED, 1);
        assert!(canvas.pixels().all(|p| p.0 != Color::RED.to_array()));
    }
}
