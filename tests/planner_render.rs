use image::RgbImage;
use roomar::demo::ColorKeyDetector;
use roomar::{Renderer, RendererOptions};
use roomar_core::{
    Color, ObjectKind, OrbitRig, Point3D, PoseDelta, Room, RoomDimensions, VirtualCamera, Viewport,
};
use roomar_vision::{CompositorStyle, MarkerBindings, MarkerBridge};

fn top_down_renderer() -> Renderer {
    let options = RendererOptions {
        camera: VirtualCamera::perspective(60.0, Viewport::new(320, 240)),
        orbit: OrbitRig::new(Point3D::ORIGIN, 700.0, 0.0, 89.0),
        planner_style: CompositorStyle::planner()
            .with_shading(false)
            .with_outline(None),
        show_grid: false,
        ..RendererOptions::default()
    };
    let mut renderer = Renderer::new(
        Room::new(RoomDimensions::new(16.0, 16.0, 10.0)).unwrap(),
        options,
        MarkerBridge::new(ColorKeyDetector::default()),
        MarkerBindings::default(),
    );
    renderer.zoom(0.4);
    renderer
}

/// Bounding box (width, height) of pixels painted exactly `color`
fn extent_of(image: &RgbImage, color: Color) -> Option<(u32, u32)> {
    let target = color.to_array();
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, px) in image.enumerate_pixels() {
        if px.0 != target {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    bounds.map(|(x0, y0, x1, y1)| (x1 - x0 + 1, y1 - y0 + 1))
}

#[test]
fn test_empty_room_shows_floor() {
    let mut renderer = top_down_renderer();
    let image = renderer.tick().image;
    assert_eq!(image.get_pixel(160, 120).0, Color::FLOOR.to_array());
    assert!(extent_of(&image, Color::WOOD).is_none());
}

#[test]
fn test_rotating_desk_turns_its_footprint() {
    let mut renderer = top_down_renderer();
    let id = renderer.place(ObjectKind::Desk, Point3D::ORIGIN);

    let before = renderer.tick().image;
    let (w, h) = extent_of(&before, Color::WOOD).expect("desk top visible");
    assert!(w as f32 > 1.3 * h as f32, "unrotated desk {w}x{h}");

    renderer.update(id, &PoseDelta::rotate_degrees(90.0)).unwrap();
    let after = renderer.tick().image;
    assert_ne!(before, after);
    let (w2, h2) = extent_of(&after, Color::WOOD).expect("desk top visible");
    assert!(h2 as f32 > 1.3 * w2 as f32, "rotated desk {w2}x{h2}");

    // Undo restores the first picture
    assert!(renderer.undo());
    assert_eq!(renderer.tick().image, before);
}

#[test]
fn test_removed_object_disappears() {
    let mut renderer = top_down_renderer();
    let id = renderer.place(ObjectKind::Desk, Point3D::ORIGIN);
    assert!(extent_of(&renderer.tick().image, Color::WOOD).is_some());

    renderer.remove(id).unwrap();
    assert!(extent_of(&renderer.tick().image, Color::WOOD).is_none());
    assert!(renderer.remove(id).is_err());
}

#[test]
fn test_floor_grid_toggles() {
    let mut renderer = top_down_renderer();
    let plain = renderer.tick().image;
    assert!(extent_of(&plain, Color::GRID).is_none());
    assert!(extent_of(&plain, Color::GRID_AXIS).is_none());

    renderer.set_show_grid(true);
    let gridded = renderer.tick().image;
    let (gw, gh) = extent_of(&gridded, Color::GRID).expect("grid lines drawn");
    assert!(gw > 100 && gh > 100, "grid spans {gw}x{gh}");
    assert!(extent_of(&gridded, Color::GRID_AXIS).is_some());

    renderer.set_show_grid(false);
    assert_eq!(renderer.tick().image, plain);
}
