use std::thread;
use std::time::{Duration, Instant};

use roomar::demo::{ColorKeyDetector, SyntheticCamera, SYNTHETIC_MARKERS};
use roomar::{Notice, PngPresenter, Renderer, RendererOptions, TickOutput, ViewMode};
use roomar_core::{Color, Room, RoomDimensions, VirtualCamera, Viewport};
use roomar_vision::{FrameSource, MarkerBindings, MarkerBridge};
use tempfile::TempDir;

const WIDTH: u32 = 160;
const HEIGHT: u32 = 120;

fn ar_renderer(device_index: u32) -> Renderer {
    let options = RendererOptions {
        camera: VirtualCamera::perspective(60.0, Viewport::new(WIDTH, HEIGHT)),
        ..RendererOptions::default()
    };
    Renderer::new(
        Room::new(RoomDimensions::default()).unwrap(),
        options,
        MarkerBridge::new(ColorKeyDetector::default()),
        MarkerBindings::default(),
    )
    .with_frame_source(FrameSource::new(SyntheticCamera::opener(
        device_index,
        WIDTH,
        HEIGHT,
    )))
}

/// Tick until `done` holds for an output, or give up after two seconds
fn tick_until(renderer: &mut Renderer, done: impl Fn(&TickOutput) -> bool) -> Option<TickOutput> {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        let output = renderer.tick();
        if done(&output) {
            return Some(output);
        }
        thread::sleep(Duration::from_millis(10));
    }
    None
}

fn key_color(id: i64) -> Color {
    SYNTHETIC_MARKERS
        .iter()
        .find(|(marker, _)| *marker == id)
        .map(|(_, color)| *color)
        .unwrap()
}

#[test]
fn test_overlays_only_for_bound_markers() {
    let mut renderer = ar_renderer(0);
    renderer.set_mode(ViewMode::Ar);

    let output = tick_until(&mut renderer, |o| o.detections.len() == 3).expect("markers detected");
    assert_eq!(output.mode, ViewMode::Ar);
    assert!(output.notices.is_empty());
    assert_eq!(output.image.dimensions(), (WIDTH, HEIGHT));

    let ids: Vec<u32> = output.detections.iter().map(|d| d.id).collect();
    assert!(ids.contains(&23) && ids.contains(&24) && ids.contains(&26));

    let bindings = MarkerBindings::default();
    let bound = ids.iter().filter(|id| bindings.get(**id).is_some()).count();
    assert_eq!(output.labels.len(), bound);
    for label in &output.labels {
        assert!(label.text.starts_with("Object: "), "{}", label.text);
    }

    for detection in &output.detections {
        let cx = detection.corners.iter().map(|p| p.x).sum::<f32>() / 4.0;
        let cy = detection.corners.iter().map(|p| p.y).sum::<f32>() / 4.0;
        let pixel = output.image.get_pixel(cx as u32, cy as u32).0;
        let key = key_color(detection.id as i64);

        match bindings.get(detection.id) {
            Some(binding) => assert_eq!(
                pixel,
                key.blend(&binding.color, 0.5).to_array(),
                "marker {}",
                detection.id
            ),
            None => assert_eq!(pixel, key.to_array(), "marker {}", detection.id),
        }
    }

    renderer.set_mode(ViewMode::Planner);
    let planner = renderer.tick();
    assert_eq!(planner.mode, ViewMode::Planner);
    assert!(planner.detections.is_empty());
    assert!(planner.labels.is_empty());
    assert!(planner.notices.is_empty());
}

#[test]
fn test_missing_camera_disables_ar_once() {
    let mut renderer = ar_renderer(7);
    renderer.set_mode(ViewMode::Ar);

    let output = tick_until(&mut renderer, |o| !o.notices.is_empty()).expect("unavailable notice");
    assert!(matches!(output.notices.as_slice(), [Notice::CameraUnavailable(_)]));
    assert!(!renderer.ar_available());
    assert_eq!(output.image.get_pixel(0, 0).0, Color::BACKDROP.to_array());

    renderer.set_mode(ViewMode::Planner);
    renderer.set_mode(ViewMode::Ar);
    for _ in 0..5 {
        assert!(renderer.tick().notices.is_empty());
    }
}

#[test]
fn test_run_writes_snapshots() {
    let dir = TempDir::new().unwrap();
    let mut presenter = PngPresenter::new(dir.path()).unwrap().with_prefix("ar").every(2);

    let mut renderer = ar_renderer(0);
    renderer.set_mode(ViewMode::Ar);
    let notices = renderer
        .run(&mut presenter, Some(6), Duration::from_millis(5))
        .unwrap();
    renderer.set_mode(ViewMode::Planner);

    assert!(notices.is_empty());
    assert_eq!(renderer.ticks(), 6);
    assert_eq!(presenter.written().len(), 3);
    for path in presenter.written() {
        let image = image::open(path).unwrap().to_rgb8();
        assert_eq!(image.dimensions(), (WIDTH, HEIGHT));
    }
}
