use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use image::{Rgb, RgbImage};
use roomar_vision::{CaptureDevice, CaptureError, CaptureEvent, CaptureSettings, FrameSource};

fn wait_until(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(2));
    }
    cond()
}

fn fast_settings() -> CaptureSettings {
    CaptureSettings {
        poll_interval: Duration::from_millis(1),
        shutdown_timeout: Duration::from_secs(2),
    }
}

struct Counting {
    reads: u8,
}

impl CaptureDevice for Counting {
    fn read_frame(&mut self) -> Result<RgbImage, CaptureError> {
        self.reads = self.reads.wrapping_add(1);
        Ok(RgbImage::from_pixel(4, 4, Rgb([self.reads, 0, 0])))
    }
}

/// One good frame, then every read fails
struct Flaky {
    served: bool,
}

impl CaptureDevice for Flaky {
    fn read_frame(&mut self) -> Result<RgbImage, CaptureError> {
        if self.served {
            return Err(CaptureError::ReadFailed("usb hiccup".into()));
        }
        self.served = true;
        Ok(RgbImage::new(4, 4))
    }
}

/// One good frame, then reads block well past any shutdown timeout
struct Stuck {
    served: bool,
    blocking: Arc<AtomicBool>,
    dropped: Arc<AtomicBool>,
}

impl CaptureDevice for Stuck {
    fn read_frame(&mut self) -> Result<RgbImage, CaptureError> {
        if !self.served {
            self.served = true;
            return Ok(RgbImage::new(4, 4));
        }
        self.blocking.store(true, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(400));
        Ok(RgbImage::new(4, 4))
    }
}

impl Drop for Stuck {
    fn drop(&mut self) {
        self.dropped.store(true, Ordering::SeqCst);
    }
}

#[test]
fn test_frames_arrive_with_non_decreasing_sequence() {
    let mut source = FrameSource::with_settings(
        || Ok(Box::new(Counting { reads: 0 }) as Box<dyn CaptureDevice>),
        fast_settings(),
    );
    source.start();
    assert!(wait_until(Duration::from_secs(2), || source.latest().is_some()));

    let mut last = 0;
    for _ in 0..50 {
        if let Some(frame) = source.latest() {
            assert!(frame.sequence() >= last);
            last = frame.sequence();
        }
        thread::sleep(Duration::from_millis(1));
    }
    assert!(wait_until(Duration::from_secs(2), || {
        source.latest().is_some_and(|f| f.sequence() > last)
    }));
    source.stop();
}

#[test]
fn test_camera_unavailable_reported_once() {
    let mut source = FrameSource::with_settings(
        || -> Result<Box<dyn CaptureDevice>, CaptureError> {
            Err(CaptureError::Unavailable("no device at index 0".into()))
        },
        fast_settings(),
    );
    source.start();
    let mut events = Vec::new();
    assert!(wait_until(Duration::from_secs(2), || {
        events.extend(source.drain_events());
        !events.is_empty()
    }));

    source.start();
    thread::sleep(Duration::from_millis(50));
    events.extend(source.drain_events());

    assert_eq!(
        events,
        vec![CaptureEvent::CameraUnavailable(CaptureError::Unavailable(
            "no device at index 0".into()
        ))]
    );
    assert!(source.latest().is_none());
    assert!(!source.is_running());
}

#[test]
fn test_read_failure_keeps_stale_frame() {
    let mut source = FrameSource::with_settings(
        || Ok(Box::new(Flaky { served: false }) as Box<dyn CaptureDevice>),
        fast_settings(),
    );
    source.start();
    assert!(wait_until(Duration::from_secs(2), || source.latest().is_some()));
    thread::sleep(Duration::from_millis(50));

    let frame = source.latest().expect("stale frame still available");
    assert_eq!(frame.sequence(), 1);
    assert!(source.is_running());
    assert!(source.drain_events().is_empty());
}

#[test]
fn test_start_is_idempotent() {
    let opens = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&opens);
    let mut source = FrameSource::with_settings(
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(Counting { reads: 0 }) as Box<dyn CaptureDevice>)
        },
        fast_settings(),
    );
    source.start();
    source.start();
    assert!(wait_until(Duration::from_secs(2), || source.latest().is_some()));
    source.start();
    source.stop();
    assert_eq!(opens.load(Ordering::SeqCst), 1);

    // A fresh start after stop opens the device again
    source.start();
    assert!(wait_until(Duration::from_secs(2), || source.latest().is_some()));
    source.stop();
    assert_eq!(opens.load(Ordering::SeqCst), 2);
}

#[test]
fn test_shutdown_timeout_detaches_and_releases_later() {
    let blocking = Arc::new(AtomicBool::new(false));
    let dropped = Arc::new(AtomicBool::new(false));
    let (b, d) = (Arc::clone(&blocking), Arc::clone(&dropped));

    let mut source = FrameSource::with_settings(
        move || {
            Ok(Box::new(Stuck {
                served: false,
                blocking: Arc::clone(&b),
                dropped: Arc::clone(&d),
            }) as Box<dyn CaptureDevice>)
        },
        CaptureSettings {
            poll_interval: Duration::from_millis(1),
            shutdown_timeout: Duration::from_millis(50),
        },
    );
    source.start();
    assert!(wait_until(Duration::from_secs(2), || blocking.load(Ordering::SeqCst)));

    // latest() stays fast while the device is stuck in a read
    let started = Instant::now();
    for _ in 0..1000 {
        let _ = source.latest();
    }
    assert!(started.elapsed() < Duration::from_millis(200));

    let stop_started = Instant::now();
    source.stop();
    assert!(stop_started.elapsed() < Duration::from_millis(350));

    assert_eq!(source.drain_events(), vec![CaptureEvent::ShutdownTimeout]);
    assert!(source.latest().is_none());
    assert!(!dropped.load(Ordering::SeqCst));

    // The detached thread drops the device once its read returns
    assert!(wait_until(Duration::from_secs(2), || dropped.load(Ordering::SeqCst)));
    // ...and must not repopulate the slot on the way out
    assert!(source.latest().is_none());
}

/// Always succeeds; records when it is dropped
struct Tracked {
    dropped: Arc<AtomicBool>,
}

impl CaptureDevice for Tracked {
    fn read_frame(&mut self) -> Result<RgbImage, CaptureError> {
        Ok(RgbImage::new(4, 4))
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.dropped.store(true, Ordering::SeqCst);
    }
}

#[test]
fn test_stop_interrupts_long_poll_interval() {
    let dropped = Arc::new(AtomicBool::new(false));
    let d = Arc::clone(&dropped);
    let mut source = FrameSource::with_settings(
        move || {
            Ok(Box::new(Tracked {
                dropped: Arc::clone(&d),
            }) as Box<dyn CaptureDevice>)
        },
        CaptureSettings {
            poll_interval: Duration::from_millis(500),
            shutdown_timeout: Duration::from_millis(100),
        },
    );
    source.start();
    assert!(wait_until(Duration::from_secs(2), || source.latest().is_some()));

    let started = Instant::now();
    source.stop();
    assert!(started.elapsed() < Duration::from_millis(100));
    assert!(source.drain_events().is_empty());
    assert!(dropped.load(Ordering::SeqCst));
    assert!(!source.is_running());
}
