use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, error, info, warn};

use super::{CaptureEvent, CaptureSettings, DeviceOpener};
use crate::frame::Frame;

type Slot = Arc<Mutex<Option<Frame>>>;

/// Runs a capture device on its own thread and keeps only the newest frame.
pub struct FrameSource {
    opener: Arc<dyn DeviceOpener>,
    settings: CaptureSettings,
    slot: Slot,
    sequence: Arc<AtomicU64>,
    events_tx: Sender<CaptureEvent>,
    events_rx: Receiver<CaptureEvent>,
    worker: Option<Worker>,
}

struct Worker {
    stop: Arc<AtomicBool>,
    wake: Sender<()>,
    released: Receiver<()>,
    handle: JoinHandle<()>,
}

/// Everything the capture thread owns
struct CaptureLoop {
    opener: Arc<dyn DeviceOpener>,
    slot: Slot,
    sequence: Arc<AtomicU64>,
    stop: Arc<AtomicBool>,
    wake: Receiver<()>,
    events: Sender<CaptureEvent>,
    released: Sender<()>,
    poll_interval: Duration,
}

impl FrameSource {
    pub fn new(opener: impl DeviceOpener + 'static) -> Self {
        Self::with_settings(opener, CaptureSettings::default())
    }

    pub fn with_settings(opener: impl DeviceOpener + 'static, settings: CaptureSettings) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        Self {
            opener: Arc::new(opener),
            settings,
            slot: Arc::new(Mutex::new(None)),
            sequence: Arc::new(AtomicU64::new(0)),
            events_tx,
            events_rx,
            worker: None,
        }
    }

    pub fn settings(&self) -> CaptureSettings {
        self.settings
    }

    /// Spawn the capture thread. A second call while started does nothing,
    /// including after the device failed to open; `stop()` resets that.
    pub fn start(&mut self) {
        if self.worker.is_some() {
            debug!("Frame source already started");
            return;
        }

        let stop = Arc::new(AtomicBool::new(false));
        let (released_tx, released_rx) = mpsc::channel();
        let (wake_tx, wake_rx) = mpsc::channel();
        let capture = CaptureLoop {
            opener: Arc::clone(&self.opener),
            slot: Arc::clone(&self.slot),
            sequence: Arc::clone(&self.sequence),
            stop: Arc::clone(&stop),
            wake: wake_rx,
            events: self.events_tx.clone(),
            released: released_tx,
            poll_interval: self.settings.poll_interval,
        };

        match thread::Builder::new()
            .name("roomar-capture".to_string())
            .spawn(move || capture.run())
        {
            Ok(handle) => {
                info!("Frame source started");
                self.worker = Some(Worker {
                    stop,
                    wake: wake_tx,
                    released: released_rx,
                    handle,
                });
            }
            Err(e) => {
                error!("Failed to spawn capture thread: {}", e);
                let _ = self.events_tx.send(CaptureEvent::CameraUnavailable(
                    super::CaptureError::Unavailable(format!("capture thread: {e}")),
                ));
            }
        }
    }

    /// Ask the capture thread to release the device and wait for it, up to
    /// the shutdown timeout. On timeout the thread is detached; it drops the
    /// device itself once its blocking read returns.
    pub fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        worker.stop.store(true, Ordering::Release);
        // Cut the poll pause short; a thread that already exited ignores it
        let _ = worker.wake.send(());

        match worker.released.recv_timeout(self.settings.shutdown_timeout) {
            Ok(()) => {
                if worker.handle.join().is_err() {
                    warn!("Capture thread panicked during shutdown");
                }
                info!("Frame source stopped");
            }
            Err(RecvTimeoutError::Disconnected) => {
                // Thread died without confirming; join reaps it immediately.
                if worker.handle.join().is_err() {
                    warn!("Capture thread panicked");
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    "Capture thread did not release the device within {:?}; detaching",
                    self.settings.shutdown_timeout
                );
                let _ = self.events_tx.send(CaptureEvent::ShutdownTimeout);
            }
        }
        *lock(&self.slot) = None;
    }

    /// True while the capture thread is alive
    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|w| !w.handle.is_finished())
    }

    /// Newest captured frame. Never waits on the device.
    pub fn latest(&self) -> Option<Frame> {
        lock(&self.slot).clone()
    }

    /// Raw event channel, for callers that want to block or select on it
    pub fn events(&self) -> &Receiver<CaptureEvent> {
        &self.events_rx
    }

    /// All events raised since the last call
    pub fn drain_events(&self) -> Vec<CaptureEvent> {
        self.events_rx.try_iter().collect()
    }
}

impl Drop for FrameSource {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for FrameSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameSource")
            .field("settings", &self.settings)
            .field("running", &self.is_running())
            .field("sequence", &self.sequence.load(Ordering::Relaxed))
            .finish()
    }
}

impl CaptureLoop {
    fn run(self) {
        let mut device = match self.opener.open() {
            Ok(device) => device,
            Err(e) => {
                error!("{}", e);
                let _ = self.events.send(CaptureEvent::CameraUnavailable(e));
                let _ = self.released.send(());
                return;
            }
        };
        info!("Capture device opened");

        let mut failing = false;
        while !self.stop.load(Ordering::Acquire) {
            match device.read_frame() {
                Ok(pixels) => {
                    // A read that outlived stop() must not repopulate the slot.
                    if self.stop.load(Ordering::Acquire) {
                        break;
                    }
                    let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
                    *lock(&self.slot) = Some(Frame::new(sequence, pixels));
                    if failing {
                        info!("Capture recovered at frame {}", sequence);
                        failing = false;
                    }
                }
                Err(e) if !failing => {
                    warn!("{}; keeping previous frame", e);
                    failing = true;
                }
                Err(e) => debug!("{}", e),
            }
            match self.wake.recv_timeout(self.poll_interval) {
                Err(RecvTimeoutError::Timeout) => {}
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        drop(device);
        debug!("Capture device released");
        let _ = self.released.send(());
    }
}

fn lock(slot: &Mutex<Option<Frame>>) -> MutexGuard<'_, Option<Frame>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{CaptureDevice, CaptureError};
    use image::RgbImage;
    use std::time::Instant;

    struct Blank;

    impl CaptureDevice for Blank {
        fn read_frame(&mut self) -> Result<RgbImage, CaptureError> {
            Ok(RgbImage::new(2, 2))
        }
    }

    fn blank() -> Result<Box<dyn CaptureDevice>, CaptureError> {
        Ok(Box::new(Blank))
    }

    #[test]
    fn test_latest_none_before_start() {
        let source = FrameSource::new(blank);
        assert!(source.latest().is_none());
        assert!(!source.is_running());
    }

    #[test]
    fn test_stop_without_start_is_noop() {
        let mut source = FrameSource::new(blank);
        source.stop();
        assert!(source.drain_events().is_empty());
    }

    #[test]
    fn test_stop_clears_slot() {
        let mut source = FrameSource::new(blank);
        source.start();
        let deadline = Instant::now() + Duration::from_secs(2);
        while source.latest().is_none() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert!(source.latest().is_some());
        source.stop();
        assert!(source.latest().is_none());
        assert!(!source.is_running());
    }
}
