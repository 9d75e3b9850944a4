//! Replays still images from a directory as a camera feed

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use image::RgbImage;
use roomar_vision::{CaptureDevice, CaptureError, DeviceOpener};
use tracing::debug;
use walkdir::WalkDir;

const EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Cycles through the images in a directory, in file name order
#[derive(Debug, Clone)]
pub struct ImageDirCamera {
    files: Vec<PathBuf>,
    next: usize,
    frame_interval: Duration,
}

impl ImageDirCamera {
    /// Scan `dir` (not recursive) for PNG and JPEG files
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, CaptureError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(CaptureError::Unavailable(format!(
                "{} is not a directory",
                dir.display()
            )));
        }

        let files: Vec<PathBuf> = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| has_image_extension(path))
            .collect();

        if files.is_empty() {
            return Err(CaptureError::Unavailable(format!(
                "no images found in {}",
                dir.display()
            )));
        }
        debug!("Replaying {} image(s) from {}", files.len(), dir.display());

        Ok(Self {
            files,
            next: 0,
            frame_interval: Duration::from_millis(33),
        })
    }

    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Opener that rescans `dir` each time capture starts
    pub fn opener(dir: impl Into<PathBuf>) -> impl DeviceOpener + 'static {
        let dir = dir.into();
        move || -> Result<Box<dyn CaptureDevice>, CaptureError> {
            Ok(Box::new(ImageDirCamera::open(&dir)?))
        }
    }
}

impl CaptureDevice for ImageDirCamera {
    fn read_frame(&mut self) -> Result<RgbImage, CaptureError> {
        thread::sleep(self.frame_interval);
        let path = &self.files[self.next % self.files.len()];
        self.next = (self.next + 1) % self.files.len();
        image::open(path)
            .map(|img| img.to_rgb8())
            .map_err(|e| CaptureError::ReadFailed(format!("{}: {}", path.display(), e)))
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use tempfile::TempDir;

    #[test]
    fn test_replays_in_name_order() {
        let dir = TempDir::new().unwrap();
        RgbImage::from_pixel(2, 2, Rgb([200, 0, 0]))
            .save(dir.path().join("b.png"))
            .unwrap();
        RgbImage::from_pixel(2, 2, Rgb([0, 200, 0]))
            .save(dir.path().join("a.png"))
            .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut cam = ImageDirCamera::open(dir.path())
            .unwrap()
            .with_frame_interval(Duration::ZERO);
        assert_eq!(cam.files().len(), 2);
        assert_eq!(cam.read_frame().unwrap().get_pixel(0, 0), &Rgb([0, 200, 0]));
        assert_eq!(cam.read_frame().unwrap().get_pixel(0, 0), &Rgb([200, 0, 0]));
        assert_eq!(cam.read_frame().unwrap().get_pixel(0, 0), &Rgb([0, 200, 0]));
    }

    #[test]
    fn test_empty_dir_is_unavailable() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            ImageDirCamera::open(dir.path()),
            Err(CaptureError::Unavailable(_))
        ));
    }

    #[test]
    fn test_corrupt_file_is_read_failure() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("broken.png"), b"not a png").unwrap();
        let mut cam = ImageDirCamera::open(dir.path())
            .unwrap()
            .with_frame_interval(Duration::ZERO);
        assert!(matches!(cam.read_frame(), Err(CaptureError::ReadFailed(_))));
    }
}
