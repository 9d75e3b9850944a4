//! Presentation surfaces for composed images

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::RgbImage;
use tracing::debug;

/// Receives each tick's composed image
pub trait Presenter {
    fn present(&mut self, image: &RgbImage, tick: u64) -> Result<()>;
}

/// Writes numbered PNG snapshots into a directory
#[derive(Debug, Clone)]
pub struct PngPresenter {
    dir: PathBuf,
    prefix: String,
    every: u64,
    written: Vec<PathBuf>,
}

impl PngPresenter {
    /// Create the output directory if needed
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
        Ok(Self {
            dir,
            prefix: "frame".to_string(),
            every: 1,
            written: Vec::new(),
        })
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Only keep every n-th tick
    pub fn every(mut self, n: u64) -> Self {
        self.every = n.max(1);
        self
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn path_for(&self, tick: u64) -> PathBuf {
        self.dir.join(format!("{}_{:06}.png", self.prefix, tick))
    }
}

impl Presenter for PngPresenter {
    fn present(&mut self, image: &RgbImage, tick: u64) -> Result<()> {
        if tick % self.every != 0 {
            return Ok(());
        }
        let path = self.path_for(tick);
        image
            .save(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        debug!("Wrote {}", path.display());
        self.written.push(path);
        Ok(())
    }
}

/// Discards images, counting them
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter {
    pub presented: u64,
}

impl Presenter for NullPresenter {
    fn present(&mut self, _image: &RgbImage, _tick: u64) -> Result<()> {
        self.presented += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_png_presenter_writes_every_nth() {
        let dir = TempDir::new().unwrap();
        let mut presenter = PngPresenter::new(dir.path().join("out")).unwrap().every(2);
        let img = RgbImage::new(4, 4);
        for tick in 1..=5 {
            presenter.present(&img, tick).unwrap();
        }
        assert_eq!(presenter.written().len(), 2);
        assert!(presenter.path_for(4).is_file());
        assert!(!presenter.path_for(3).exists());
    }

    #[test]
    fn test_null_presenter_counts() {
        let mut presenter = NullPresenter::default();
        presenter.present(&RgbImage::new(1, 1), 1).unwrap();
        assert_eq!(presenter.presented, 1);
    }
}
