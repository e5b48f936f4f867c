use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::acquisition::domain::camera_image::{
    copy_rgba_with_transform, CameraImage, ImageTransform,
};
use crate::acquisition::domain::camera_image_source::CameraImageSource;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Plays a list of image files back as a camera feed, one file per frame.
///
/// Lets the per-frame pipeline run offline on stills; each call decodes
/// the next file with the `image` crate.
pub struct ImageFileSource {
    pending: VecDeque<PathBuf>,
    total: usize,
}

impl ImageFileSource {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        let total = paths.len();
        Self {
            pending: paths.into(),
            total,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Path of the file the next acquisition will decode.
    pub fn peek(&self) -> Option<&Path> {
        self.pending.front().map(PathBuf::as_path)
    }
}

/// A decoded still, already in RGBA.
pub struct DecodedImage {
    pixels: image::RgbaImage,
}

impl DecodedImage {
    pub fn new(pixels: image::RgbaImage) -> Self {
        Self { pixels }
    }
}

impl CameraImage for DecodedImage {
    fn width(&self) -> u32 {
        self.pixels.width()
    }

    fn height(&self) -> u32 {
        self.pixels.height()
    }

    fn convert_rgba(
        &self,
        out: &mut [u8],
        transform: ImageTransform,
    ) -> Result<(), Box<dyn std::error::Error>> {
        copy_rgba_with_transform(
            self.pixels.as_raw(),
            self.pixels.width(),
            self.pixels.height(),
            out,
            transform,
        )
    }
}

impl CameraImageSource for ImageFileSource {
    fn try_acquire_latest(
        &mut self,
    ) -> Result<Option<Box<dyn CameraImage + '_>>, Box<dyn std::error::Error>> {
        let Some(path) = self.pending.pop_front() else {
            return Ok(None);
        };
        let decoded = image::open(&path).map_err(|source| SourceError::Decode {
            path: path.clone(),
            source,
        })?;
        log::debug!(
            "Decoded {} ({}x{})",
            path.display(),
            decoded.width(),
            decoded.height()
        );
        Ok(Some(Box::new(DecodedImage::new(decoded.into_rgba8()))))
    }
}
