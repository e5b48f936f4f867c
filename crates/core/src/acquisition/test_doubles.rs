//! Camera source double that checks the acquire/release discipline.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::acquisition::domain::camera_image::{
    copy_rgba_with_transform, CameraImage, ImageTransform,
};
use crate::acquisition::domain::camera_image_source::CameraImageSource;
use crate::shared::frame::Frame;

#[derive(Default)]
pub(crate) struct HandleStats {
    acquired: AtomicUsize,
    released: AtomicUsize,
    outstanding: AtomicUsize,
}

impl HandleStats {
    pub(crate) fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub(crate) fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    pub(crate) fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::SeqCst)
    }
}

/// Yields queued frames one per call; `None` entries simulate "no image".
pub(crate) struct CountingSource {
    frames: VecDeque<Option<Frame>>,
    fail_conversion: bool,
    pub(crate) stats: Arc<HandleStats>,
}

impl CountingSource {
    pub(crate) fn new(frames: Vec<Option<Frame>>) -> Self {
        Self {
            frames: frames.into(),
            fail_conversion: false,
            stats: Arc::new(HandleStats::default()),
        }
    }

    pub(crate) fn repeating(frame: Frame, times: usize) -> Self {
        Self::new(vec![Some(frame); times])
    }

    pub(crate) fn with_failing_conversion(mut self) -> Self {
        self.fail_conversion = true;
        self
    }
}

struct CountingImage {
    frame: Frame,
    fail_conversion: bool,
    stats: Arc<HandleStats>,
}

impl CameraImage for CountingImage {
    fn width(&self) -> u32 {
        self.frame.width()
    }

    fn height(&self) -> u32 {
        self.frame.height()
    }

    fn convert_rgba(
        &self,
        out: &mut [u8],
        transform: ImageTransform,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if self.fail_conversion {
            return Err("conversion failed".into());
        }
        copy_rgba_with_transform(
            self.frame.data(),
            self.frame.width(),
            self.frame.height(),
            out,
            transform,
        )
    }
}

impl Drop for CountingImage {
    fn drop(&mut self) {
        self.stats.outstanding.fetch_sub(1, Ordering::SeqCst);
        self.stats.released.fetch_add(1, Ordering::SeqCst);
    }
}

impl CameraImageSource for CountingSource {
    fn try_acquire_latest(
        &mut self,
    ) -> Result<Option<Box<dyn CameraImage + '_>>, Box<dyn std::error::Error>> {
        let Some(frame) = self.frames.pop_front().flatten() else {
            return Ok(None);
        };
        assert_eq!(
            self.stats.outstanding(),
            0,
            "image acquired twice without an intervening release"
        );
        self.stats.acquired.fetch_add(1, Ordering::SeqCst);
        self.stats.outstanding.fetch_add(1, Ordering::SeqCst);
        Ok(Some(Box::new(CountingImage {
            frame,
            fail_conversion: self.fail_conversion,
            stats: Arc::clone(&self.stats),
        })))
    }
}
