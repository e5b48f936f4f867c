use thiserror::Error;

use crate::acquisition::domain::camera_image::ImageTransform;
use crate::acquisition::domain::camera_image_source::CameraImageSource;
use crate::shared::frame::Frame;

#[derive(Error, Debug, PartialEq)]
pub enum AcquireError {
    #[error("camera source failed: {0}")]
    Source(String),
    #[error("camera image is empty ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    #[error("RGBA conversion failed: {0}")]
    Conversion(String),
}

/// Pulls the latest camera image and converts it into a reusable RGBA frame.
///
/// The image handle is dropped (released to the platform pool) right after
/// conversion, before any result is returned, on success and failure alike.
pub struct FrameAcquirer {
    transform: ImageTransform,
    buffer: Option<Frame>,
    next_index: usize,
}

impl FrameAcquirer {
    pub fn new(transform: ImageTransform) -> Self {
        Self {
            transform,
            buffer: None,
            next_index: 0,
        }
    }

    /// Returns `Ok(None)` when the source has no image this frame.
    pub fn acquire(
        &mut self,
        source: &mut dyn CameraImageSource,
    ) -> Result<Option<&Frame>, AcquireError> {
        let image = match source.try_acquire_latest() {
            Ok(Some(image)) => image,
            Ok(None) => return Ok(None),
            Err(e) => return Err(AcquireError::Source(e.to_string())),
        };

        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            drop(image);
            return Err(AcquireError::EmptyImage { width, height });
        }

        if !self
            .buffer
            .as_ref()
            .is_some_and(|frame| frame.has_dimensions(width, height))
        {
            log::debug!("Allocating {width}x{height} frame buffer");
            self.buffer = None;
        }
        let buffer = self
            .buffer
            .get_or_insert_with(|| Frame::blank(width, height));

        let converted = image.convert_rgba(buffer.data_mut(), self.transform);
        drop(image);
        converted.map_err(|e| AcquireError::Conversion(e.to_string()))?;

        buffer.set_index(self.next_index);
        self.next_index += 1;
        Ok(Some(&*buffer))
    }

    /// The most recently converted frame, if any.
    pub fn frame(&self) -> Option<&Frame> {
        self.buffer.as_ref()
    }

    /// Number of frames successfully converted so far.
    pub fn frames_acquired(&self) -> usize {
        self.next_index
    }
}

impl Default for FrameAcquirer {
    fn default() -> Self {
        Self::new(ImageTransform::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquisition::test_doubles::CountingSource;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Frame {
        let data = rgba.repeat((width * height) as usize);
        Frame::new(data, width, height, 0)
    }

    #[test]
    fn test_converts_and_releases() {
        let mut source = CountingSource::new(vec![Some(solid(4, 3, [10, 20, 30, 255]))]);
        let stats = source.stats.clone();
        let mut acquirer = FrameAcquirer::default();

        let frame = acquirer.acquire(&mut source).unwrap().unwrap();
        assert_eq!(frame.width(), 4);
        assert_eq!(frame.height(), 3);
        assert_eq!(frame.pixel(2, 1), [10, 20, 30, 255]);

        assert_eq!(stats.acquired(), 1);
        assert_eq!(stats.released(), 1);
        assert_eq!(stats.outstanding(), 0);
    }

    #[test]
    fn test_no_image_returns_none() {
        let mut source = CountingSource::new(vec![None]);
        let stats = source.stats.clone();
        let mut acquirer = FrameAcquirer::default();

        assert!(acquirer.acquire(&mut source).unwrap().is_none());
        assert_eq!(stats.acquired(), 0);
        assert_eq!(acquirer.frames_acquired(), 0);
    }

    #[test]
    fn test_empty_image_is_released() {
        let mut source = CountingSource::new(vec![Some(Frame::blank(0, 0))]);
        let stats = source.stats.clone();
        let mut acquirer = FrameAcquirer::default();

        let err = acquirer.acquire(&mut source).unwrap_err();
        assert_eq!(
            err,
            AcquireError::EmptyImage {
                width: 0,
                height: 0
            }
        );
        assert_eq!(stats.acquired(), 1);
        assert_eq!(stats.released(), 1);
    }

    #[test]
    fn test_failed_conversion_is_released() {
        let mut source =
            CountingSource::new(vec![Some(solid(2, 2, [0; 4]))]).with_failing_conversion();
        let stats = source.stats.clone();
        let mut acquirer = FrameAcquirer::default();

        let err = acquirer.acquire(&mut source).unwrap_err();
        assert!(matches!(err, AcquireError::Conversion(_)));
        assert_eq!(stats.outstanding(), 0);
        assert_eq!(stats.released(), 1);
    }

    #[test]
    fn test_buffer_reused_and_replaced_on_resolution_change() {
        let mut source = CountingSource::new(vec![
            Some(solid(4, 4, [1, 1, 1, 255])),
            Some(solid(4, 4, [2, 2, 2, 255])),
            Some(solid(8, 2, [3, 3, 3, 255])),
        ]);
        let mut acquirer = FrameAcquirer::default();

        let first_ptr = acquirer.acquire(&mut source).unwrap().unwrap().data().as_ptr();
        let second = acquirer.acquire(&mut source).unwrap().unwrap();
        assert_eq!(second.data().as_ptr(), first_ptr);
        assert_eq!(second.pixel(0, 0), [2, 2, 2, 255]);
        assert_eq!(second.index(), 1);

        let third = acquirer.acquire(&mut source).unwrap().unwrap();
        assert!(third.has_dimensions(8, 2));
        assert_eq!(third.index(), 2);
        assert_eq!(third.pixel(7, 1), [3, 3, 3, 255]);
    }

    #[test]
    fn test_failed_conversion_after_resize_keeps_new_buffer_size() {
        let mut source = CountingSource::new(vec![Some(solid(4, 4, [1, 1, 1, 255]))]);
        let mut acquirer = FrameAcquirer::default();
        acquirer.acquire(&mut source).unwrap();

        let mut failing =
            CountingSource::new(vec![Some(solid(6, 3, [0; 4]))]).with_failing_conversion();
        assert!(acquirer.acquire(&mut failing).is_err());
        assert!(acquirer.frame().unwrap().has_dimensions(6, 3));
        assert_eq!(acquirer.frames_acquired(), 1);
    }

    #[test]
    fn test_transform_is_applied() {
        let mut frame = Frame::blank(2, 1);
        frame.data_mut()[..4].copy_from_slice(&[9, 9, 9, 255]);
        let mut source = CountingSource::new(vec![Some(frame)]);
        let mut acquirer = FrameAcquirer::new(ImageTransform::MirrorY);

        let out = acquirer.acquire(&mut source).unwrap().unwrap();
        assert_eq!(out.pixel(0, 0), [0, 0, 0, 0]);
        assert_eq!(out.pixel(1, 0), [9, 9, 9, 255]);
    }
}
