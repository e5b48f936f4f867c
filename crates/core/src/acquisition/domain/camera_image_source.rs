use crate::acquisition::domain::camera_image::CameraImage;

/// Supplies the latest camera image, if one is ready.
///
/// The returned handle borrows the source, so a second image cannot be
/// acquired until the first has been dropped (released).
pub trait CameraImageSource: Send {
    /// `Ok(None)` means no new image is available this frame.
    #[allow(clippy::type_complexity)]
    fn try_acquire_latest(
        &mut self,
    ) -> Result<Option<Box<dyn CameraImage + '_>>, Box<dyn std::error::Error>>;
}
