use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::region::SkinRegion;

/// Persists a debug view of a frame with its detected regions outlined.
pub trait OverlayWriter: Send {
    /// Writes `frame` with every region's bounds drawn on it. The frame
    /// itself is left untouched.
    fn write(
        &self,
        path: &Path,
        frame: &Frame,
        regions: &[SkinRegion],
    ) -> Result<(), Box<dyn std::error::Error>>;
}
