use std::path::Path;

use crate::detection::domain::overlay_writer::OverlayWriter;
use crate::detection::domain::region_overlay::draw_regions;
use crate::shared::constants::{OVERLAY_COLOR, OVERLAY_THICKNESS};
use crate::shared::frame::Frame;
use crate::shared::region::SkinRegion;

/// Saves overlays with the `image` crate; the format follows the file extension.
pub struct ImageOverlayWriter {
    color: [u8; 4],
    thickness: u32,
}

impl ImageOverlayWriter {
    pub fn new() -> Self {
        Self {
            color: OVERLAY_COLOR,
            thickness: OVERLAY_THICKNESS,
        }
    }
}

impl Default for ImageOverlayWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayWriter for ImageOverlayWriter {
    fn write(
        &self,
        path: &Path,
        frame: &Frame,
        regions: &[SkinRegion],
    ) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut annotated = frame.clone();
        draw_regions(&mut annotated, regions, self.color, self.thickness);

        let img = image::RgbaImage::from_raw(
            annotated.width(),
            annotated.height(),
            annotated.data().to_vec(),
        )
        .ok_or("Frame data does not match its dimensions")?;
        img.save(path)?;
        log::debug!(
            "Wrote overlay with {} regions to {}",
            regions.len(),
            path.display()
        );
        Ok(())
    }
}
