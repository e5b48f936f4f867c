use image::Rgba;
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect as Outline;

use crate::shared::frame::Frame;
use crate::shared::region::{Rect, SkinRegion};

/// Draws each region's bounding rectangle onto the frame.
///
/// Strokes grow inward from the rectangle edge and are clipped to the frame.
pub fn draw_regions(frame: &mut Frame, regions: &[SkinRegion], color: [u8; 4], thickness: u32) {
    for region in regions {
        draw_rect_outline(frame, region.bounds, color, thickness);
    }
}

pub fn draw_rect_outline(frame: &mut Frame, rect: Rect, color: [u8; 4], thickness: u32) {
    let mut canvas = frame.as_image_mut();
    for layer in 0..thickness as i32 {
        let (width, height) = (rect.width - 2 * layer, rect.height - 2 * layer);
        if width <= 0 || height <= 0 {
            break;
        }
        let outline =
            Outline::at(rect.x + layer, rect.y + layer).of_size(width as u32, height as u32);
        draw_hollow_rect_mut(&mut canvas, outline, Rgba(color));
    }
}
