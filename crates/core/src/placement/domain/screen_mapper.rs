use crate::shared::geometry::ScreenPoint;

/// Maps image pixel coordinates onto the device screen.
///
/// The camera image is assumed to fill the screen, so mapping goes through
/// normalized `[0, 1]` coordinates and is then scaled to screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenMapper {
    screen_width: f64,
    screen_height: f64,
}

impl ScreenMapper {
    pub fn new(screen_width: f64, screen_height: f64) -> Self {
        Self {
            screen_width,
            screen_height,
        }
    }

    pub fn screen_size(&self) -> (f64, f64) {
        (self.screen_width, self.screen_height)
    }

    /// Image pixel to normalized coordinates. `None` for a zero-sized image.
    pub fn normalize(
        &self,
        point: (f64, f64),
        image_width: u32,
        image_height: u32,
    ) -> Option<(f64, f64)> {
        if image_width == 0 || image_height == 0 {
            return None;
        }
        Some((
            point.0 / image_width as f64,
            point.1 / image_height as f64,
        ))
    }

    pub fn to_screen(
        &self,
        point: (f64, f64),
        image_width: u32,
        image_height: u32,
    ) -> Option<ScreenPoint> {
        let (nx, ny) = self.normalize(point, image_width, image_height)?;
        Some(ScreenPoint::new(
            nx * self.screen_width,
            ny * self.screen_height,
        ))
    }
}
