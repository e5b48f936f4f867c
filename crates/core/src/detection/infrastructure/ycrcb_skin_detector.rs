use crate::detection::domain::color_space::{bgr_to_ycrcb, rgba_to_bgr};
use crate::detection::domain::contour::find_external_contours;
use crate::detection::domain::morphology::{dilate, erode, gaussian_blur, gaussian_kernel_1d};
use crate::detection::domain::region_selector::filter_min_area;
use crate::detection::domain::skin_detector::SkinDetector;
use crate::detection::domain::skin_mask::{threshold_in_range, Mask};
use crate::shared::frame::Frame;
use crate::shared::region::SkinRegion;
use crate::shared::scan_config::ScanConfig;

/// Chroma-threshold skin detector.
///
/// RGBA → BGR → YCrCb, in-range threshold, blur, erode, dilate, external
/// contours. Intermediate buffers are kept between frames and resized when
/// the resolution changes; no detection state carries over.
pub struct YCrCbSkinDetector {
    config: ScanConfig,
    blur_kernel: Vec<f32>,
    bgr: Vec<u8>,
    ycrcb: Vec<u8>,
    mask: Mask,
    blur_temp: Vec<f32>,
}

impl YCrCbSkinDetector {
    pub fn new(config: ScanConfig) -> Self {
        let blur_kernel = gaussian_kernel_1d(config.blur_kernel);
        Self {
            config,
            blur_kernel,
            bgr: Vec::new(),
            ycrcb: Vec::new(),
            mask: Mask::default(),
            blur_temp: Vec::new(),
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Cleaned mask from the most recent call, for diagnostics.
    pub fn last_mask(&self) -> &Mask {
        &self.mask
    }
}

impl Default for YCrCbSkinDetector {
    fn default() -> Self {
        Self::new(ScanConfig::default())
    }
}

impl SkinDetector for YCrCbSkinDetector {
    fn detect_regions(
        &mut self,
        frame: &Frame,
    ) -> Result<Vec<SkinRegion>, Box<dyn std::error::Error>> {
        if frame.is_empty() {
            return Err("frame is empty".into());
        }
        if frame.data().len() != Frame::byte_len(frame.width(), frame.height()) {
            return Err(format!(
                "frame {} has {} bytes, expected {}",
                frame.index(),
                frame.data().len(),
                Frame::byte_len(frame.width(), frame.height())
            )
            .into());
        }
        let (width, height) = (frame.width() as usize, frame.height() as usize);

        rgba_to_bgr(frame.as_ndarray(), &mut self.bgr);
        bgr_to_ycrcb(&self.bgr, &mut self.ycrcb);
        threshold_in_range(
            &self.ycrcb,
            width,
            height,
            self.config.ycrcb_lower,
            self.config.ycrcb_upper,
            &mut self.mask,
        );

        gaussian_blur(&mut self.mask, &self.blur_kernel, &mut self.blur_temp);
        erode(
            &mut self.mask,
            self.config.morph_kernel,
            self.config.erode_iterations,
        );
        dilate(
            &mut self.mask,
            self.config.morph_kernel,
            self.config.dilate_iterations,
        );

        let regions: Vec<SkinRegion> = find_external_contours(&self.mask)
            .into_iter()
            .filter_map(SkinRegion::from_contour)
            .collect();
        let found = regions.len();
        let regions = filter_min_area(regions, self.config.min_region_area);
        log::debug!(
            "Frame {}: {} skin regions ({} above min area)",
            frame.index(),
            found,
            regions.len()
        );
        Ok(regions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::region_selector::select_largest;
    use crate::shared::region::Rect;
    use approx::assert_relative_eq;

    const SKIN: [u8; 4] = [224, 172, 150, 255];
    const BACKGROUND: [u8; 4] = [30, 60, 200, 255];

    fn background(width: u32, height: u32) -> Frame {
        let data = BACKGROUND.repeat((width * height) as usize);
        Frame::new(data, width, height, 0)
    }

    fn paint(frame: &mut Frame, rect: Rect, rgba: [u8; 4]) {
        let width = frame.width() as i32;
        let data = frame.data_mut();
        for y in rect.y..rect.y + rect.height {
            for x in rect.x..rect.x + rect.width {
                let i = ((y * width + x) * 4) as usize;
                data[i..i + 4].copy_from_slice(&rgba);
            }
        }
    }

    fn largest(detector: &mut YCrCbSkinDetector, frame: &Frame) -> Option<SkinRegion> {
        select_largest(&detector.regions_or_empty(frame)).cloned()
    }

    fn rect(x: i32, y: i32, width: i32, height: i32) -> Rect {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    #[test]
    fn test_background_only_detects_nothing() {
        let mut detector = YCrCbSkinDetector::default();
        let frame = background(64, 48);
        assert!(detector.detect_regions(&frame).unwrap().is_empty());
        assert!(largest(&mut detector, &frame).is_none());
    }

    #[test]
    fn test_single_rectangle_center_and_area() {
        let mut detector = YCrCbSkinDetector::default();
        let mut frame = background(100, 80);
        let skin = rect(20, 15, 40, 30);
        paint(&mut frame, skin, SKIN);

        let region = largest(&mut detector, &frame).unwrap();
        let (cx, cy) = region.center();
        assert!(skin.contains(cx, cy));
        // Blur + erode + dilate leaves the blob one pixel larger on each side.
        let pixel_area = skin.area() as f64;
        assert!(
            (region.area - pixel_area).abs() / pixel_area < 0.1,
            "area {} too far from {}",
            region.area,
            pixel_area
        );
        assert_eq!(region.bounds, rect(19, 14, 42, 32));
        assert_relative_eq!(region.area, 41.0 * 31.0);
    }

    #[test]
    fn test_selects_larger_of_two_rectangles() {
        let mut detector = YCrCbSkinDetector::default();

        // Small one first in raster order.
        let mut frame = background(120, 90);
        paint(&mut frame, rect(5, 5, 10, 10), SKIN);
        paint(&mut frame, rect(40, 30, 50, 40), SKIN);
        let region = largest(&mut detector, &frame).unwrap();
        let (cx, cy) = region.center();
        assert!(rect(40, 30, 50, 40).contains(cx, cy));

        // Large one first in raster order.
        let mut frame = background(120, 90);
        paint(&mut frame, rect(5, 5, 50, 40), SKIN);
        paint(&mut frame, rect(80, 60, 10, 10), SKIN);
        let region = largest(&mut detector, &frame).unwrap();
        let (cx, cy) = region.center();
        assert!(rect(5, 5, 50, 40).contains(cx, cy));
    }

    #[test]
    fn test_regions_reported_in_raster_order() {
        let mut detector = YCrCbSkinDetector::default();
        let mut frame = background(120, 90);
        paint(&mut frame, rect(70, 5, 20, 20), SKIN);
        paint(&mut frame, rect(10, 50, 20, 20), SKIN);
        let regions = detector.detect_regions(&frame).unwrap();
        assert_eq!(regions.len(), 2);
        assert!(regions[0].bounds.y < regions[1].bounds.y);
    }

    #[test]
    fn test_repeated_calls_are_deterministic() {
        let mut detector = YCrCbSkinDetector::default();
        let mut frame = background(80, 60);
        paint(&mut frame, rect(10, 10, 25, 20), SKIN);
        paint(&mut frame, rect(50, 30, 15, 15), SKIN);

        let first = detector.detect_regions(&frame).unwrap();
        let second = detector.detect_regions(&frame).unwrap();
        assert_eq!(first, second);
        let (a, b) = (largest(&mut detector, &frame), largest(&mut detector, &frame));
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_state_carries_between_frames() {
        let mut detector = YCrCbSkinDetector::default();
        let mut skin_frame = background(60, 60);
        paint(&mut skin_frame, rect(10, 10, 30, 30), SKIN);

        assert!(largest(&mut detector, &skin_frame).is_some());
        assert!(largest(&mut detector, &background(60, 60)).is_none());
        assert!(largest(&mut detector, &background(30, 20)).is_none());
    }

    #[test]
    fn test_speckle_does_not_outrank_real_skin() {
        let mut detector = YCrCbSkinDetector::default();
        let mut frame = background(80, 80);
        paint(&mut frame, rect(3, 3, 1, 1), SKIN);
        paint(&mut frame, rect(30, 30, 30, 30), SKIN);

        let regions = detector.detect_regions(&frame).unwrap();
        assert_eq!(regions.len(), 2);
        assert!(regions[0].area < regions[1].area);
        let selected = largest(&mut detector, &frame).unwrap();
        assert_eq!(selected.bounds, rect(29, 29, 32, 32));
    }

    #[test]
    fn test_min_region_area_filters_small_regions() {
        let mut detector = YCrCbSkinDetector::new(ScanConfig {
            min_region_area: 500.0,
            ..ScanConfig::default()
        });
        let mut frame = background(100, 100);
        paint(&mut frame, rect(5, 5, 10, 10), SKIN);
        assert!(largest(&mut detector, &frame).is_none());

        paint(&mut frame, rect(40, 40, 40, 40), SKIN);
        let regions = detector.detect_regions(&frame).unwrap();
        assert_eq!(regions.len(), 1);
    }

    #[test]
    fn test_empty_frame_is_error_and_detects_nothing() {
        let mut detector = YCrCbSkinDetector::default();
        let frame = Frame::blank(0, 0);
        assert!(detector.detect_regions(&frame).is_err());
        assert!(largest(&mut detector, &frame).is_none());
    }

    #[test]
    fn test_skin_covering_whole_frame() {
        let mut detector = YCrCbSkinDetector::default();
        let mut frame = background(30, 20);
        paint(&mut frame, rect(0, 0, 30, 20), SKIN);
        let region = largest(&mut detector, &frame).unwrap();
        assert_eq!(region.bounds, rect(0, 0, 30, 20));
        assert_relative_eq!(region.area, 29.0 * 19.0);
    }
}
