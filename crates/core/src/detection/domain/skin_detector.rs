use crate::shared::frame::Frame;
use crate::shared::region::SkinRegion;

/// Domain interface for per-frame skin detection.
///
/// Implementations may keep scratch buffers between calls (`&mut self`),
/// but results must depend on the current frame only.
pub trait SkinDetector: Send {
    /// Every skin region in the frame, in extraction order.
    fn detect_regions(&mut self, frame: &Frame)
        -> Result<Vec<SkinRegion>, Box<dyn std::error::Error>>;

    /// Like `detect_regions`, but a failing stage counts as "nothing found"
    /// for this frame. The error is logged and not propagated.
    fn regions_or_empty(&mut self, frame: &Frame) -> Vec<SkinRegion> {
        self.detect_regions(frame).unwrap_or_else(|e| {
            log::warn!("Skin detection failed on frame {}: {e}", frame.index());
            Vec::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::region::{PixelPoint, Rect};

    struct FixedDetector {
        result: Option<Vec<SkinRegion>>,
    }

    impl SkinDetector for FixedDetector {
        fn detect_regions(
            &mut self,
            _frame: &Frame,
        ) -> Result<Vec<SkinRegion>, Box<dyn std::error::Error>> {
            self.result.clone().ok_or_else(|| "stage failed".into())
        }
    }

    fn region(x: i32, area: f64) -> SkinRegion {
        SkinRegion {
            contour: vec![PixelPoint::new(x, 0)],
            bounds: Rect {
                x,
                y: 0,
                width: 1,
                height: 1,
            },
            area,
        }
    }

    #[test]
    fn test_regions_pass_through_in_order() {
        let mut detector = FixedDetector {
            result: Some(vec![region(0, 1.0), region(1, 9.0)]),
        };
        let regions = detector.regions_or_empty(&Frame::blank(2, 2));
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].bounds.x, 0);
        assert_eq!(regions[1].bounds.x, 1);
    }

    #[test]
    fn test_failure_becomes_no_regions() {
        let mut detector = FixedDetector { result: None };
        assert!(detector.regions_or_empty(&Frame::blank(2, 2)).is_empty());
    }
}
