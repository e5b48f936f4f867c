//! External contour extraction from a binary mask.
//!
//! Border following (Suzuki and Abe) runs on a copy of the mask padded
//! with one background pixel on every side, so components touching the
//! image edge still get an outer border. Only top-level outer borders are
//! kept; components sitting inside another component's hole are skipped.
//! Borders are found in raster order of their top-left start pixel.

use image::{imageops, GrayImage};
use imageproc::contours::{find_contours, BorderType};

use crate::detection::domain::skin_mask::Mask;
use crate::shared::region::PixelPoint;

/// Neighbour offsets in clockwise order (y grows downward): E, SE, S, SW, W, NW, N, NE.
const DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Finds the outer boundary of every external component.
///
/// Returned contours keep only the points where the boundary changes
/// direction.
pub fn find_external_contours(mask: &Mask) -> Vec<Vec<PixelPoint>> {
    if mask.is_empty() {
        return Vec::new();
    }

    find_contours::<i32>(&padded(mask))
        .into_iter()
        .filter(|contour| contour.border_type == BorderType::Outer && contour.parent.is_none())
        .map(|contour| {
            let points: Vec<PixelPoint> = contour
                .points
                .iter()
                .map(|p| PixelPoint::new(p.x - 1, p.y - 1))
                .collect();
            compress(&points)
        })
        .collect()
}

/// Copy of the mask with a one-pixel background frame.
fn padded(mask: &Mask) -> GrayImage {
    let (width, height) = (mask.width() as u32, mask.height() as u32);
    let mut out = GrayImage::new(width + 2, height + 2);
    imageops::replace(&mut out, mask.as_image(), 1, 1);
    out
}

fn direction(from: PixelPoint, to: PixelPoint) -> usize {
    let delta = (to.x - from.x, to.y - from.y);
    DIRECTIONS
        .iter()
        .position(|&d| d == delta)
        .expect("contour points must be 8-neighbours")
}

/// Drops points lying in the middle of a straight horizontal, vertical or
/// diagonal run.
fn compress(points: &[PixelPoint]) -> Vec<PixelPoint> {
    let n = points.len();
    if n <= 2 {
        return points.to_vec();
    }
    let kept: Vec<PixelPoint> = (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            direction(prev, points[i]) != direction(points[i], next)
        })
        .map(|i| points[i])
        .collect();
    if kept.is_empty() {
        points[..1].to_vec()
    } else {
        kept
    }
}
