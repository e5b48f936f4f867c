//! 8-bit colour conversions used ahead of skin thresholding.
//!
//! YCrCb uses BT.601 luma weights with a chroma offset of 128, computed in
//! 14-bit fixed point so results match the common OpenCV conversion exactly.

use ndarray::ArrayView3;

const SHIFT: i32 = 14;
const ROUND: i32 = 1 << (SHIFT - 1);
const R2Y: i32 = 4899;
const G2Y: i32 = 9617;
const B2Y: i32 = 1868;
const CR_SCALE: i32 = 11682;
const CB_SCALE: i32 = 9241;
const CHROMA_DELTA: i32 = 128 << SHIFT;

/// Drops alpha and swaps R/B: RGBA → BGR. `src` is (height, width, 4);
/// `dst` is resized to fit.
pub fn rgba_to_bgr(src: ArrayView3<'_, u8>, dst: &mut Vec<u8>) {
    let (height, width, _) = src.dim();
    dst.resize(height * width * 3, 0);
    for (rgba, bgr) in src.rows().into_iter().zip(dst.chunks_exact_mut(3)) {
        bgr[0] = rgba[2];
        bgr[1] = rgba[1];
        bgr[2] = rgba[0];
    }
}

/// BGR → YCrCb, three bytes per pixel in (Y, Cr, Cb) order. `dst` is resized to fit.
pub fn bgr_to_ycrcb(src: &[u8], dst: &mut Vec<u8>) {
    dst.resize(src.len() / 3 * 3, 0);
    for (bgr, out) in src.chunks_exact(3).zip(dst.chunks_exact_mut(3)) {
        let [y, cr, cb] = ycrcb(bgr[2], bgr[1], bgr[0]);
        out[0] = y;
        out[1] = cr;
        out[2] = cb;
    }
}

/// Converts one RGB sample to (Y, Cr, Cb).
pub fn ycrcb(r: u8, g: u8, b: u8) -> [u8; 3] {
    let (r, g, b) = (r as i32, g as i32, b as i32);
    let y = descale(r * R2Y + g * G2Y + b * B2Y);
    let cr = descale((r - y) * CR_SCALE + CHROMA_DELTA);
    let cb = descale((b - y) * CB_SCALE + CHROMA_DELTA);
    [saturate(y), saturate(cr), saturate(cb)]
}

fn descale(value: i32) -> i32 {
    (value + ROUND) >> SHIFT
}

fn saturate(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::frame::Frame;
    use rstest::rstest;

    #[rstest]
    #[case::black((0, 0, 0), [0, 128, 128])]
    #[case::white((255, 255, 255), [255, 128, 128])]
    #[case::red((255, 0, 0), [76, 255, 85])]
    #[case::skin((224, 172, 150), [185, 156, 108])]
    #[case::blue_background((30, 60, 200), [67, 102, 203])]
    fn test_ycrcb_reference_values(#[case] rgb: (u8, u8, u8), #[case] expected: [u8; 3]) {
        assert_eq!(ycrcb(rgb.0, rgb.1, rgb.2), expected);
    }

    #[test]
    fn test_rgba_to_bgr_swaps_and_drops_alpha() {
        let frame = Frame::new(vec![1, 2, 3, 4, 5, 6, 7, 8], 2, 1, 0);
        let mut dst = Vec::new();
        rgba_to_bgr(frame.as_ndarray(), &mut dst);
        assert_eq!(dst, vec![3, 2, 1, 7, 6, 5]);
    }

    #[test]
    fn test_bgr_to_ycrcb_matches_scalar() {
        let mut dst = Vec::new();
        bgr_to_ycrcb(&[150, 172, 224, 0, 0, 0], &mut dst);
        assert_eq!(dst, vec![185, 156, 108, 0, 128, 128]);
    }

    #[test]
    fn test_buffers_are_resized_on_reuse() {
        let mut dst = vec![0; 100];
        rgba_to_bgr(Frame::blank(2, 1).as_ndarray(), &mut dst);
        assert_eq!(dst.len(), 6);
    }
}
