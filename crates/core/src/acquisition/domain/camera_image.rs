/// Orientation fix-up applied while converting a camera image to RGBA.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImageTransform {
    #[default]
    None,
    /// Mirror across the X axis: row order is reversed.
    MirrorX,
    /// Mirror across the Y axis: column order is reversed.
    MirrorY,
}

/// A CPU-readable camera image borrowed from the platform's image pool.
///
/// Dropping the handle releases it back to the pool, so holders must not
/// keep it beyond the conversion call.
pub trait CameraImage {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Writes the image as tightly packed RGBA into `out`, which is exactly
    /// `width * height * 4` bytes long.
    fn convert_rgba(
        &self,
        out: &mut [u8],
        transform: ImageTransform,
    ) -> Result<(), Box<dyn std::error::Error>>;
}

/// Copies packed RGBA pixels into `out`, applying `transform`.
///
/// Shared helper for `CameraImage` implementations whose native format is
/// already RGBA.
pub fn copy_rgba_with_transform(
    src: &[u8],
    width: u32,
    height: u32,
    out: &mut [u8],
    transform: ImageTransform,
) -> Result<(), Box<dyn std::error::Error>> {
    let w = width as usize;
    let h = height as usize;
    let row_len = w * 4;
    if src.len() != row_len * h || out.len() != row_len * h {
        return Err(format!(
            "RGBA buffer size mismatch: source {} bytes, output {} bytes, expected {}",
            src.len(),
            out.len(),
            row_len * h
        )
        .into());
    }

    match transform {
        ImageTransform::None => out.copy_from_slice(src),
        ImageTransform::MirrorX => {
            for y in 0..h {
                let src_row = &src[(h - 1 - y) * row_len..(h - y) * row_len];
                out[y * row_len..(y + 1) * row_len].copy_from_slice(src_row);
            }
        }
        ImageTransform::MirrorY => {
            for y in 0..h {
                for x in 0..w {
                    let s = y * row_len + (w - 1 - x) * 4;
                    let d = y * row_len + x * 4;
                    out[d..d + 4].copy_from_slice(&src[s..s + 4]);
                }
            }
        }
    }
    Ok(())
}
