use image::{ImageBuffer, Rgba};
use ndarray::ArrayView3;

/// Bytes per pixel of every frame handled by the pipeline (R, G, B, A).
pub const RGBA_CHANNELS: usize = 4;

/// One camera acquisition: contiguous RGBA bytes in row-major order.
///
/// Platform pixel formats are converted at the acquisition boundary only;
/// everything downstream sees RGBA.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            Self::byte_len(width, height),
            "data length must equal width * height * 4"
        );
        Self {
            data,
            width,
            height,
            index,
        }
    }

    /// Allocates a zeroed frame of the given size.
    pub fn blank(width: u32, height: u32) -> Self {
        Self::new(vec![0; Self::byte_len(width, height)], width, height, 0)
    }

    pub fn byte_len(width: u32, height: u32) -> usize {
        (width as usize) * (height as usize) * RGBA_CHANNELS
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn has_dimensions(&self, width: u32, height: u32) -> bool {
        self.width == width && self.height == height
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y as usize) * (self.width as usize) + x as usize) * RGBA_CHANNELS;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Drawable RGBA view over the frame's own pixels.
    pub fn as_image_mut(&mut self) -> ImageBuffer<Rgba<u8>, &mut [u8]> {
        ImageBuffer::from_raw(self.width, self.height, self.data.as_mut_slice())
            .expect("Frame data length must match dimensions")
    }

    fn shape(&self) -> (usize, usize, usize) {
        (self.height as usize, self.width as usize, RGBA_CHANNELS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 16]; // 2x2x4
        let frame = Frame::new(data.clone(), 2, 2, 5);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.index(), 5);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    fn test_blank_is_zeroed() {
        let frame = Frame::blank(3, 2);
        assert_eq!(frame.data().len(), 24);
        assert!(frame.data().iter().all(|&b| b == 0));
        assert!(frame.has_dimensions(3, 2));
        assert!(!frame.has_dimensions(2, 3));
    }

    #[test]
    fn test_empty_frame() {
        assert!(Frame::blank(0, 10).is_empty());
        assert!(!Frame::blank(1, 1).is_empty());
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * 4")]
    fn test_mismatched_data_length_panics_in_debug() {
        Frame::new(vec![0u8; 10], 2, 2, 0);
    }

    #[test]
    fn test_pixel_access() {
        let mut frame = Frame::blank(2, 2);
        // row=1, col=0
        frame.data_mut()[8..12].copy_from_slice(&[10, 20, 30, 255]);
        assert_eq!(frame.pixel(0, 1), [10, 20, 30, 255]);
        assert_eq!(frame.pixel(1, 1), [0, 0, 0, 0]);
    }

    #[test]
    fn test_as_ndarray_shape() {
        let frame = Frame::blank(4, 2);
        assert_eq!(frame.as_ndarray().shape(), &[2, 4, 4]); // (height, width, channels)
    }

    #[test]
    fn test_as_image_mut_writes_through() {
        let mut frame = Frame::blank(2, 2);
        frame.as_image_mut().put_pixel(1, 0, Rgba([1, 2, 128, 255]));
        assert_eq!(frame.pixel(1, 0), [1, 2, 128, 255]);
    }
}
