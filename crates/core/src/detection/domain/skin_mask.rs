use image::{GrayImage, Luma};

/// Single-channel grid the size of a frame. 0 is background, anything
/// else counts as skin.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mask {
    image: GrayImage,
}

pub const MASK_ON: u8 = 255;

impl Mask {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            image: GrayImage::new(width as u32, height as u32),
        }
    }

    /// `None` unless `data` holds exactly `width * height` bytes.
    pub fn from_raw(data: Vec<u8>, width: usize, height: usize) -> Option<Self> {
        if data.len() != width * height {
            return None;
        }
        GrayImage::from_raw(width as u32, height as u32, data).map(Self::from_image)
    }

    pub fn from_image(image: GrayImage) -> Self {
        Self { image }
    }

    /// Clears the mask for reuse without reallocating when the size is unchanged.
    pub fn reset(&mut self, width: usize, height: usize) {
        if self.image.dimensions() == (width as u32, height as u32) {
            self.data_mut().fill(0);
        } else {
            self.image = GrayImage::new(width as u32, height as u32);
        }
    }

    pub fn width(&self) -> usize {
        self.image.width() as usize
    }

    pub fn height(&self) -> usize {
        self.image.height() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn as_image(&self) -> &GrayImage {
        &self.image
    }

    pub fn data(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.image
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.image.get_pixel(x as u32, y as u32).0[0]
    }

    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        self.image.put_pixel(x as u32, y as u32, Luma([value]));
    }

    /// Foreground test treating everything outside the grid as background.
    pub fn is_on(&self, x: i32, y: i32) -> bool {
        x >= 0
            && y >= 0
            && (x as usize) < self.width()
            && (y as usize) < self.height()
            && self.get(x as usize, y as usize) != 0
    }

    pub fn count_on(&self) -> usize {
        self.data().iter().filter(|&&v| v != 0).count()
    }
}

/// Marks every pixel whose three channels all fall inside the inclusive
/// `[lower, upper]` range.
pub fn threshold_in_range(
    pixels: &[u8],
    width: usize,
    height: usize,
    lower: [u8; 3],
    upper: [u8; 3],
    mask: &mut Mask,
) {
    mask.reset(width, height);
    for (px, out) in pixels.chunks_exact(3).zip(mask.data_mut().iter_mut()) {
        let inside = (0..3).all(|c| px[c] >= lower[c] && px[c] <= upper[c]);
        *out = if inside { MASK_ON } else { 0 };
    }
}
