use image::GrayImage;
use imageproc::morphology::{grayscale_dilate, grayscale_erode, Mask as StructuringElement};

use crate::detection::domain::skin_mask::Mask;

/// 1D Gaussian kernel of odd size.
///
/// Sizes up to 7 use the fixed binomial-style kernels OpenCV picks for
/// sigma 0; larger sizes derive sigma as `0.3 * ((k - 1) * 0.5 - 1) + 0.8`.
pub fn gaussian_kernel_1d(kernel_size: usize) -> Vec<f32> {
    debug_assert!(kernel_size >= 1 && kernel_size % 2 == 1);
    match kernel_size {
        1 => vec![1.0],
        3 => vec![0.25, 0.5, 0.25],
        5 => vec![0.0625, 0.25, 0.375, 0.25, 0.0625],
        7 => vec![
            0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125,
        ],
        _ => {
            let sigma = 0.3 * ((kernel_size as f64 - 1.0) * 0.5 - 1.0) + 0.8;
            let half = (kernel_size / 2) as f64;
            let weights: Vec<f64> = (0..kernel_size)
                .map(|i| {
                    let x = i as f64 - half;
                    (-x * x / (2.0 * sigma * sigma)).exp()
                })
                .collect();
            let sum: f64 = weights.iter().sum();
            weights.iter().map(|&w| (w / sum) as f32).collect()
        }
    }
}

/// Mirrors an out-of-range index back inside `0..len` without repeating
/// the edge sample (`dcb|abcd|cba` style).
fn reflect_101(i: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let last = len as isize - 1;
    let mut i = i;
    while i < 0 || i > last {
        i = if i < 0 { -i } else { 2 * last - i };
    }
    i as usize
}

/// Separable Gaussian blur of the mask in place, reusing `temp`.
pub fn gaussian_blur(mask: &mut Mask, kernel: &[f32], temp: &mut Vec<f32>) {
    let (width, height) = (mask.width(), mask.height());
    if kernel.len() <= 1 || width == 0 || height == 0 {
        return;
    }
    let half = (kernel.len() / 2) as isize;
    temp.resize(width * height, 0.0);

    let data = mask.data_mut();
    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0f32;
            for (k, &w) in kernel.iter().enumerate() {
                let sx = reflect_101(x as isize + k as isize - half, width);
                sum += data[y * width + sx] as f32 * w;
            }
            temp[y * width + x] = sum;
        }
    }

    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0f32;
            for (k, &w) in kernel.iter().enumerate() {
                let sy = reflect_101(y as isize + k as isize - half, height);
                sum += temp[sy * width + x] * w;
            }
            data[y * width + x] = (sum + 0.5).clamp(0.0, 255.0) as u8;
        }
    }
}

/// Erosion with a square `kernel_size` structuring element, applied
/// `iterations` times.
///
/// Pixels outside the grid never erode the edge.
pub fn erode(mask: &mut Mask, kernel_size: usize, iterations: usize) {
    apply_repeatedly(mask, kernel_size, iterations, grayscale_erode);
}

/// Dilation with a square `kernel_size` structuring element, applied
/// `iterations` times.
///
/// Pixels outside the grid never dilate the edge.
pub fn dilate(mask: &mut Mask, kernel_size: usize, iterations: usize) {
    apply_repeatedly(mask, kernel_size, iterations, grayscale_dilate);
}

fn apply_repeatedly(
    mask: &mut Mask,
    kernel_size: usize,
    iterations: usize,
    operation: fn(&GrayImage, &StructuringElement) -> GrayImage,
) {
    if iterations == 0 || mask.is_empty() {
        return;
    }
    let Some(element) = square_element(kernel_size) else {
        return;
    };
    let mut image = operation(mask.as_image(), &element);
    for _ in 1..iterations {
        image = operation(&image, &element);
    }
    *mask = Mask::from_image(image);
}

/// `None` for the identity kernel or a radius that does not fit the element.
fn square_element(kernel_size: usize) -> Option<StructuringElement> {
    if kernel_size <= 1 {
        return None;
    }
    u8::try_from(kernel_size / 2)
        .ok()
        .map(StructuringElement::square)
}
