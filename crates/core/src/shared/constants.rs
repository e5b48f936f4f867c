/// Inclusive lower YCrCb bound (Y, Cr, Cb) of the skin range.
pub const SKIN_YCRCB_LOWER: [u8; 3] = [0, 133, 77];
/// Inclusive upper YCrCb bound (Y, Cr, Cb) of the skin range.
pub const SKIN_YCRCB_UPPER: [u8; 3] = [255, 173, 127];

pub const MASK_BLUR_KERNEL: usize = 3;
pub const MORPH_KERNEL: usize = 3;
/// Largest square structuring element (radius 255).
pub const MAX_MORPH_KERNEL: usize = 511;
pub const ERODE_ITERATIONS: usize = 1;
pub const DILATE_ITERATIONS: usize = 1;

/// Overlay colour (RGBA) and stroke width used for region debug drawing.
pub const OVERLAY_COLOR: [u8; 4] = [0, 255, 0, 255];
pub const OVERLAY_THICKNESS: u32 = 2;

/// Decal scale limits, in metres.
pub const DEFAULT_TATTOO_SCALE: f64 = 0.1;
pub const MIN_TATTOO_SCALE: f64 = 0.05;
pub const MAX_TATTOO_SCALE: f64 = 0.5;
/// Spin speed of the active decal while rotation is toggled on.
pub const ROTATION_DEGREES_PER_SECOND: f64 = 10.0;

/// How long to wait for camera permission before giving up (seconds).
pub const PERMISSION_TIMEOUT_SECS: u64 = 10;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
