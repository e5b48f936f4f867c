pub mod image_overlay_writer;
pub mod ycrcb_skin_detector;
