use crate::shared::geometry::{Pose, ScreenPoint};

/// Domain interface for real-world surface queries.
///
/// Given a screen coordinate, returns where the ray through that pixel meets
/// a tracked surface, or `None` when nothing is hit.
pub trait SurfaceLocator: Send {
    fn hit_test(&mut self, point: ScreenPoint) -> Option<Pose>;
}
