use crate::placement::domain::surface_locator::SurfaceLocator;
use crate::shared::geometry::{Pose, ScreenPoint, Vec3};

const PARALLEL_EPSILON: f64 = 1e-9;

/// Surface locator for a single infinite plane seen by a pinhole camera.
///
/// The camera sits at the origin looking down −Z with +Y up. Screen pixels
/// are turned into rays using the vertical field of view and the screen's
/// centre as principal point (square pixels).
pub struct FixedPlaneLocator {
    screen_width: f64,
    screen_height: f64,
    focal_px: f64,
    plane_point: Vec3,
    plane_normal: Vec3,
}

impl FixedPlaneLocator {
    /// Returns `None` for a degenerate screen, field of view or normal.
    pub fn new(
        screen_width: f64,
        screen_height: f64,
        vertical_fov_degrees: f64,
        plane_point: Vec3,
        plane_normal: Vec3,
    ) -> Option<Self> {
        if !(screen_width > 0.0 && screen_height > 0.0) {
            return None;
        }
        if !(vertical_fov_degrees > 0.0 && vertical_fov_degrees < 180.0) {
            return None;
        }
        let half_fov = (vertical_fov_degrees / 2.0).to_radians();
        Some(Self {
            screen_width,
            screen_height,
            focal_px: (screen_height / 2.0) / half_fov.tan(),
            plane_point,
            plane_normal: plane_normal.normalized()?,
        })
    }

    /// A plane `distance` metres in front of the camera, facing it.
    pub fn facing_camera(
        screen_width: f64,
        screen_height: f64,
        vertical_fov_degrees: f64,
        distance: f64,
    ) -> Option<Self> {
        Self::new(
            screen_width,
            screen_height,
            vertical_fov_degrees,
            Vec3::new(0.0, 0.0, -distance),
            Vec3::new(0.0, 0.0, 1.0),
        )
    }

    /// Camera-space direction of the ray through a screen pixel.
    pub fn ray_direction(&self, point: ScreenPoint) -> Vec3 {
        Vec3::new(
            (point.x - self.screen_width / 2.0) / self.focal_px,
            -(point.y - self.screen_height / 2.0) / self.focal_px,
            -1.0,
        )
    }
}

impl SurfaceLocator for FixedPlaneLocator {
    fn hit_test(&mut self, point: ScreenPoint) -> Option<Pose> {
        let direction = self.ray_direction(point);
        let denom = self.plane_normal.dot(direction);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        let t = self.plane_normal.dot(self.plane_point) / denom;
        if t <= 0.0 {
            return None;
        }
        Some(Pose {
            position: direction * t,
            up: self.plane_normal,
        })
    }
}
