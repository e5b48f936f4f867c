use crate::placement::domain::placement_target::PlacementTarget;
use crate::placement::domain::screen_mapper::ScreenMapper;
use crate::placement::domain::surface_locator::SurfaceLocator;
use crate::shared::geometry::{Pose, ScreenPoint};
use crate::shared::region::SkinRegion;

/// Turns a detected region into a world-space placement.
///
/// The region's centre is mapped to screen space and handed to the surface
/// locator. The placement target is only called when a surface is hit.
pub struct PlacementProjector {
    mapper: ScreenMapper,
}

impl PlacementProjector {
    pub fn new(mapper: ScreenMapper) -> Self {
        Self { mapper }
    }

    pub fn mapper(&self) -> &ScreenMapper {
        &self.mapper
    }

    /// Screen coordinate of the region's anchor point.
    pub fn anchor(
        &self,
        region: &SkinRegion,
        image_width: u32,
        image_height: u32,
    ) -> Option<ScreenPoint> {
        let center = region.center();
        self.mapper.to_screen(center, image_width, image_height)
    }

    pub fn project(
        &self,
        region: &SkinRegion,
        image_width: u32,
        image_height: u32,
        locator: &mut dyn SurfaceLocator,
    ) -> Option<Pose> {
        let anchor = self.anchor(region, image_width, image_height)?;
        let pose = locator.hit_test(anchor);
        if pose.is_none() {
            log::debug!(
                "No surface under anchor ({:.1}, {:.1})",
                anchor.x,
                anchor.y
            );
        }
        pose
    }

    /// Projects the region and, on a hit, places the decal there.
    pub fn project_and_place(
        &self,
        region: &SkinRegion,
        image_width: u32,
        image_height: u32,
        locator: &mut dyn SurfaceLocator,
        target: &mut dyn PlacementTarget,
    ) -> Option<Pose> {
        let pose = self.project(region, image_width, image_height, locator)?;
        target.place_on_skin(pose.position, pose.up);
        Some(pose)
    }
}
