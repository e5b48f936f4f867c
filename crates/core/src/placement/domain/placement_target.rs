use crate::shared::geometry::Vec3;

/// Receives skin anchors resolved to world space.
pub trait PlacementTarget: Send {
    /// Put the active decal at `position`, facing along `normal`.
    fn place_on_skin(&mut self, position: Vec3, normal: Vec3);
}
