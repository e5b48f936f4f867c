use crate::shared::region::SkinRegion;

/// Picks the region with the largest contour area.
///
/// Equal areas keep the earlier region, i.e. the one whose contour was
/// extracted first.
pub fn select_largest(regions: &[SkinRegion]) -> Option<&SkinRegion> {
    let mut best: Option<&SkinRegion> = None;
    for region in regions {
        match best {
            Some(current) if region.area <= current.area => {}
            _ => best = Some(region),
        }
    }
    best
}

/// Keeps regions whose area is at least `min_area`.
pub fn filter_min_area(regions: Vec<SkinRegion>, min_area: f64) -> Vec<SkinRegion> {
    if min_area <= 0.0 {
        return regions;
    }
    regions.into_iter().filter(|r| r.area >= min_area).collect()
}
