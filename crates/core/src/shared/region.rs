/// Integer pixel coordinate inside a frame or mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding rectangle, inclusive of its top-left pixel and
/// `width`/`height` pixels wide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Smallest rectangle covering every point; `None` for an empty slice.
    pub fn bounding(points: &[PixelPoint]) -> Option<Rect> {
        let first = points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Rect {
            x: min_x,
            y: min_y,
            width: max_x - min_x + 1,
            height: max_y - min_y + 1,
        })
    }

    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }

    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x as f64
            && y >= self.y as f64
            && x < (self.x + self.width) as f64
            && y < (self.y + self.height) as f64
    }
}

/// One connected skin area found in a frame.
///
/// `contour` holds the outer boundary with straight runs collapsed to
/// their end points; `area` is the polygon area enclosed by that boundary.
#[derive(Clone, Debug, PartialEq)]
pub struct SkinRegion {
    pub contour: Vec<PixelPoint>,
    pub bounds: Rect,
    pub area: f64,
}

impl SkinRegion {
    /// Builds a region from a traced contour. Returns `None` when the
    /// contour has no points.
    pub fn from_contour(contour: Vec<PixelPoint>) -> Option<Self> {
        let bounds = Rect::bounding(&contour)?;
        let area = polygon_area(&contour);
        Some(Self {
            contour,
            bounds,
            area,
        })
    }

    /// Centre of the bounding rectangle in image pixel coordinates.
    pub fn center(&self) -> (f64, f64) {
        self.bounds.center()
    }
}

/// Shoelace area of a closed polygon. Degenerate polygons (points, lines)
/// have zero area.
pub fn polygon_area(points: &[PixelPoint]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice: i64 = 0;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        twice += p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64;
    }
    (twice as f64 / 2.0).abs()
}
