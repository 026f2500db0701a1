use draw2d_core::{Bounds, Point};

/// A rectangle fills its whole bounding box
pub(super) fn contains(bounds: &Bounds, p: Point) -> bool {
    bounds.contains_point(p)
}
