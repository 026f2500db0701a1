use draw2d_core::{Bounds, Point};

/// Ellipse inscribed in a shape's bounding box
///
/// Cached from the location and recomputed whenever it changes, so
/// containment tests never lag behind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseGeometry {
    pub center: Point,
    pub rx: f64,
    pub ry: f64,
}

impl EllipseGeometry {
    pub fn inscribed(bounds: &Bounds) -> Self {
        Self {
            center: bounds.center(),
            rx: bounds.width / 2.0,
            ry: bounds.height / 2.0,
        }
    }

    /// Closed-interior test; a flattened ellipse contains nothing
    pub fn contains(&self, p: Point) -> bool {
        if self.rx <= 0.0 || self.ry <= 0.0 {
            return false;
        }
        let dx = (p.x - self.center.x) / self.rx;
        let dy = (p.y - self.center.y) / self.ry;
        dx * dx + dy * dy <= 1.0
    }
}
