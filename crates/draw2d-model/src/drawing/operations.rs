//! Hit testing on a drawing.

use draw2d_core::{Bounds, Point};

use super::Drawing;
use crate::model::Shape;

impl Drawing {
    /// All shapes containing `p`, topmost first
    pub fn shapes_at(&self, p: Point) -> Vec<Shape> {
        self.shapes()
            .into_iter()
            .rev()
            .filter(|shape| shape.contains(p))
            .collect()
    }

    /// The topmost shape containing `p`
    pub fn topmost_shape_at(&self, p: Point) -> Option<Shape> {
        self.shapes().into_iter().rev().find(|shape| shape.contains(p))
    }

    /// Union of the member bounding boxes, `None` for an empty drawing
    pub fn bounds(&self) -> Option<Bounds> {
        let shapes = self.shapes();
        let mut boxes = shapes.iter().map(Shape::bounds);
        let first = boxes.next()?;
        let (min_x, min_y, max_x, max_y) = boxes.fold(
            (first.min_x(), first.min_y(), first.max_x(), first.max_y()),
            |(x1, y1, x2, y2), b| {
                (
                    x1.min(b.min_x()),
                    y1.min(b.min_y()),
                    x2.max(b.max_x()),
                    y2.max(b.max_y()),
                )
            },
        );
        Some(Bounds::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }
}
