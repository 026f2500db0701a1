//! Plain geometric value types shared by every layer
//!
//! This module provides:
//! - `Point`: a 2D coordinate in object space
//! - `Bounds`: a normalized axis-aligned rectangle (origin plus non-negative extents)
//! - `Color`: an RGBA color value

mod color;

pub use color::{Color, ColorParseError};

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in the continuous, unbounded 2D object coordinate system
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// Normalized axis-aligned rectangle
///
/// `width` and `height` are never negative when produced by
/// [`Location::bounds`](crate::Location::bounds). Containment is half-open:
/// the left and top edges belong to the rectangle, the right and bottom edges
/// do not, and a rectangle with zero width or height contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    /// Minimum X coordinate
    pub x: f64,
    /// Minimum Y coordinate
    pub y: f64,
    /// Extent along X
    pub width: f64,
    /// Extent along Y
    pub height: f64,
}

impl Bounds {
    /// Create bounds from an origin and extents
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn min_x(&self) -> f64 {
        self.x
    }

    pub fn min_y(&self) -> f64 {
        self.y
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Center of the rectangle
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// True if the rectangle encloses no area
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Half-open containment test
    pub fn contains(&self, x: f64, y: f64) -> bool {
        if self.is_empty() {
            return false;
        }
        x >= self.x && y >= self.y && x < self.max_x() && y < self.max_y()
    }

    /// Half-open containment test for a point
    pub fn contains_point(&self, p: Point) -> bool {
        self.contains(p.x, p.y)
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.3}, {:.3} {:.3}x{:.3}]",
            self.x, self.y, self.width, self.height
        )
    }
}
