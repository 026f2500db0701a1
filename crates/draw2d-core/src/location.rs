//! Order-independent rectangle described by two diagonal corners
//!
//! A `Location` stores `(x1, y1)` and `(x2, y2)` as given. Nothing forces
//! `x1 <= x2` or `y1 <= y2`; the normalized rectangle is computed on demand
//! by [`Location::bounds`]. The four corners are:
//!
//! ```text
//! Pt0 = (x1, y1)      Pt1 = (x2, y1)
//! Pt3 = (x1, y2)      Pt2 = (x2, y2)
//! ```
//!
//! Setting a corner writes exactly the two scalars it owns, so the diagonally
//! opposite corner never moves.

use crate::data::{Bounds, Point};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// One of the four corners of a [`Location`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    /// `(x1, y1)`
    Pt0,
    /// `(x2, y1)`
    Pt1,
    /// `(x2, y2)`
    Pt2,
    /// `(x1, y2)`
    Pt3,
}

impl Corner {
    /// All corners in index order
    pub const ALL: [Corner; 4] = [Corner::Pt0, Corner::Pt1, Corner::Pt2, Corner::Pt3];

    /// Index of this corner (0..=3)
    pub fn index(self) -> usize {
        match self {
            Corner::Pt0 => 0,
            Corner::Pt1 => 1,
            Corner::Pt2 => 2,
            Corner::Pt3 => 3,
        }
    }

    /// Corner for an index, `None` if the index is not in 0..=3
    pub fn from_index(index: usize) -> Option<Corner> {
        Corner::ALL.get(index).copied()
    }

    /// The diagonally opposite corner
    pub fn opposite(self) -> Corner {
        match self {
            Corner::Pt0 => Corner::Pt2,
            Corner::Pt1 => Corner::Pt3,
            Corner::Pt2 => Corner::Pt0,
            Corner::Pt3 => Corner::Pt1,
        }
    }
}

/// The 2D location of a shape as two diagonal corner points
///
/// Equality and hashing compare all four scalars bitwise after folding
/// `-0.0` into `0.0`, so `Location` can be used as a map key.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Location {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl Location {
    /// Create a location from four scalars
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Create a location from corner `Pt0` and corner `Pt2`
    pub fn from_points(pt0: Point, pt2: Point) -> Self {
        Self::new(pt0.x, pt0.y, pt2.x, pt2.y)
    }

    pub fn x1(&self) -> f64 {
        self.x1
    }

    pub fn y1(&self) -> f64 {
        self.y1
    }

    pub fn x2(&self) -> f64 {
        self.x2
    }

    pub fn y2(&self) -> f64 {
        self.y2
    }

    /// Value of one corner
    pub fn corner(&self, corner: Corner) -> Point {
        match corner {
            Corner::Pt0 => Point::new(self.x1, self.y1),
            Corner::Pt1 => Point::new(self.x2, self.y1),
            Corner::Pt2 => Point::new(self.x2, self.y2),
            Corner::Pt3 => Point::new(self.x1, self.y2),
        }
    }

    /// Move one corner, leaving the opposite corner in place
    pub fn set_corner(&mut self, corner: Corner, pt: Point) {
        match corner {
            Corner::Pt0 => {
                self.x1 = pt.x;
                self.y1 = pt.y;
            }
            Corner::Pt1 => {
                self.x2 = pt.x;
                self.y1 = pt.y;
            }
            Corner::Pt2 => {
                self.x2 = pt.x;
                self.y2 = pt.y;
            }
            Corner::Pt3 => {
                self.x1 = pt.x;
                self.y2 = pt.y;
            }
        }
    }

    /// Copy of this location with one corner moved
    pub fn with_corner(mut self, corner: Corner, pt: Point) -> Self {
        self.set_corner(corner, pt);
        self
    }

    pub fn pt0(&self) -> Point {
        self.corner(Corner::Pt0)
    }

    pub fn pt2(&self) -> Point {
        self.corner(Corner::Pt2)
    }

    /// Normalized bounding box; width and height are always `>= 0`
    pub fn bounds(&self) -> Bounds {
        Bounds::new(
            self.x1.min(self.x2),
            self.y1.min(self.y2),
            (self.x2 - self.x1).abs(),
            (self.y2 - self.y1).abs(),
        )
    }

    pub fn center_x(&self) -> f64 {
        (self.x1 + self.x2) / 2.0
    }

    pub fn center_y(&self) -> f64 {
        (self.y1 + self.y2) / 2.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_x(), self.center_y())
    }

    /// Translate both corners
    pub fn move_by(&mut self, dx: f64, dy: f64) {
        self.x1 += dx;
        self.x2 += dx;
        self.y1 += dy;
        self.y2 += dy;
    }

    /// Translate so the center lands on `(x, y)`
    pub fn move_center_to(&mut self, x: f64, y: f64) {
        let dx = x - self.center_x();
        let dy = y - self.center_y();
        self.move_by(dx, dy);
    }

    /// Copy of this location translated by `(dx, dy)`
    pub fn translated(mut self, dx: f64, dy: f64) -> Self {
        self.move_by(dx, dy);
        self
    }

    /// Bounding-box containment (half-open, see [`Bounds::contains`])
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.bounds().contains(x, y)
    }

    pub fn contains_point(&self, p: Point) -> bool {
        self.contains(p.x, p.y)
    }

    fn key(&self) -> [u64; 4] {
        // Adding 0.0 maps -0.0 to 0.0.
        [
            (self.x1 + 0.0).to_bits(),
            (self.y1 + 0.0).to_bits(),
            (self.x2 + 0.0).to_bits(),
            (self.y2 + 0.0).to_bits(),
        ]
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Location {}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl From<Bounds> for Location {
    fn from(b: Bounds) -> Self {
        Self::new(b.x, b.y, b.max_x(), b.max_y())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.3}, {:.3})-({:.3}, {:.3})",
            self.x1, self.y1, self.x2, self.y2
        )
    }
}
