//! Polygon geometry and the typed [`Polygon`] handle.
//!
//! The bounding box of a polygon is the shape's location. Appending points
//! grows the box internally; an external relocation rescales every point
//! from the old box into the new one.

use draw2d_core::{Bounds, ChangePhase, ChangeRejected, Location, Point, ShapeDefaults};
use nalgebra::{Matrix3, Point2, Vector2};

use super::{Geometry, RelocateMode, Shape, ShapeType};
use crate::events::ShapeEventKind;

/// Ordered contour of a polygon
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonGeometry {
    points: Vec<Point>,
    closed: bool,
    epsilon: f64,
}

impl PolygonGeometry {
    pub(super) fn new(closed: bool, epsilon: f64) -> Self {
        Self {
            points: Vec::new(),
            closed,
            epsilon,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Map every point from `from` into `to`
    ///
    /// Old corner `Pt0` lands on new corner `Pt0`; each axis scales by the
    /// ratio of the signed extents, or not at all if the old extent is
    /// degenerate.
    pub(super) fn rescale(&mut self, from: &Location, to: &Location) {
        let scale = |old: f64, new: f64| {
            if old.abs() <= self.epsilon {
                1.0
            } else {
                new / old
            }
        };
        let sx = scale(from.x2() - from.x1(), to.x2() - to.x1());
        let sy = scale(from.y2() - from.y1(), to.y2() - to.y1());

        let transform = Matrix3::new_translation(&Vector2::new(to.x1(), to.y1()))
            * Matrix3::new_nonuniform_scaling(&Vector2::new(sx, sy))
            * Matrix3::new_translation(&Vector2::new(-from.x1(), -from.y1()));

        for p in &mut self.points {
            let mapped = transform.transform_point(&Point2::new(p.x, p.y));
            *p = Point::new(mapped.x, mapped.y);
        }
    }

    /// Even-odd crossing test against the (always closed) contour
    pub(super) fn contains(&self, bounds: &Bounds, p: Point) -> bool {
        if self.points.len() < 2 || !bounds.contains_point(p) {
            return false;
        }

        let mut inside = false;
        let mut j = self.points.len() - 1;
        for (i, pi) in self.points.iter().enumerate() {
            let pj = self.points[j];
            if (pi.y > p.y) != (pj.y > p.y) {
                let cross_x = pi.x + (p.y - pi.y) * (pj.x - pi.x) / (pj.y - pi.y);
                if cross_x > p.x {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

/// Smallest change to `location` that admits `pt`, or `None` if it already does
///
/// Left/right and top/bottom are resolved independently: the corner holding
/// the minimum x need not be the one holding the minimum y.
fn expanded_to_include(location: &Location, pt: Point) -> Option<Location> {
    let (mut x1, mut y1) = (location.x1(), location.y1());
    let (mut x2, mut y2) = (location.x2(), location.y2());
    let mut grown = false;

    let (left, right) = if x1 <= x2 {
        (&mut x1, &mut x2)
    } else {
        (&mut x2, &mut x1)
    };
    if pt.x < *left {
        *left = pt.x;
        grown = true;
    } else if pt.x > *right {
        *right = pt.x;
        grown = true;
    }

    let (top, bottom) = if y1 <= y2 {
        (&mut y1, &mut y2)
    } else {
        (&mut y2, &mut y1)
    };
    if pt.y < *top {
        *top = pt.y;
        grown = true;
    } else if pt.y > *bottom {
        *bottom = pt.y;
        grown = true;
    }

    grown.then(|| Location::new(x1, y1, x2, y2))
}

/// Typed handle to a polygon shape
///
/// The shared shape API is reached through [`Polygon::shape`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Polygon {
    shape: Shape,
}

impl Polygon {
    /// Empty polygon with default settings
    pub fn new() -> Self {
        Self::with_defaults(&ShapeDefaults::default())
    }

    pub fn with_defaults(defaults: &ShapeDefaults) -> Self {
        Self::wrap(Shape::with_defaults(ShapeType::Polygon, defaults))
    }

    /// Polygon built directly from a point list, located at its extents
    ///
    /// No events fire: nobody can be listening yet.
    pub fn from_points(points: impl IntoIterator<Item = Point>, closed: bool) -> Self {
        let points: Vec<Point> = points.into_iter().collect();
        let location = extents(&points).unwrap_or_default();
        let defaults = ShapeDefaults::default();
        let geometry = Geometry::Polygon(PolygonGeometry {
            points,
            closed,
            epsilon: defaults.degenerate_extent_epsilon,
        });
        Self::wrap(Shape::from_state(location, defaults.color, geometry))
    }

    pub(super) fn wrap(shape: Shape) -> Self {
        Self { shape }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn into_shape(self) -> Shape {
        self.shape
    }

    /// Append a vertex, growing the bounding box if needed
    ///
    /// The box is grown first (without rescaling). If that is vetoed nothing
    /// changes. If the point-add itself is vetoed, the previous box is put
    /// back.
    pub fn append_point(&self, pt: Point) -> Result<(), ChangeRejected> {
        let old_location = self.shape.location();
        let index = self.point_count();

        let grown = if index == 0 {
            Some(Location::from_points(pt, pt))
        } else {
            expanded_to_include(&old_location, pt)
        };
        if let Some(location) = grown {
            self.shape.relocate(location, RelocateMode::Internal)?;
        }

        if let Err(rejection) = self.shape.fire(ShapeEventKind::PointAdded {
            phase: ChangePhase::Before,
            index,
            point: pt,
        }) {
            if grown.is_some() {
                if let Err(restore) = self.shape.relocate(old_location, RelocateMode::Internal) {
                    tracing::warn!(
                        "{} could not restore bounds after rejected point: {}",
                        self.shape.id(),
                        restore.reason()
                    );
                }
            }
            return Err(rejection);
        }

        let index = self.shape.write_geometry(|geometry| match geometry {
            Geometry::Polygon(polygon) => {
                polygon.points.push(pt);
                polygon.points.len() - 1
            }
            _ => index,
        });

        self.shape.fire(ShapeEventKind::PointAdded {
            phase: ChangePhase::After,
            index,
            point: pt,
        })
    }

    pub fn point_count(&self) -> usize {
        self.with_polygon(|p| p.points.len())
    }

    pub fn point(&self, index: usize) -> Option<Point> {
        self.with_polygon(|p| p.points.get(index).copied())
    }

    /// Snapshot of the vertices
    pub fn points(&self) -> Vec<Point> {
        self.with_polygon(|p| p.points.clone())
    }

    pub fn is_closed(&self) -> bool {
        self.with_polygon(|p| p.closed)
    }

    /// Open or close the contour; fires a change notification when it flips
    pub fn set_closed(&self, closed: bool) {
        let changed = self.shape.write_geometry(|geometry| match geometry {
            Geometry::Polygon(polygon) if polygon.closed != closed => {
                polygon.closed = closed;
                true
            }
            _ => false,
        });
        if changed {
            self.shape.notify_changed();
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        self.shape.contains(p)
    }

    fn with_polygon<R: Default>(&self, f: impl FnOnce(&PolygonGeometry) -> R) -> R {
        self.shape.read_geometry(|geometry| match geometry {
            Geometry::Polygon(polygon) => f(polygon),
            _ => R::default(),
        })
    }
}

impl Default for Polygon {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Polygon> for Shape {
    fn from(polygon: Polygon) -> Self {
        polygon.shape
    }
}

impl AsRef<Shape> for Polygon {
    fn as_ref(&self) -> &Shape {
        &self.shape
    }
}

fn extents(points: &[Point]) -> Option<Location> {
    let first = points.first()?;
    let init = (first.x, first.y, first.x, first.y);
    let (x1, y1, x2, y2) = points.iter().fold(init, |(x1, y1, x2, y2), p| {
        (x1.min(p.x), y1.min(p.y), x2.max(p.x), y2.max(p.y))
    });
    Some(Location::new(x1, y1, x2, y2))
}
