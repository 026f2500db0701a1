//! Shapes: the drawing objects a [`Drawing`](crate::Drawing) is made of.
//!
//! A [`Shape`] is a cheap, cloneable handle; clones refer to the same
//! entity and compare equal, while two separately created shapes with the
//! same geometry are distinct. Shared state (location, color, tags) lives in
//! the handle, per-kind data in [`Geometry`].
//!
//! Every mutator runs the same two-phase protocol:
//!
//! 1. fire a `Before` event describing old -> new to a snapshot of the listeners
//! 2. if a listener returns `Err`, stop: nothing changes, no `After` event is
//!    fired and the rejection is returned to the caller
//! 3. apply the change and run the per-kind "location changed" hook
//!    (ellipse cache, polygon rescaling) under the same write
//! 4. fire the `After` event
//! 5. fire a generic `Changed` notification if the hook altered the geometry

mod ellipse;
mod polygon;
mod rectangle;

pub use ellipse::EllipseGeometry;
pub use polygon::{Polygon, PolygonGeometry};

use draw2d_core::{
    Bounds, ChangePhase, ChangeRejected, Color, Corner, Location, ListenerList, Point,
    ShapeDefaults, SubscriptionId,
};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use uuid::Uuid;

use crate::events::{ShapeEvent, ShapeEventKind};

/// Arbitrary value stored under a tag name
pub type TagValue = Value;

/// Unique identity of a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(Uuid);

impl ShapeId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shape({})", &self.0.to_string()[..8])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeType {
    Rectangle,
    Ellipse,
    Polygon,
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeType::Rectangle => write!(f, "Rectangle"),
            ShapeType::Ellipse => write!(f, "Ellipse"),
            ShapeType::Polygon => write!(f, "Polygon"),
        }
    }
}

/// Per-kind geometry carried next to the shared shape state
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Rectangle,
    Ellipse(EllipseGeometry),
    Polygon(PolygonGeometry),
}

impl Geometry {
    fn for_type(shape_type: ShapeType, location: &Location, defaults: &ShapeDefaults) -> Self {
        match shape_type {
            ShapeType::Rectangle => Geometry::Rectangle,
            ShapeType::Ellipse => Geometry::Ellipse(EllipseGeometry::inscribed(&location.bounds())),
            ShapeType::Polygon => Geometry::Polygon(PolygonGeometry::new(
                defaults.polygon_closed,
                defaults.degenerate_extent_epsilon,
            )),
        }
    }

    pub fn shape_type(&self) -> ShapeType {
        match self {
            Geometry::Rectangle => ShapeType::Rectangle,
            Geometry::Ellipse(_) => ShapeType::Ellipse,
            Geometry::Polygon(_) => ShapeType::Polygon,
        }
    }

    /// Called with the new location right after it was stored,
    /// before the after-change event goes out
    ///
    /// Returns true if the kind's own geometry was rewritten. Polygon points
    /// are in the new box by the time after-listeners run.
    fn on_location_changed(
        &mut self,
        old_location: &Location,
        new_location: &Location,
        mode: RelocateMode,
    ) -> bool {
        match self {
            Geometry::Rectangle => false,
            Geometry::Ellipse(ellipse) => {
                *ellipse = EllipseGeometry::inscribed(&new_location.bounds());
                false
            }
            Geometry::Polygon(_) if mode == RelocateMode::Internal => false,
            Geometry::Polygon(polygon) => {
                polygon.rescale(old_location, new_location);
                true
            }
        }
    }

    fn contains(&self, bounds: &Bounds, p: Point) -> bool {
        match self {
            Geometry::Rectangle => rectangle::contains(bounds, p),
            Geometry::Ellipse(ellipse) => ellipse.contains(p),
            Geometry::Polygon(polygon) => polygon.contains(bounds, p),
        }
    }
}

/// Who is driving a location change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RelocateMode {
    /// A caller set the location; polygons rescale their points to the new box.
    External,
    /// The shape grew its own box to admit new geometry; nothing is rescaled.
    Internal,
}

#[derive(Debug)]
struct ShapeState {
    location: Location,
    color: Color,
    tags: HashMap<String, TagValue>,
    geometry: Geometry,
}

struct ShapeInner {
    id: ShapeId,
    state: RwLock<ShapeState>,
    listeners: ListenerList<ShapeEvent>,
}

/// Handle to a drawing object
#[derive(Clone)]
pub struct Shape {
    inner: Arc<ShapeInner>,
}

impl Shape {
    /// Create a shape at the zero location with default settings
    pub fn new(shape_type: ShapeType) -> Self {
        Self::with_defaults(shape_type, &ShapeDefaults::default())
    }

    /// Create a shape at the zero location with the given defaults
    pub fn with_defaults(shape_type: ShapeType, defaults: &ShapeDefaults) -> Self {
        Self::build(shape_type, Location::default(), defaults)
    }

    /// Create a rectangle spanning the two diagonal corners
    pub fn rectangle(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::build(
            ShapeType::Rectangle,
            Location::new(x1, y1, x2, y2),
            &ShapeDefaults::default(),
        )
    }

    /// Create an ellipse inscribed in the box spanned by the two diagonal corners
    pub fn ellipse(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::build(
            ShapeType::Ellipse,
            Location::new(x1, y1, x2, y2),
            &ShapeDefaults::default(),
        )
    }

    fn build(shape_type: ShapeType, location: Location, defaults: &ShapeDefaults) -> Self {
        Self::from_state(
            location,
            defaults.color,
            Geometry::for_type(shape_type, &location, defaults),
        )
    }

    fn from_state(location: Location, color: Color, geometry: Geometry) -> Self {
        Self {
            inner: Arc::new(ShapeInner {
                id: ShapeId::new(),
                state: RwLock::new(ShapeState {
                    location,
                    color,
                    tags: HashMap::new(),
                    geometry,
                }),
                listeners: ListenerList::new(),
            }),
        }
    }

    pub fn id(&self) -> ShapeId {
        self.inner.id
    }

    pub fn shape_type(&self) -> ShapeType {
        self.inner.state.read().geometry.shape_type()
    }

    /// Snapshot of the per-kind geometry
    pub fn geometry(&self) -> Geometry {
        self.inner.state.read().geometry.clone()
    }

    /// Typed polygon handle, if this shape is a polygon
    pub fn as_polygon(&self) -> Option<Polygon> {
        match self.shape_type() {
            ShapeType::Polygon => Some(Polygon::wrap(self.clone())),
            _ => None,
        }
    }

    /// The inscribed ellipse, if this shape is an ellipse
    pub fn ellipse_geometry(&self) -> Option<EllipseGeometry> {
        match &self.inner.state.read().geometry {
            Geometry::Ellipse(e) => Some(*e),
            _ => None,
        }
    }

    // ---- location ----------------------------------------------------------

    /// Current location (a copy)
    pub fn location(&self) -> Location {
        self.inner.state.read().location
    }

    /// One corner of the current location
    pub fn location_pt(&self, corner: Corner) -> Point {
        self.location().corner(corner)
    }

    /// Normalized bounding box of the current location
    pub fn bounds(&self) -> Bounds {
        self.location().bounds()
    }

    /// Relocate the shape by giving its new bounding box
    ///
    /// All other relocation helpers funnel through here.
    pub fn set_location(&self, new_location: Location) -> Result<(), ChangeRejected> {
        self.relocate(new_location, RelocateMode::External)
    }

    /// Relocate by corner `Pt0` and corner `Pt2`
    pub fn set_location_corners(&self, pt0: Point, pt2: Point) -> Result<(), ChangeRejected> {
        self.set_location(Location::from_points(pt0, pt2))
    }

    pub fn set_location_coords(
        &self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    ) -> Result<(), ChangeRejected> {
        self.set_location(Location::new(x1, y1, x2, y2))
    }

    /// Move a single corner; the opposite corner stays put
    pub fn set_location_pt(&self, corner: Corner, pt: Point) -> Result<(), ChangeRejected> {
        self.set_location(self.location().with_corner(corner, pt))
    }

    /// Translate the shape
    pub fn move_by(&self, dx: f64, dy: f64) -> Result<(), ChangeRejected> {
        self.set_location(self.location().translated(dx, dy))
    }

    pub(crate) fn relocate(
        &self,
        new_location: Location,
        mode: RelocateMode,
    ) -> Result<(), ChangeRejected> {
        let old_location = self.location();
        self.fire(ShapeEventKind::LocationChanged {
            phase: ChangePhase::Before,
            old: old_location,
            new: new_location,
        })?;

        let rescaled = {
            let mut state = self.inner.state.write();
            state.location = new_location;
            state
                .geometry
                .on_location_changed(&old_location, &new_location, mode)
        };

        self.fire(ShapeEventKind::LocationChanged {
            phase: ChangePhase::After,
            old: old_location,
            new: new_location,
        })?;

        if rescaled {
            self.notify_changed();
        }
        Ok(())
    }

    // ---- color -------------------------------------------------------------

    pub fn color(&self) -> Color {
        self.inner.state.read().color
    }

    pub fn set_color(&self, new_color: Color) -> Result<(), ChangeRejected> {
        let old_color = self.color();
        self.fire(ShapeEventKind::ColorChanged {
            phase: ChangePhase::Before,
            old: old_color,
            new: new_color,
        })?;

        self.inner.state.write().color = new_color;

        self.fire(ShapeEventKind::ColorChanged {
            phase: ChangePhase::After,
            old: old_color,
            new: new_color,
        })
    }

    // ---- tags --------------------------------------------------------------

    pub fn tag(&self, name: &str) -> Option<TagValue> {
        self.inner.state.read().tags.get(name).cloned()
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.inner.state.read().tags.contains_key(name)
    }

    pub fn tag_names(&self) -> Vec<String> {
        self.inner.state.read().tags.keys().cloned().collect()
    }

    /// Snapshot of all tags
    pub fn tags(&self) -> HashMap<String, TagValue> {
        self.inner.state.read().tags.clone()
    }

    /// Add or replace a tag
    pub fn set_tag(
        &self,
        name: impl Into<String>,
        value: impl Into<TagValue>,
    ) -> Result<(), ChangeRejected> {
        let name = name.into();
        let value = value.into();
        let old_value = self.tag(&name);
        self.fire(ShapeEventKind::TagChanged {
            phase: ChangePhase::Before,
            name: name.clone(),
            old: old_value.clone(),
            new: Some(value.clone()),
        })?;

        self.inner
            .state
            .write()
            .tags
            .insert(name.clone(), value.clone());

        self.fire(ShapeEventKind::TagChanged {
            phase: ChangePhase::After,
            name,
            old: old_value,
            new: Some(value),
        })
    }

    /// Remove a tag; removing a tag that is not set does nothing
    pub fn delete_tag(&self, name: &str) -> Result<(), ChangeRejected> {
        let Some(old_value) = self.tag(name) else {
            return Ok(());
        };
        self.fire(ShapeEventKind::TagChanged {
            phase: ChangePhase::Before,
            name: name.to_string(),
            old: Some(old_value.clone()),
            new: None,
        })?;

        self.inner.state.write().tags.remove(name);

        self.fire(ShapeEventKind::TagChanged {
            phase: ChangePhase::After,
            name: name.to_string(),
            old: Some(old_value),
            new: None,
        })
    }

    /// Replace all tags
    ///
    /// Deletes every current tag, then sets each new one, each through the
    /// regular event protocol. Stops at the first rejection, leaving the
    /// changes made so far in place.
    pub fn set_tags(&self, new_tags: HashMap<String, TagValue>) -> Result<(), ChangeRejected> {
        for name in self.tag_names() {
            self.delete_tag(&name)?;
        }
        for (name, value) in new_tags {
            self.set_tag(name, value)?;
        }
        Ok(())
    }

    // ---- queries -----------------------------------------------------------

    /// Precise containment test for the shape's kind
    pub fn contains(&self, p: Point) -> bool {
        let state = self.inner.state.read();
        state.geometry.contains(&state.location.bounds(), p)
    }

    // ---- listeners ---------------------------------------------------------

    /// Register a listener; it is called for every event of this shape
    ///
    /// Registering the same closure twice is the caller's business: it will
    /// simply be called twice.
    pub fn add_shape_listener<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&ShapeEvent) -> Result<(), ChangeRejected> + Send + Sync + 'static,
    {
        self.inner.listeners.subscribe(listener)
    }

    pub fn remove_shape_listener(&self, id: SubscriptionId) -> bool {
        self.inner.listeners.unsubscribe(id)
    }

    pub fn is_listener_registered(&self, id: SubscriptionId) -> bool {
        self.inner.listeners.is_subscribed(id)
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.len()
    }

    /// Broadcast a generic "something changed" notification
    pub(crate) fn notify_changed(&self) {
        // Generic notifications are not vetoable; dispatch never fails.
        let _ = self.fire(ShapeEventKind::Changed);
    }

    fn fire(&self, kind: ShapeEventKind) -> Result<(), ChangeRejected> {
        let event = ShapeEvent::new(self.clone(), kind);
        self.inner.listeners.fire(&event).inspect_err(|rejection| {
            tracing::debug!(
                "{} change rejected ({:?}): {}",
                self.id(),
                event.kind(),
                rejection.reason()
            );
        })
    }

    fn read_geometry<R>(&self, f: impl FnOnce(&Geometry) -> R) -> R {
        f(&self.inner.state.read().geometry)
    }

    fn write_geometry<R>(&self, f: impl FnOnce(&mut Geometry) -> R) -> R {
        f(&mut self.inner.state.write().geometry)
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for Shape {}

impl Hash for Shape {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl AsRef<Shape> for Shape {
    fn as_ref(&self) -> &Shape {
        self
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.read();
        f.debug_struct("Shape")
            .field("id", &self.inner.id)
            .field("type", &state.geometry.shape_type())
            .field("location", &state.location)
            .field("color", &state.color)
            .field("listeners", &self.inner.listeners.len())
            .finish()
    }
}
