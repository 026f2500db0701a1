//! # Draw2D Model
//!
//! Observable, vetoable 2-D vector drawings.
//!
//! ## Core Components
//!
//! - **Shapes**: rectangles, ellipses and polygons sharing one handle type,
//!   [`Shape`], with location, color and tags
//! - **Polygon**: incremental bounding-box growth, proportional rescaling on
//!   external resize and a crossing-number containment test
//! - **Drawing**: ordered z-order container that republishes member events
//!
//! ## Architecture
//!
//! ```text
//! Drawing (drawing listeners)
//!   └── per-member forwarder
//!         └── Shape (shape listeners)
//!               └── Geometry (Rectangle | Ellipse | Polygon)
//! ```
//!
//! Every mutation announces a before-event that any listener, at shape or
//! drawing level, may reject. A rejected mutation changes nothing and
//! returns the [`ChangeRejected`] reason to the caller.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use draw2d_model::{ChangeRejected, Drawing, Shape, ShapeEventKind};
//!
//! let drawing = Drawing::new();
//! let rect = Shape::rectangle(0.0, 0.0, 10.0, 10.0);
//! drawing.add_shape(&rect)?;
//!
//! // Forbid moving anything into negative coordinates
//! drawing.add_drawing_listener(|event| match event.shape_event().map(|e| e.kind()) {
//!     Some(ShapeEventKind::LocationChanged { new, .. })
//!         if event.is_before_change() && new.bounds().min_x() < 0.0 =>
//!     {
//!         Err(ChangeRejected::new("negative x"))
//!     }
//!     _ => Ok(()),
//! });
//!
//! assert!(rect.move_by(-20.0, 0.0).is_err());
//! ```

pub mod drawing;
pub mod events;
pub mod model;

pub use drawing::Drawing;
pub use events::{DrawingEvent, DrawingEventKind, ShapeEvent, ShapeEventKind};
pub use model::{
    EllipseGeometry, Geometry, Polygon, PolygonGeometry, Shape, ShapeId, ShapeType, TagValue,
};

pub use draw2d_core::{
    Bounds, ChangePhase, ChangeRejected, Color, Corner, DrawingError, Location, Point,
    ShapeDefaults, SubscriptionId,
};
