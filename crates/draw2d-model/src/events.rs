//! Change events fired by shapes and drawings.
//!
//! Every mutator fires a `Before` event (vetoable) and, if nobody rejected
//! it, an `After` event once the change is in place. Generic
//! [`ShapeEventKind::Changed`] notifications have no phase and cannot be
//! vetoed.

use draw2d_core::{ChangePhase, Color, Location, Point, Vetoable};

use crate::drawing::Drawing;
use crate::model::{Shape, TagValue};

/// Event fired by a [`Shape`]
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeEvent {
    source: Shape,
    kind: ShapeEventKind,
}

/// What happened to the shape
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeEventKind {
    /// The shape's location (bounding box) is changing or has changed
    LocationChanged {
        phase: ChangePhase,
        old: Location,
        new: Location,
    },
    /// The shape's color is changing or has changed
    ColorChanged {
        phase: ChangePhase,
        old: Color,
        new: Color,
    },
    /// A tag is being or has been added, replaced or deleted
    ///
    /// `old` is `None` for a new tag, `new` is `None` for a deletion.
    TagChanged {
        phase: ChangePhase,
        name: String,
        old: Option<TagValue>,
        new: Option<TagValue>,
    },
    /// A point is being or has been appended to a polygon
    PointAdded {
        phase: ChangePhase,
        index: usize,
        point: Point,
    },
    /// Something about the shape changed; observers should redraw it
    Changed,
}

impl ShapeEvent {
    pub(crate) fn new(source: Shape, kind: ShapeEventKind) -> Self {
        Self { source, kind }
    }

    /// The shape that fired this event
    pub fn source(&self) -> &Shape {
        &self.source
    }

    pub fn kind(&self) -> &ShapeEventKind {
        &self.kind
    }

    /// Phase of a two-phase change, `None` for generic notifications
    pub fn phase(&self) -> Option<ChangePhase> {
        match &self.kind {
            ShapeEventKind::LocationChanged { phase, .. }
            | ShapeEventKind::ColorChanged { phase, .. }
            | ShapeEventKind::TagChanged { phase, .. }
            | ShapeEventKind::PointAdded { phase, .. } => Some(*phase),
            ShapeEventKind::Changed => None,
        }
    }

    pub fn is_before_change(&self) -> bool {
        self.phase() == Some(ChangePhase::Before)
    }

    pub fn is_after_change(&self) -> bool {
        self.phase() == Some(ChangePhase::After)
    }
}

impl Vetoable for ShapeEvent {
    fn is_vetoable(&self) -> bool {
        self.is_before_change()
    }
}

/// Event fired by a [`Drawing`]
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingEvent {
    source: Drawing,
    kind: DrawingEventKind,
}

/// What happened to the drawing
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingEventKind {
    /// A shape that was not a member is being or has been inserted at `index`
    ShapeAdded {
        phase: ChangePhase,
        index: usize,
        shape: Shape,
    },
    /// A member is being or has been moved in the z-order
    ShapeMoved {
        phase: ChangePhase,
        old_index: usize,
        new_index: usize,
        shape: Shape,
    },
    /// A member is being or has been removed from `index`
    ///
    /// The after-phase event still carries the removed shape.
    ShapeRemoved {
        phase: ChangePhase,
        index: usize,
        shape: Shape,
    },
    /// A drawing tag is being or has been added, replaced or deleted
    TagChanged {
        phase: ChangePhase,
        name: String,
        old: Option<TagValue>,
        new: Option<TagValue>,
    },
    /// An event of a member shape, forwarded unchanged
    Shape(ShapeEvent),
}

impl DrawingEvent {
    pub(crate) fn new(source: Drawing, kind: DrawingEventKind) -> Self {
        Self { source, kind }
    }

    /// The drawing that fired this event
    pub fn source(&self) -> &Drawing {
        &self.source
    }

    pub fn kind(&self) -> &DrawingEventKind {
        &self.kind
    }

    /// The forwarded shape event, if this is one
    pub fn shape_event(&self) -> Option<&ShapeEvent> {
        match &self.kind {
            DrawingEventKind::Shape(e) => Some(e),
            _ => None,
        }
    }

    /// Phase of the change, `None` for forwarded generic notifications
    pub fn phase(&self) -> Option<ChangePhase> {
        match &self.kind {
            DrawingEventKind::ShapeAdded { phase, .. }
            | DrawingEventKind::ShapeMoved { phase, .. }
            | DrawingEventKind::ShapeRemoved { phase, .. }
            | DrawingEventKind::TagChanged { phase, .. } => Some(*phase),
            DrawingEventKind::Shape(e) => e.phase(),
        }
    }

    pub fn is_before_change(&self) -> bool {
        self.phase() == Some(ChangePhase::Before)
    }

    pub fn is_after_change(&self) -> bool {
        self.phase() == Some(ChangePhase::After)
    }
}

impl Vetoable for DrawingEvent {
    fn is_vetoable(&self) -> bool {
        self.is_before_change()
    }
}
