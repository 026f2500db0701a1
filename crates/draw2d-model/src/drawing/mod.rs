//! Drawing: an ordered, observable collection of shapes.
//!
//! Order is z-order, bottom first. Every member has exactly one forwarder
//! subscribed to it that re-broadcasts the member's events on the drawing's
//! own stream. A drawing listener rejecting a forwarded before-event makes
//! the forwarder return that rejection into the shape's own dispatch, so the
//! shape mutation fails as if one of its own listeners had vetoed it.

mod operations;

use draw2d_core::{ChangePhase, ChangeRejected, DrawingError, ListenerList, SubscriptionId};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};

use crate::events::{DrawingEvent, DrawingEventKind};
use crate::model::{Shape, TagValue};

struct Member {
    shape: Shape,
    forwarder: SubscriptionId,
}

struct DrawingInner {
    members: RwLock<Vec<Member>>,
    tags: RwLock<HashMap<String, TagValue>>,
    listeners: ListenerList<DrawingEvent>,
}

impl Drop for DrawingInner {
    fn drop(&mut self) {
        for member in self.members.get_mut().drain(..) {
            member.shape.remove_shape_listener(member.forwarder);
        }
    }
}

/// Handle to a drawing; clones share the same drawing
#[derive(Clone)]
pub struct Drawing {
    inner: Arc<DrawingInner>,
}

impl Drawing {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(DrawingInner {
                members: RwLock::new(Vec::new()),
                tags: RwLock::new(HashMap::new()),
                listeners: ListenerList::new(),
            }),
        }
    }

    // ---- membership --------------------------------------------------------

    /// Add a shape on top, or move an existing member to the top
    pub fn add_shape(&self, shape: impl AsRef<Shape>) -> Result<(), ChangeRejected> {
        let shape = shape.as_ref();
        match self.index_of(shape) {
            Some(old_index) => self.move_member(shape, old_index, self.shape_count() - 1),
            None => self.insert_new(shape, self.shape_count()),
        }
    }

    /// Insert a shape at `index`, or move an existing member there
    ///
    /// A new shape may go anywhere in `0..=len`; a member may move anywhere in
    /// `0..len`. Moving a member to its current index does nothing.
    pub fn add_shape_at(&self, index: usize, shape: impl AsRef<Shape>) -> Result<(), DrawingError> {
        let shape = shape.as_ref();
        let len = self.shape_count();
        match self.index_of(shape) {
            Some(old_index) if old_index == index => Ok(()),
            Some(_) if index >= len => Err(DrawingError::IndexOutOfBounds { index, len }),
            Some(old_index) => Ok(self.move_member(shape, old_index, index)?),
            None if index > len => Err(DrawingError::IndexOutOfBounds { index, len }),
            None => Ok(self.insert_new(shape, index)?),
        }
    }

    /// Before-listeners may have added the shape themselves; it is then left
    /// where they put it and no after-event fires.
    fn insert_new(&self, shape: &Shape, index: usize) -> Result<(), ChangeRejected> {
        self.fire(DrawingEventKind::ShapeAdded {
            phase: ChangePhase::Before,
            index,
            shape: shape.clone(),
        })?;

        let index = {
            let mut members = self.inner.members.write();
            if members.iter().any(|m| m.shape == *shape) {
                tracing::debug!("{} joined the drawing during its before-add", shape.id());
                return Ok(());
            }
            let index = index.min(members.len());
            let forwarder = self.subscribe_forwarder(shape);
            members.insert(
                index,
                Member {
                    shape: shape.clone(),
                    forwarder,
                },
            );
            index
        };
        tracing::debug!("{} added to drawing at index {}", shape.id(), index);

        self.fire(DrawingEventKind::ShapeAdded {
            phase: ChangePhase::After,
            index,
            shape: shape.clone(),
        })?;
        Ok(())
    }

    /// Skips the move, and its after-event, if before-listeners removed the
    /// shape or already put it at the target.
    fn move_member(
        &self,
        shape: &Shape,
        old_index: usize,
        new_index: usize,
    ) -> Result<(), ChangeRejected> {
        if old_index == new_index {
            return Ok(());
        }
        self.fire(DrawingEventKind::ShapeMoved {
            phase: ChangePhase::Before,
            old_index,
            new_index,
            shape: shape.clone(),
        })?;

        {
            let mut members = self.inner.members.write();
            let Some(current) = members.iter().position(|m| m.shape == *shape) else {
                tracing::debug!("{} left the drawing during its before-move", shape.id());
                return Ok(());
            };
            if current == new_index.min(members.len() - 1) {
                return Ok(());
            }
            let member = members.remove(current);
            let index = new_index.min(members.len());
            members.insert(index, member);
        }
        tracing::debug!(
            "{} moved in drawing from {} to {}",
            shape.id(),
            old_index,
            new_index
        );

        self.fire(DrawingEventKind::ShapeMoved {
            phase: ChangePhase::After,
            old_index,
            new_index,
            shape: shape.clone(),
        })?;
        Ok(())
    }

    /// Remove a member; returns `Ok(false)` if the shape is not a member
    pub fn remove_shape(&self, shape: &Shape) -> Result<bool, ChangeRejected> {
        let Some(index) = self.index_of(shape) else {
            return Ok(false);
        };
        self.remove_member(index, shape)?;
        Ok(true)
    }

    /// Remove the member at `index` and return it
    pub fn remove_shape_at(&self, index: usize) -> Result<Shape, DrawingError> {
        let shape = self.get(index).ok_or(DrawingError::IndexOutOfBounds {
            index,
            len: self.shape_count(),
        })?;
        self.remove_member(index, &shape)?;
        Ok(shape)
    }

    fn remove_member(&self, index: usize, shape: &Shape) -> Result<(), ChangeRejected> {
        self.fire(DrawingEventKind::ShapeRemoved {
            phase: ChangePhase::Before,
            index,
            shape: shape.clone(),
        })?;

        let removed = {
            let mut members = self.inner.members.write();
            members
                .iter()
                .position(|m| m.shape == *shape)
                .map(|position| members.remove(position))
        };
        if let Some(member) = removed {
            member.shape.remove_shape_listener(member.forwarder);
            tracing::debug!("{} removed from drawing at index {}", shape.id(), index);
        }

        self.fire(DrawingEventKind::ShapeRemoved {
            phase: ChangePhase::After,
            index,
            shape: shape.clone(),
        })
    }

    /// Replace the contents: remove every member, then add each shape on top
    pub fn set_shapes<I>(&self, shapes: I) -> Result<(), ChangeRejected>
    where
        I: IntoIterator,
        I::Item: AsRef<Shape>,
    {
        self.clear()?;
        for shape in shapes {
            self.add_shape(shape)?;
        }
        Ok(())
    }

    /// Remove every member, topmost first
    pub fn clear(&self) -> Result<(), ChangeRejected> {
        while let Some(index) = self.shape_count().checked_sub(1) {
            let Some(shape) = self.get(index) else {
                break;
            };
            self.remove_member(index, &shape)?;
        }
        Ok(())
    }

    fn subscribe_forwarder(&self, shape: &Shape) -> SubscriptionId {
        let drawing: Weak<DrawingInner> = Arc::downgrade(&self.inner);
        shape.add_shape_listener(move |event| match drawing.upgrade() {
            Some(inner) => {
                let drawing = Drawing { inner };
                drawing.fire(DrawingEventKind::Shape(event.clone()))
            }
            None => Ok(()),
        })
    }

    // ---- queries -----------------------------------------------------------

    pub fn index_of(&self, shape: &Shape) -> Option<usize> {
        self.inner
            .members
            .read()
            .iter()
            .position(|m| m.shape == *shape)
    }

    pub fn contains(&self, shape: &Shape) -> bool {
        self.index_of(shape).is_some()
    }

    pub fn get(&self, index: usize) -> Option<Shape> {
        self.inner
            .members
            .read()
            .get(index)
            .map(|m| m.shape.clone())
    }

    /// Snapshot of the members, bottom to top
    pub fn shapes(&self) -> Vec<Shape> {
        self.inner
            .members
            .read()
            .iter()
            .map(|m| m.shape.clone())
            .collect()
    }

    pub fn shape_count(&self) -> usize {
        self.inner.members.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shape_count() == 0
    }

    // ---- tags --------------------------------------------------------------

    pub fn tag(&self, name: &str) -> Option<TagValue> {
        self.inner.tags.read().get(name).cloned()
    }

    pub fn tag_names(&self) -> Vec<String> {
        self.inner.tags.read().keys().cloned().collect()
    }

    pub fn tags(&self) -> HashMap<String, TagValue> {
        self.inner.tags.read().clone()
    }

    pub fn set_tag(
        &self,
        name: impl Into<String>,
        value: impl Into<TagValue>,
    ) -> Result<(), ChangeRejected> {
        let name = name.into();
        let value = value.into();
        let old_value = self.tag(&name);
        self.fire(DrawingEventKind::TagChanged {
            phase: ChangePhase::Before,
            name: name.clone(),
            old: old_value.clone(),
            new: Some(value.clone()),
        })?;

        self.inner.tags.write().insert(name.clone(), value.clone());

        self.fire(DrawingEventKind::TagChanged {
            phase: ChangePhase::After,
            name,
            old: old_value,
            new: Some(value),
        })
    }

    pub fn delete_tag(&self, name: &str) -> Result<(), ChangeRejected> {
        let Some(old_value) = self.tag(name) else {
            return Ok(());
        };
        self.fire(DrawingEventKind::TagChanged {
            phase: ChangePhase::Before,
            name: name.to_string(),
            old: Some(old_value.clone()),
            new: None,
        })?;

        self.inner.tags.write().remove(name);

        self.fire(DrawingEventKind::TagChanged {
            phase: ChangePhase::After,
            name: name.to_string(),
            old: Some(old_value),
            new: None,
        })
    }

    pub fn set_tags(&self, new_tags: HashMap<String, TagValue>) -> Result<(), ChangeRejected> {
        for name in self.tag_names() {
            self.delete_tag(&name)?;
        }
        for (name, value) in new_tags {
            self.set_tag(name, value)?;
        }
        Ok(())
    }

    // ---- listeners ---------------------------------------------------------

    /// Register a listener for drawing events, including forwarded shape events
    pub fn add_drawing_listener<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&DrawingEvent) -> Result<(), ChangeRejected> + Send + Sync + 'static,
    {
        self.inner.listeners.subscribe(listener)
    }

    pub fn remove_drawing_listener(&self, id: SubscriptionId) -> bool {
        self.inner.listeners.unsubscribe(id)
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.len()
    }

    fn fire(&self, kind: DrawingEventKind) -> Result<(), ChangeRejected> {
        let event = DrawingEvent::new(self.clone(), kind);
        self.inner.listeners.fire(&event).inspect_err(|rejection| {
            if event.shape_event().is_none() {
                tracing::debug!(
                    "Drawing change rejected ({:?}): {}",
                    event.kind(),
                    rejection.reason()
                );
            }
        })
    }
}

impl Default for Drawing {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Drawing {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Drawing {}

impl fmt::Debug for Drawing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Drawing")
            .field("shapes", &self.shape_count())
            .field("tags", &self.inner.tags.read().len())
            .field("listeners", &self.inner.listeners.len())
            .finish()
    }
}
