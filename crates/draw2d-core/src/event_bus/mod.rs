//! # Event Bus Module
//!
//! Provides the synchronous, vetoable publish/subscribe mechanism behind
//! every shape and drawing.
//!
//! ## Overview
//!
//! A change is announced in two phases:
//! - a *before* event, which any listener may reject by returning
//!   `Err(ChangeRejected)`; the mutation is then abandoned
//! - an *after* event, fired once the change has been applied
//!
//! There is no shared "last rejection" state: the rejection is an ordinary
//! return value, so a listener that re-broadcasts an event (such as a
//! drawing's per-shape forwarder) passes a downstream veto back to the
//! broadcaster that started the dispatch with `?`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use draw2d_core::event_bus::{ListenerList, Vetoable};
//! use draw2d_core::ChangeRejected;
//!
//! let listeners: ListenerList<MyEvent> = ListenerList::new();
//! let id = listeners.subscribe(|event| {
//!     if event.is_vetoable() && event.is_forbidden() {
//!         return Err(ChangeRejected::new("forbidden"));
//!     }
//!     Ok(())
//! });
//!
//! listeners.fire(&event)?;
//! listeners.unsubscribe(id);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
