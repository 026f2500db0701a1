//! # Draw2D Core
//!
//! Core types, errors, and the change-listener protocol for Draw2D.
//! Provides the leaf primitives every shape is built from, the error
//! taxonomy, configuration, and the vetoable before/after event dispatch.

pub mod config;
pub mod data;
pub mod error;
pub mod event_bus;
pub mod location;

pub use config::{Config, LoggingSettings, ShapeDefaults, DEFAULT_DEGENERATE_EXTENT_EPSILON};

pub use data::{Bounds, Color, ColorParseError, Point};

pub use error::{ChangeRejected, DrawingError, Error, Result};

// Re-export event bus for convenience
pub use event_bus::{ChangePhase, Listener, ListenerList, SubscriptionId, Vetoable};

pub use location::{Corner, Location};
