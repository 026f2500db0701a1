//! # Draw2D
//!
//! A model layer for interactive 2-D vector drawings: an ordered collection
//! of shapes with observable, vetoable mutation, z-order management and
//! point-containment queries.
//!
//! ## Architecture
//!
//! Draw2D is organized as a workspace with two crates:
//!
//! 1. **draw2d-core** - Points, bounds, colors, `Location`, errors,
//!    configuration and the vetoable listener registry
//! 2. **draw2d-model** - Shapes (rectangle, ellipse, polygon), their events
//!    and the `Drawing` container
//!
//! This crate re-exports both and sets up logging.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use draw2d::{Drawing, Point, Shape};
//!
//! draw2d::init_logging()?;
//!
//! let drawing = Drawing::new();
//! drawing.add_shape(Shape::rectangle(0.0, 0.0, 10.0, 10.0))?;
//! drawing.add_shape(Shape::ellipse(5.0, 5.0, 15.0, 15.0))?;
//!
//! let hits = drawing.shapes_at(Point::new(7.0, 7.0));
//! assert_eq!(hits.len(), 2);
//! ```

pub use draw2d_core::{config, data, error, event_bus, location};
pub use draw2d_model::{drawing, events, model};

pub use draw2d_core::{
    Bounds, ChangePhase, ChangeRejected, Color, ColorParseError, Config, Corner, DrawingError,
    Error, Location, LoggingSettings, Point, Result, ShapeDefaults, SubscriptionId,
};

pub use draw2d_model::{
    Drawing, DrawingEvent, DrawingEventKind, EllipseGeometry, Geometry, Polygon, PolygonGeometry,
    Shape, ShapeEvent, ShapeEventKind, ShapeId, ShapeType, TagValue,
};

use anyhow::Context;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging from the environment
///
/// Human-readable output on stdout, filtered by `RUST_LOG` (default `info`).
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!("Draw2D {} logging initialized", VERSION);
    Ok(())
}

/// Initialize logging from [`LoggingSettings`]
///
/// The filter directive comes from the settings; `json` selects JSON lines
/// instead of text.
pub fn init_logging_with(settings: &LoggingSettings) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_new(&settings.filter)
        .with_context(|| format!("Invalid log filter '{}'", settings.filter))?;

    let registry = tracing_subscriber::registry().with(env_filter);
    let installed = if settings.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stdout))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stdout).with_target(true))
            .try_init()
    };
    installed.context("Failed to install tracing subscriber")?;

    tracing::debug!(
        "Draw2D {} logging initialized (filter: {}, json: {})",
        VERSION,
        settings.filter,
        settings.json
    );
    Ok(())
}
