//! Phase markers shared by every change event.

use std::fmt;

/// Which half of a two-phase change an event describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangePhase {
    /// The change is pending and may still be vetoed.
    Before,
    /// The change has been applied.
    After,
}

impl ChangePhase {
    pub fn is_before(self) -> bool {
        self == ChangePhase::Before
    }

    pub fn is_after(self) -> bool {
        self == ChangePhase::After
    }
}

impl fmt::Display for ChangePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangePhase::Before => write!(f, "before"),
            ChangePhase::After => write!(f, "after"),
        }
    }
}

/// Events that may be dispatched through a [`ListenerList`](super::ListenerList)
pub trait Vetoable {
    /// True if listeners may reject this event.
    ///
    /// Dispatch of a vetoable event stops at the first rejection and reports
    /// it to the caller. Rejections of any other event are logged and ignored.
    fn is_vetoable(&self) -> bool;
}
