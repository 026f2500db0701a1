//! Listener registry implementation.
//!
//! Provides `ListenerList`, the ordered subscriber list every shape and
//! drawing uses to broadcast its change events.

use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use super::events::Vetoable;
use crate::error::ChangeRejected;

/// Subscription handle for unsubscribing a listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Create a new unique subscription ID
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Type alias for listener callbacks
///
/// A listener returns `Err` to veto a pending (before-phase) change.
pub type Listener<E> = Arc<dyn Fn(&E) -> Result<(), ChangeRejected> + Send + Sync>;

/// Ordered list of listeners for events of type `E`
///
/// Listeners are notified in registration order. Every dispatch iterates a
/// snapshot of the list taken when the dispatch starts, and no lock is held
/// while a listener runs: a listener may subscribe or unsubscribe listeners
/// (the change applies from the next dispatch on) and may query or mutate the
/// object that fired the event.
pub struct ListenerList<E> {
    listeners: RwLock<Vec<(SubscriptionId, Listener<E>)>>,
}

impl<E: Vetoable> ListenerList<E> {
    /// Create an empty listener list
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Append a listener
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&E) -> Result<(), ChangeRejected> + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        self.listeners.write().push((id, Arc::new(listener)));
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Remove a listener
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(sub, _)| *sub != id);
        let removed = listeners.len() != before;
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    /// Whether `id` is currently subscribed
    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.listeners.read().iter().any(|(sub, _)| *sub == id)
    }

    /// Number of registered listeners
    pub fn len(&self) -> usize {
        self.listeners.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.read().is_empty()
    }

    fn snapshot(&self) -> Vec<Listener<E>> {
        self.listeners
            .read()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect()
    }

    /// Broadcast an event to every listener
    ///
    /// For a vetoable event the first rejection stops delivery and is
    /// returned. For other events every listener is called, rejections are
    /// logged, and the result is always `Ok`.
    pub fn fire(&self, event: &E) -> Result<(), ChangeRejected> {
        let listeners = self.snapshot();
        tracing::trace!("Dispatching event to {} listeners", listeners.len());

        if event.is_vetoable() {
            for listener in &listeners {
                listener(event)?;
            }
        } else {
            for listener in &listeners {
                if let Err(rejection) = listener(event) {
                    tracing::warn!(
                        "Listener rejected a non-vetoable event, ignoring: {}",
                        rejection.reason()
                    );
                }
            }
        }
        Ok(())
    }
}

impl<E: Vetoable> Default for ListenerList<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for ListenerList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerList")
            .field(
                "listeners",
                &format!("<{} listeners>", self.listeners.read().len()),
            )
            .finish()
    }
}
