//! Event dispatch.

use super::Inner;
use crate::core::{Event, EventKind, Identifier};
use std::fmt;
use std::sync::Arc;

impl<S: Identifier, E: Identifier, C: Send + Sync + 'static> Inner<S, E, C> {
    /// Resolve `event` against the current snapshot and publish the result.
    ///
    /// Unknown events and denied guards leave the snapshot untouched and
    /// notify nobody.
    pub(crate) fn dispatch(&self, event: Event<E>) {
        let EventKind::Named(name) = &event.kind else {
            tracing::trace!("initial marker cannot be sent; ignoring");
            return;
        };

        loop {
            let current = {
                let cell = self.cell.lock();
                if cell.stopped {
                    tracing::debug!(event = ?name, "machine stopped; ignoring event");
                    return;
                }
                Arc::clone(&cell.snapshot)
            };

            let Some(rule) = self
                .definition
                .node(current.value())
                .and_then(|node| node.transition(name))
            else {
                tracing::trace!(state = ?current.value(), event = ?name, "event not handled");
                return;
            };

            if !rule.permits(current.context(), &event) {
                tracing::trace!(state = ?current.value(), event = ?name, "guard denied transition");
                return;
            }

            let next_events = self.definition.next_events(&rule.target);
            let next = current.transition(rule.target.clone(), event.clone(), next_events);

            {
                let mut cell = self.cell.lock();
                if cell.stopped {
                    return;
                }
                // Someone else published while the guard ran; resolve again.
                if !Arc::ptr_eq(&cell.snapshot, &current) {
                    continue;
                }
                cell.snapshot = Arc::new(next);
                cell.revision += 1;
            }

            tracing::debug!(
                from = ?current.value(),
                to = ?rule.target,
                event = ?name,
                "transition"
            );
            self.observer.snapshot_changed();
            self.observer.effects_scheduled();
            return;
        }
    }
}

/// Handle for sending events to a machine.
///
/// Cheap to clone and `Send`, so effects can move it into async tasks.
/// Each call resolves against the latest snapshot, including snapshots
/// published earlier in the same tick.
pub struct Sender<S, E, C> {
    inner: Arc<Inner<S, E, C>>,
}

impl<S, E, C> Sender<S, E, C> {
    pub(crate) fn new(inner: Arc<Inner<S, E, C>>) -> Self {
        Self { inner }
    }
}

impl<S: Identifier, E: Identifier, C: Send + Sync + 'static> Sender<S, E, C> {
    /// Send a bare event name or a full [`Event`].
    ///
    /// Events the current state does not handle, events whose guard
    /// denies, and events sent after the machine stopped are ignored.
    pub fn send(&self, event: impl Into<Event<E>>) {
        self.inner.dispatch(event.into());
    }
}

impl<S, E, C> Clone for Sender<S, E, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, E, C> PartialEq for Sender<S, E, C> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<S, E, C> Eq for Sender<S, E, C> {}

impl<S, E, C> fmt::Debug for Sender<S, E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sender").finish_non_exhaustive()
    }
}
