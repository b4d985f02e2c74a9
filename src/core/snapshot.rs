//! Immutable machine snapshots.

use super::event::Event;
use serde::Serialize;
use std::sync::Arc;

/// Observable state of a machine at one instant.
///
/// Snapshots are never mutated: every accepted transition or context
/// update publishes a fresh one. `next_events` always lists exactly the
/// events declared by the state in `value`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<S, E, C> {
    value: S,
    context: Arc<C>,
    event: Event<E>,
    next_events: Vec<E>,
}

impl<S, E, C> Snapshot<S, E, C> {
    pub(crate) fn initial(value: S, context: C, next_events: Vec<E>) -> Self {
        Self {
            value,
            context: Arc::new(context),
            event: Event::initial(),
            next_events,
        }
    }

    /// Current state name.
    pub fn value(&self) -> &S {
        &self.value
    }

    /// Machine-wide context.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Last accepted event, or the initial marker.
    pub fn event(&self) -> &Event<E> {
        &self.event
    }

    /// Events the current state handles.
    pub fn next_events(&self) -> &[E] {
        &self.next_events
    }

    /// Whether `event` is handled by the current state.
    ///
    /// A `true` answer does not mean a guard will permit it.
    pub fn can(&self, event: &E) -> bool
    where
        E: PartialEq,
    {
        self.next_events.contains(event)
    }

    /// Whether the machine is currently in `state`.
    pub fn matches(&self, state: &S) -> bool
    where
        S: PartialEq,
    {
        self.value == *state
    }
}

impl<S: Clone, E: Clone, C> Snapshot<S, E, C> {
    pub(crate) fn transition(&self, value: S, event: Event<E>, next_events: Vec<E>) -> Self {
        Self {
            value,
            context: Arc::clone(&self.context),
            event,
            next_events,
        }
    }

    pub(crate) fn with_context(&self, context: C) -> Self {
        Self {
            value: self.value.clone(),
            context: Arc::new(context),
            event: self.event.clone(),
            next_events: self.next_events.clone(),
        }
    }
}
