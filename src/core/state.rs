//! Per-state definitions: transition table plus entry effect.

use super::identifier::Identifier;
use super::transition::Transition;
use crate::effects::{Cleanup, Effect, EffectArgs};
use std::fmt;

/// Definition of a single state.
///
/// Holds the state's transition table, kept in declaration order, and an
/// optional entry effect. A node without transitions is terminal.
///
/// # Example
///
/// ```rust
/// use reactive_fsm::{StateNode, Transition};
///
/// let loading: StateNode<&str, &str, ()> = StateNode::new()
///     .on("success", "done")
///     .on("error", Transition::to("failed").when(|_| true))
///     .effect(|_| None);
///
/// assert_eq!(loading.events().collect::<Vec<_>>(), vec![&"success", &"error"]);
/// ```
pub struct StateNode<S, E, C> {
    on: Vec<(E, Transition<S, E, C>)>,
    effect: Option<Effect<S, E, C>>,
}

impl<S: Identifier, E: Identifier, C> StateNode<S, E, C> {
    /// Create a terminal state with no effect.
    pub fn new() -> Self {
        Self {
            on: Vec::new(),
            effect: None,
        }
    }

    /// Handle `event` with a transition.
    ///
    /// Accepts a bare target or a full [`Transition`]. Declaring the same
    /// event twice replaces the earlier rule but keeps its position.
    pub fn on(mut self, event: E, transition: impl Into<Transition<S, E, C>>) -> Self {
        let transition = transition.into();
        match self.on.iter_mut().find(|(name, _)| *name == event) {
            Some(entry) => entry.1 = transition,
            None => self.on.push((event, transition)),
        }
        self
    }

    /// Set the entry effect.
    ///
    /// The effect runs once per settled entry into this state and may
    /// return a [`Cleanup`] that runs before the next entry effect.
    pub fn effect<F>(mut self, effect: F) -> Self
    where
        F: Fn(EffectArgs<'_, S, E, C>) -> Option<Cleanup> + Send + Sync + 'static,
    {
        self.effect = Some(Effect::new(effect));
        self
    }

    /// Event names this state handles, in declaration order.
    pub fn events(&self) -> impl Iterator<Item = &E> {
        self.on.iter().map(|(name, _)| name)
    }

    /// Whether this state declares no transitions.
    pub fn is_terminal(&self) -> bool {
        self.on.is_empty()
    }

    pub(crate) fn transition(&self, event: &E) -> Option<&Transition<S, E, C>> {
        self.on
            .iter()
            .find(|(name, _)| name == event)
            .map(|(_, transition)| transition)
    }

    pub(crate) fn rules(&self) -> impl Iterator<Item = (&E, &Transition<S, E, C>)> {
        self.on.iter().map(|(name, transition)| (name, transition))
    }

    pub(crate) fn entry_effect(&self) -> Option<&Effect<S, E, C>> {
        self.effect.as_ref()
    }
}

impl<S: Identifier, E: Identifier, C> Default for StateNode<S, E, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: fmt::Debug, E: fmt::Debug, C> fmt::Debug for StateNode<S, E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateNode")
            .field("on", &self.on)
            .field("effect", &self.effect.is_some())
            .finish()
    }
}
