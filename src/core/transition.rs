//! Transition rules attached to a (state, event) pair.

use super::event::Event;
use super::guard::{Guard, GuardArgs};

/// A transition to `target`, optionally gated by a guard.
///
/// A bare target converts into an always-permitted rule, so state
/// definitions can use either shape:
///
/// ```rust
/// use reactive_fsm::Transition;
///
/// let shorthand: Transition<&str, &str, ()> = "bar".into();
/// let full: Transition<&str, &str, ()> = Transition::to("bar").when(|_| true);
///
/// assert_eq!(shorthand.target, full.target);
/// assert!(shorthand.guard.is_none());
/// assert!(full.guard.is_some());
/// ```
pub struct Transition<S, E, C> {
    pub target: S,
    pub guard: Option<Guard<E, C>>,
}

impl<S, E, C> Transition<S, E, C> {
    /// Create an unguarded transition.
    pub fn to(target: S) -> Self {
        Self {
            target,
            guard: None,
        }
    }

    /// Gate the transition with a predicate.
    pub fn when<F>(self, predicate: F) -> Self
    where
        F: Fn(GuardArgs<'_, E, C>) -> bool + Send + Sync + 'static,
    {
        self.with_guard(Guard::new(predicate))
    }

    /// Gate the transition with a prebuilt guard.
    pub fn with_guard(mut self, guard: Guard<E, C>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Whether the transition may fire for this context and event.
    ///
    /// An absent guard always permits.
    pub fn permits(&self, context: &C, event: &Event<E>) -> bool {
        self.guard
            .as_ref()
            .map_or(true, |guard| guard.check(context, event))
    }
}

impl<S, E, C> From<S> for Transition<S, E, C> {
    fn from(target: S) -> Self {
        Self::to(target)
    }
}

impl<S: Clone, E, C> Clone for Transition<S, E, C> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
            guard: self.guard.clone(),
        }
    }
}

impl<S: std::fmt::Debug, E, C> std::fmt::Debug for Transition<S, E, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transition")
            .field("target", &self.target)
            .field("guarded", &self.guard.is_some())
            .finish()
    }
}
