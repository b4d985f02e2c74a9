//! Guard predicates for controlling transitions.
//!
//! Guards are pure boolean functions that decide whether a matched
//! transition may fire. They see the context as committed at the moment of
//! dispatch together with the normalized event.

use super::event::Event;
use std::fmt;
use std::sync::Arc;

/// Arguments handed to a guard.
pub struct GuardArgs<'a, E, C> {
    /// Context committed at dispatch time
    pub context: &'a C,
    /// The normalized incoming event
    pub event: &'a Event<E>,
}

type Predicate<E, C> = dyn Fn(GuardArgs<'_, E, C>) -> bool + Send + Sync;

/// Pure predicate that determines if a transition can execute.
///
/// # Example
///
/// ```rust
/// use reactive_fsm::{Event, Guard};
///
/// // Allow at most three activations.
/// let below_limit: Guard<&str, u32> = Guard::new(|args| *args.context < 3);
///
/// assert!(below_limit.check(&2, &Event::new("activate")));
/// assert!(!below_limit.check(&3, &Event::new("activate")));
/// ```
pub struct Guard<E, C> {
    predicate: Arc<Predicate<E, C>>,
}

impl<E, C> Guard<E, C> {
    /// Create a guard from a pure predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(GuardArgs<'_, E, C>) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Evaluate the predicate against a context and event.
    pub fn check(&self, context: &C, event: &Event<E>) -> bool {
        (self.predicate)(GuardArgs { context, event })
    }
}

impl<E, C> Clone for Guard<E, C> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<E, C> fmt::Debug for Guard<E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
