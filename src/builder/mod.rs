//! Builder API for machine definitions.
//!
//! This module provides the fluent [`StateMachineBuilder`], the
//! [`name_enum!`](crate::name_enum) macro for closed name sets, and
//! shorthand constructors for transition rules.

pub mod error;
pub mod machine;
pub mod macros;
mod validation;

pub use error::{BuildError, DefinitionViolation};
pub use machine::{StateMachineBuilder, DEFAULT_MAX_FLUSH_PASSES};

use crate::core::{GuardArgs, Transition};

/// Create an unconditional transition.
///
/// # Example
///
/// ```
/// use reactive_fsm::builder::simple_transition;
/// use reactive_fsm::Transition;
///
/// let rule: Transition<&str, &str, ()> = simple_transition("done");
/// assert!(rule.guard.is_none());
/// ```
pub fn simple_transition<S, E, C>(target: S) -> Transition<S, E, C> {
    Transition::to(target)
}

/// Create a transition with a guard predicate.
///
/// # Example
///
/// ```
/// use reactive_fsm::builder::guarded_transition;
/// use reactive_fsm::{Event, Transition};
///
/// const RETRY_LIMIT: u32 = 3;
///
/// let retry: Transition<&str, &str, u32> =
///     guarded_transition("loading", |args| *args.context < RETRY_LIMIT);
///
/// assert!(retry.permits(&0, &Event::new("retry")));
/// assert!(!retry.permits(&3, &Event::new("retry")));
/// ```
pub fn guarded_transition<S, E, C, F>(target: S, guard: F) -> Transition<S, E, C>
where
    F: Fn(GuardArgs<'_, E, C>) -> bool + Send + Sync + 'static,
{
    Transition::to(target).when(guard)
}
