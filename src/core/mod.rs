//! Core machine data types.
//!
//! This module contains the pure data side of the engine:
//! - Event values and their normalization from bare names
//! - Guard predicates gating transitions
//! - Transition rules and per-state definitions
//! - Immutable snapshots handed to observers
//!
//! Nothing in here touches the live machine; scheduling and dispatch
//! live in [`crate::machine`] and [`crate::effects`].

mod event;
mod guard;
mod identifier;
mod snapshot;
mod state;
mod transition;

pub use event::{Event, EventKind};
pub use guard::{Guard, GuardArgs};
pub use identifier::Identifier;
pub use snapshot::Snapshot;
pub use state::StateNode;
pub use transition::Transition;
