//! Reactive FSM: a declarative state machine engine for reactive hosts
//!
//! A machine is described as a table of named states, each with its own
//! transition rules, optional guards and an optional entry effect. The
//! engine keeps one current [`Snapshot`], lets callers advance it by
//! sending events, and runs entry effects once per settled tick.
//!
//! # Core Concepts
//!
//! - **Transitions** apply synchronously: a second `send` in the same tick
//!   already sees the state the first one produced
//! - **Effects** are coalesced: when the host flushes a tick, only the state
//!   the machine settled in has its entry effect run, after the previous
//!   effect's cleanup
//! - **Guards** are pure predicates over the committed context and event
//! - **Context** is machine-wide and only changes through `set_context`,
//!   which never re-runs effects
//!
//! # Example
//!
//! ```rust
//! use reactive_fsm::{Cleanup, StateMachineBuilder, StateNode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let machine = StateMachineBuilder::new(0u32)
//!     .initial("inactive")
//!     .state("inactive", StateNode::new().on("toggle", "active"))
//!     .state(
//!         "active",
//!         StateNode::new()
//!             .on("toggle", "inactive")
//!             .effect(|args| {
//!                 args.set_context.set(|count: &u32| count + 1);
//!                 Some(Cleanup::new(|| println!("leaving active")))
//!             }),
//!     )
//!     .build()?;
//!
//! // The host flushes once it has committed the initial snapshot.
//! machine.flush()?;
//!
//! machine.act(|machine| machine.send("toggle"))?;
//! let snapshot = machine.snapshot();
//! assert_eq!(snapshot.value(), &"active");
//! assert_eq!(snapshot.context(), &1);
//! assert_eq!(snapshot.next_events(), &["toggle"]);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod core;
pub mod effects;
pub mod error;
pub mod machine;

// Re-export commonly used types
pub use builder::{BuildError, DefinitionViolation, StateMachineBuilder};
pub use core::{Event, EventKind, Guard, GuardArgs, Identifier, Snapshot, StateNode, Transition};
pub use effects::{Cleanup, Effect, EffectArgs};
pub use error::MachineError;
pub use machine::{ContextSetter, Machine, Observer, Sender};
