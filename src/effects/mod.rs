//! Entry effects and the once-per-tick scheduler.
//!
//! Transitions are applied synchronously by the dispatcher; effects are
//! not. They run when the host flushes a tick, and only for the state the
//! machine settled in.
//!
//! # Key Concepts
//!
//! - **Effect**: user function run on entry into a state, may return a cleanup
//! - **Cleanup**: runs before the next entry effect, or on teardown
//! - **Pass**: one cleanup-then-entry step; a flush runs passes until no
//!   effect transitions the machine any further

mod effect;
mod scheduler;

pub use effect::{Cleanup, Effect, EffectArgs};
