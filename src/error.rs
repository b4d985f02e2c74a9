//! Errors raised by a running machine.

use thiserror::Error;

/// Errors that can occur while driving a machine.
///
/// Sending an event the current state does not handle is not an error;
/// it is a no-op. Panics raised by guards, effects and cleanups are not
/// caught and propagate to the caller.
#[derive(Debug, Error)]
pub enum MachineError {
    /// Effects kept transitioning the machine for more passes than allowed
    #[error("Effect pass limit ({passes}) exceeded; entry effects keep transitioning the machine")]
    FlushLimitExceeded { passes: usize },

    /// An event payload did not decode into the requested type
    #[error("Event payload could not be decoded: {0}")]
    Payload(#[from] serde_json::Error),
}
