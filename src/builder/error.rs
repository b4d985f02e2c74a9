//! Build errors for machine definitions.

use thiserror::Error;

/// Errors that can occur when building a machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Invalid machine definition: {}", join(.0))]
    InvalidDefinition(Vec<DefinitionViolation>),
}

impl BuildError {
    /// Every violation found, empty for other errors.
    pub fn violations(&self) -> &[DefinitionViolation] {
        match self {
            Self::InvalidDefinition(violations) => violations,
            Self::MissingInitialState => &[],
        }
    }
}

fn join(violations: &[DefinitionViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single inconsistency in a machine definition.
///
/// States and events are rendered with their `Debug` form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DefinitionViolation {
    #[error("Initial state {initial} is not declared")]
    UnknownInitialState { initial: String },

    #[error("State {state} sends {event} to {target}, which is not declared")]
    UnknownTarget {
        state: String,
        event: String,
        target: String,
    },

    #[error("max_flush_passes must be at least 1; no entry effect could ever run")]
    ZeroFlushPasses,
}
