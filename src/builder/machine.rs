//! Builder for constructing machines.

use crate::builder::error::BuildError;
use crate::builder::validation;
use crate::core::{Identifier, StateNode};
use crate::machine::{Definition, Detached, Machine, Observer};
use std::collections::HashMap;
use stillwater::validation::Validation;

/// Passes a single flush may run before giving up on a machine whose
/// entry effects keep transitioning it.
pub const DEFAULT_MAX_FLUSH_PASSES: usize = 50;

/// Builder for constructing machines with a fluent API.
///
/// # Example
///
/// ```rust
/// use reactive_fsm::{StateMachineBuilder, StateNode};
///
/// let machine = StateMachineBuilder::new(0u32)
///     .initial("idle")
///     .state("idle", StateNode::new().on("fetch", "loading"))
///     .state("loading", StateNode::new().on("success", "done"))
///     .state("done", StateNode::new())
///     .build()
///     .unwrap();
///
/// machine.send("fetch");
/// assert_eq!(machine.snapshot().value(), &"loading");
/// ```
pub struct StateMachineBuilder<S, E, C> {
    initial: Option<S>,
    states: HashMap<S, StateNode<S, E, C>>,
    context: C,
    observer: Option<Box<dyn Observer>>,
    max_flush_passes: usize,
}

impl<S: Identifier, E: Identifier, C: Send + Sync + 'static> StateMachineBuilder<S, E, C> {
    /// Create a builder with the machine's initial context.
    pub fn new(context: C) -> Self {
        Self {
            initial: None,
            states: HashMap::new(),
            context,
            observer: None,
            max_flush_passes: DEFAULT_MAX_FLUSH_PASSES,
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Declare a state. Declaring a name twice keeps the last definition.
    pub fn state(mut self, name: S, node: StateNode<S, E, C>) -> Self {
        self.states.insert(name, node);
        self
    }

    /// Declare several states at once.
    pub fn states(mut self, states: impl IntoIterator<Item = (S, StateNode<S, E, C>)>) -> Self {
        self.states.extend(states);
        self
    }

    /// Bind the machine to a host.
    pub fn observer(mut self, observer: impl Observer + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Cap the effect passes a single flush may run. Must be at least 1.
    pub fn max_flush_passes(mut self, passes: usize) -> Self {
        self.max_flush_passes = passes;
        self
    }

    /// Build the machine.
    ///
    /// Fails if no initial state was set, if the initial state or any
    /// transition target is not a declared state, or if the pass limit is
    /// zero. All such violations are reported together.
    pub fn build(self) -> Result<Machine<S, E, C>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        let checked = validation::validate(&initial, &self.states, self.max_flush_passes);
        if let Validation::Failure(violations) = checked {
            return Err(BuildError::InvalidDefinition(
                violations.iter().cloned().collect(),
            ));
        }

        let observer = self.observer.unwrap_or_else(|| Box::new(Detached));
        let definition = Definition {
            initial,
            states: self.states,
        };

        Ok(Machine::new(
            definition,
            self.context,
            observer,
            self.max_flush_passes,
        ))
    }
}

impl<S: Identifier, E: Identifier, C: Default + Send + Sync + 'static> Default
    for StateMachineBuilder<S, E, C>
{
    fn default() -> Self {
        Self::new(C::default())
    }
}
