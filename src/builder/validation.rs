//! Definition checks run at build time.
//!
//! Uses Stillwater's `Validation` so a definition with several broken
//! targets reports all of them at once instead of the first one.

use crate::builder::error::DefinitionViolation;
use crate::core::{Identifier, StateNode};
use std::collections::HashMap;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<DefinitionViolation>>;

/// Check that `initial` and every transition target are declared states,
/// and that a flush may run at least one pass.
pub(crate) fn validate<S: Identifier, E: Identifier, C>(
    initial: &S,
    states: &HashMap<S, StateNode<S, E, C>>,
    max_flush_passes: usize,
) -> Check {
    let mut checks: Vec<Check> = Vec::new();

    if max_flush_passes == 0 {
        checks.push(Validation::fail(DefinitionViolation::ZeroFlushPasses));
    }

    checks.push(if states.contains_key(initial) {
        Validation::success(())
    } else {
        Validation::fail(DefinitionViolation::UnknownInitialState {
            initial: format!("{initial:?}"),
        })
    });

    for (state, node) in states {
        for (event, rule) in node.rules() {
            checks.push(if states.contains_key(&rule.target) {
                Validation::success(())
            } else {
                Validation::fail(DefinitionViolation::UnknownTarget {
                    state: format!("{state:?}"),
                    event: format!("{event:?}"),
                    target: format!("{:?}", rule.target),
                })
            });
        }
    }

    Validation::all_vec(checks).map(|_| ())
}
