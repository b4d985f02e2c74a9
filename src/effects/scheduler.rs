//! Once-per-tick effect passes.

use super::effect::{Cleanup, EffectArgs};
use crate::core::{Identifier, Snapshot};
use crate::error::MachineError;
use crate::machine::{Cell, ContextSetter, Inner, Sender};
use parking_lot::Mutex;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Clears `Cell::flushing` when a flush unwinds out of user code.
struct FlushingFlag<'a, S, E, C> {
    cell: &'a Mutex<Cell<S, E, C>>,
    armed: bool,
}

impl<S, E, C> Drop for FlushingFlag<'_, S, E, C> {
    fn drop(&mut self) {
        if self.armed {
            self.cell.lock().flushing = false;
        }
    }
}

impl<S: Identifier, E: Identifier, C: Send + Sync + 'static> Inner<S, E, C> {
    /// Run effect passes until no entry effect transitions the machine.
    ///
    /// A pass runs only if a transition happened since the previous one
    /// (or none has run yet). It sees the final snapshot of the tick, so
    /// states passed through within the tick never have their effects run.
    ///
    /// Only one flush runs at a time. A flush started while another is in
    /// progress (from an observer callback, or another thread) returns
    /// `Ok(0)`; the running flush picks up whatever it transitioned.
    pub(crate) fn flush(self: &Arc<Self>) -> Result<usize, MachineError> {
        {
            let mut cell = self.cell.lock();
            if cell.flushing {
                tracing::trace!("flush already in progress");
                return Ok(0);
            }
            cell.flushing = true;
        }
        let mut flushing = FlushingFlag {
            cell: &self.cell,
            armed: true,
        };
        let mut passes = 0;

        loop {
            let (snapshot, left, cleanup) = {
                let mut cell = self.cell.lock();
                if cell.stopped || !cell.effects_pending() {
                    // Released under the same lock as the check, so a send
                    // racing with this return is never left unflushed.
                    cell.flushing = false;
                    flushing.armed = false;
                    return Ok(passes);
                }
                if passes >= self.max_flush_passes {
                    cell.flushing = false;
                    flushing.armed = false;
                    tracing::warn!(
                        passes,
                        state = ?cell.snapshot.value(),
                        "effect pass limit exceeded"
                    );
                    return Err(MachineError::FlushLimitExceeded { passes });
                }
                cell.effect_revision = Some(cell.revision);
                let snapshot = Arc::clone(&cell.snapshot);
                let left = cell.entered.replace(snapshot.value().clone());
                (snapshot, left, cell.cleanup.take())
            };

            passes += 1;
            tracing::debug!(
                pass = passes,
                left = ?left,
                entered = ?snapshot.value(),
                "running effect pass"
            );
            self.run_pass(&snapshot, cleanup);
        }
    }

    /// Cleanup of the state being left, then entry effect of `snapshot`.
    ///
    /// A panicking cleanup does not stop the entry effect: its panic is
    /// resumed once the entry effect has run and its cleanup is stored.
    fn run_pass(self: &Arc<Self>, snapshot: &Snapshot<S, E, C>, cleanup: Option<Cleanup>) {
        let cleanup_outcome =
            cleanup.map(|cleanup| panic::catch_unwind(AssertUnwindSafe(|| cleanup.run())));

        let next_cleanup = self
            .definition
            .node(snapshot.value())
            .and_then(|node| node.entry_effect())
            .and_then(|effect| {
                let send = Sender::new(Arc::clone(self));
                let set_context = ContextSetter::new(Arc::clone(self));
                effect.run(EffectArgs {
                    context: snapshot.context(),
                    event: snapshot.event(),
                    send: &send,
                    set_context: &set_context,
                })
            });

        if let Some(next_cleanup) = next_cleanup {
            let mut cell = self.cell.lock();
            if cell.stopped {
                // Torn down from inside the effect; nothing will run this later.
                drop(cell);
                next_cleanup.run();
            } else {
                cell.cleanup = Some(next_cleanup);
            }
        }

        if let Some(Err(payload)) = cleanup_outcome {
            panic::resume_unwind(payload);
        }
    }
}
