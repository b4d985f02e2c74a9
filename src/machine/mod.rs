//! The live machine and its handles.
//!
//! A [`Machine`] owns one mutable cell holding the current snapshot, the
//! transition revision, the pending cleanup and the stop flag. Handles
//! ([`Sender`], [`ContextSetter`]) share that cell and always act on the
//! latest committed snapshot, so calling them reentrantly from effects or
//! later from async continuations is safe.
//!
//! The internal lock is never held while user code runs.

mod context;
mod dispatch;
mod observer;

pub use context::ContextSetter;
pub use dispatch::Sender;
pub use observer::Observer;
pub(crate) use observer::Detached;

use crate::core::{Event, Identifier, Snapshot, StateNode};
use crate::effects::Cleanup;
use crate::error::MachineError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Validated machine definition.
pub(crate) struct Definition<S, E, C> {
    pub(crate) initial: S,
    pub(crate) states: HashMap<S, StateNode<S, E, C>>,
}

impl<S: Identifier, E: Identifier, C> Definition<S, E, C> {
    pub(crate) fn node(&self, state: &S) -> Option<&StateNode<S, E, C>> {
        self.states.get(state)
    }

    pub(crate) fn next_events(&self, state: &S) -> Vec<E> {
        self.node(state)
            .map(|node| node.events().cloned().collect())
            .unwrap_or_default()
    }
}

/// Mutable part of a machine.
pub(crate) struct Cell<S, E, C> {
    pub(crate) snapshot: Arc<Snapshot<S, E, C>>,
    /// Bumped on every accepted state transition, never on context updates.
    pub(crate) revision: u64,
    /// Revision whose effect pass last ran; `None` before the first pass.
    pub(crate) effect_revision: Option<u64>,
    /// State whose entry effect last ran.
    pub(crate) entered: Option<S>,
    pub(crate) cleanup: Option<Cleanup>,
    /// A flush is running its passes.
    pub(crate) flushing: bool,
    pub(crate) stopped: bool,
}

impl<S, E, C> Cell<S, E, C> {
    pub(crate) fn effects_pending(&self) -> bool {
        self.effect_revision != Some(self.revision)
    }
}

pub(crate) struct Inner<S, E, C> {
    pub(crate) definition: Definition<S, E, C>,
    pub(crate) cell: Mutex<Cell<S, E, C>>,
    pub(crate) observer: Box<dyn Observer>,
    pub(crate) max_flush_passes: usize,
}

impl<S: Identifier, E: Identifier, C: Send + Sync + 'static> Inner<S, E, C> {
    pub(crate) fn snapshot(&self) -> Arc<Snapshot<S, E, C>> {
        Arc::clone(&self.cell.lock().snapshot)
    }
}

impl<S, E, C> Inner<S, E, C> {
    pub(crate) fn stop(&self) {
        let cleanup = {
            let mut cell = self.cell.lock();
            if cell.stopped {
                return;
            }
            cell.stopped = true;
            cell.cleanup.take()
        };
        tracing::debug!(cleanup = cleanup.is_some(), "machine stopped");
        if let Some(cleanup) = cleanup {
            cleanup.run();
        }
    }
}

/// A running state machine.
///
/// Built with [`StateMachineBuilder`](crate::StateMachineBuilder). The
/// machine is the owner: dropping it (or calling [`Machine::stop`]) runs
/// the pending cleanup and turns every outstanding handle into a no-op.
///
/// Transitions apply immediately; entry effects wait for [`Machine::flush`],
/// which the host calls once per committed batch.
pub struct Machine<S, E, C> {
    inner: Arc<Inner<S, E, C>>,
}

impl<S: Identifier, E: Identifier, C: Send + Sync + 'static> Machine<S, E, C> {
    pub(crate) fn new(
        definition: Definition<S, E, C>,
        context: C,
        observer: Box<dyn Observer>,
        max_flush_passes: usize,
    ) -> Self {
        let initial = definition.initial.clone();
        let next_events = definition.next_events(&initial);
        let snapshot = Snapshot::initial(initial, context, next_events);
        tracing::debug!(initial = ?snapshot.value(), "machine created");

        Self {
            inner: Arc::new(Inner {
                definition,
                cell: Mutex::new(Cell {
                    snapshot: Arc::new(snapshot),
                    revision: 0,
                    effect_revision: None,
                    entered: None,
                    cleanup: None,
                    flushing: false,
                    stopped: false,
                }),
                observer,
                max_flush_passes,
            }),
        }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot<S, E, C>> {
        self.inner.snapshot()
    }

    /// A dispatcher handle for this machine.
    ///
    /// All handles of one machine compare equal, so the sender is safe to
    /// keep as a long-lived callback.
    pub fn sender(&self) -> Sender<S, E, C> {
        Sender::new(Arc::clone(&self.inner))
    }

    /// A context reducer handle for this machine.
    pub fn context_setter(&self) -> ContextSetter<S, E, C> {
        ContextSetter::new(Arc::clone(&self.inner))
    }

    /// Send an event. See [`Sender::send`].
    pub fn send(&self, event: impl Into<Event<E>>) {
        self.inner.dispatch(event.into());
    }

    /// Update the context. See [`ContextSetter::set`].
    pub fn set_context<F>(&self, updater: F)
    where
        F: Fn(&C) -> C,
    {
        self.inner.update_context(updater);
    }

    /// Run pending effect passes for the settled state.
    ///
    /// Returns the number of passes that ran: zero when nothing
    /// transitioned since the last flush, more than one when entry effects
    /// themselves transitioned the machine. Calling it while another flush
    /// is running (say, from [`Observer::effects_scheduled`]) returns
    /// `Ok(0)` and leaves the work to the running flush.
    pub fn flush(&self) -> Result<usize, MachineError> {
        self.inner.flush()
    }

    /// Run `batch` as one tick, then flush.
    ///
    /// Every send and context update inside `batch` is applied before any
    /// effect runs, and only the final state's entry effect runs.
    pub fn act<F>(&self, batch: F) -> Result<usize, MachineError>
    where
        F: FnOnce(&Self),
    {
        batch(self);
        self.flush()
    }

    /// Whether transitions happened that no effect pass has observed yet.
    pub fn has_pending_effects(&self) -> bool {
        let cell = self.inner.cell.lock();
        !cell.stopped && cell.effects_pending()
    }

    /// State whose entry effect ran last, if any pass has run.
    pub fn entered(&self) -> Option<S> {
        self.inner.cell.lock().entered.clone()
    }

    /// Tear the machine down: run the pending cleanup and ignore any
    /// further sends, context updates and flushes. Idempotent.
    pub fn stop(&self) {
        self.inner.stop();
    }

    /// Whether [`Machine::stop`] has run.
    pub fn is_stopped(&self) -> bool {
        self.inner.cell.lock().stopped
    }
}

impl<S, E, C> Drop for Machine<S, E, C> {
    fn drop(&mut self) {
        self.inner.stop();
    }
}

impl<S: fmt::Debug, E: fmt::Debug, C: fmt::Debug> fmt::Debug for Machine<S, E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell = self.inner.cell.lock();
        f.debug_struct("Machine")
            .field("snapshot", &cell.snapshot)
            .field("revision", &cell.revision)
            .field("stopped", &cell.stopped)
            .finish_non_exhaustive()
    }
}
