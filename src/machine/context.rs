//! Context updates.

use super::Inner;
use crate::core::Identifier;
use std::fmt;
use std::sync::Arc;

impl<S: Identifier, E: Identifier, C: Send + Sync + 'static> Inner<S, E, C> {
    /// Apply `updater` to the current context and publish the result.
    ///
    /// Only the context changes. No effect pass is scheduled.
    pub(crate) fn update_context<F>(&self, updater: F)
    where
        F: Fn(&C) -> C,
    {
        loop {
            let current = {
                let cell = self.cell.lock();
                if cell.stopped {
                    tracing::debug!("machine stopped; ignoring context update");
                    return;
                }
                Arc::clone(&cell.snapshot)
            };

            let next = current.with_context(updater(current.context()));

            {
                let mut cell = self.cell.lock();
                if cell.stopped {
                    return;
                }
                if !Arc::ptr_eq(&cell.snapshot, &current) {
                    continue;
                }
                cell.snapshot = Arc::new(next);
            }

            tracing::debug!(state = ?current.value(), "context updated");
            self.observer.snapshot_changed();
            return;
        }
    }
}

/// Handle for updating a machine's context.
///
/// The updater must be pure: it may be applied again if another writer
/// published a snapshot while it ran.
pub struct ContextSetter<S, E, C> {
    inner: Arc<Inner<S, E, C>>,
}

impl<S, E, C> ContextSetter<S, E, C> {
    pub(crate) fn new(inner: Arc<Inner<S, E, C>>) -> Self {
        Self { inner }
    }
}

impl<S: Identifier, E: Identifier, C: Send + Sync + 'static> ContextSetter<S, E, C> {
    /// Replace the context with `updater(current)`.
    pub fn set<F>(&self, updater: F)
    where
        F: Fn(&C) -> C,
    {
        self.inner.update_context(updater);
    }
}

impl<S, E, C> Clone for ContextSetter<S, E, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, E, C> PartialEq for ContextSetter<S, E, C> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<S, E, C> Eq for ContextSetter<S, E, C> {}

impl<S, E, C> fmt::Debug for ContextSetter<S, E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextSetter").finish_non_exhaustive()
    }
}
