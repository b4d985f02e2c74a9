//! Binding between a machine and its host.

use std::sync::Arc;

/// The host a machine reports to.
///
/// A rendering component typically re-reads the snapshot in
/// `snapshot_changed` and, once it has committed that snapshot, calls
/// [`Machine::flush`](crate::Machine::flush) in response to
/// `effects_scheduled`. Both callbacks run synchronously inside `send` or
/// `set_context`, so they must only record or enqueue work: flushing from
/// inside them would run effects before the batch settles.
pub trait Observer: Send + Sync {
    /// A new snapshot was published.
    fn snapshot_changed(&self) {}

    /// A state transition happened; an effect pass is due after commit.
    fn effects_scheduled(&self) {}
}

/// Observer used when the host polls the machine itself.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Detached;

impl Observer for Detached {}

impl<T: Observer + ?Sized> Observer for Arc<T> {
    fn snapshot_changed(&self) {
        (**self).snapshot_changed();
    }

    fn effects_scheduled(&self) {
        (**self).effects_scheduled();
    }
}
