//! Entry effect and cleanup types.

use crate::core::Event;
use crate::machine::{ContextSetter, Sender};
use std::fmt;
use std::sync::Arc;

/// Arguments handed to an entry effect.
///
/// `context` and `event` come from the snapshot the machine settled in.
/// `send` and `set_context` are handles to the same machine; clone them
/// to keep using the machine from async continuations.
pub struct EffectArgs<'a, S, E, C> {
    /// Context at the time the effect runs
    pub context: &'a C,
    /// The event that led into this state
    pub event: &'a Event<E>,
    /// Dispatcher for further events
    pub send: &'a Sender<S, E, C>,
    /// Context reducer
    pub set_context: &'a ContextSetter<S, E, C>,
}

type EffectFn<S, E, C> = dyn Fn(EffectArgs<'_, S, E, C>) -> Option<Cleanup> + Send + Sync;

/// Entry effect of a state.
pub struct Effect<S, E, C> {
    run: Arc<EffectFn<S, E, C>>,
}

impl<S, E, C> Effect<S, E, C> {
    pub fn new<F>(effect: F) -> Self
    where
        F: Fn(EffectArgs<'_, S, E, C>) -> Option<Cleanup> + Send + Sync + 'static,
    {
        Self {
            run: Arc::new(effect),
        }
    }

    pub(crate) fn run(&self, args: EffectArgs<'_, S, E, C>) -> Option<Cleanup> {
        (self.run)(args)
    }
}

impl<S, E, C> Clone for Effect<S, E, C> {
    fn clone(&self) -> Self {
        Self {
            run: Arc::clone(&self.run),
        }
    }
}

impl<S, E, C> fmt::Debug for Effect<S, E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Effect").finish_non_exhaustive()
    }
}

/// Teardown returned by an entry effect.
///
/// Runs at most once: before the next entry effect, or when the machine
/// is stopped.
pub struct Cleanup(Box<dyn FnOnce() + Send>);

impl Cleanup {
    pub fn new<F>(cleanup: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self(Box::new(cleanup))
    }

    pub(crate) fn run(self) {
        (self.0)()
    }
}

impl fmt::Debug for Cleanup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Cleanup")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn cleanup_runs_its_closure_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cleanup = Cleanup::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        cleanup.run();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn cloned_effect_shares_function() {
        let effect: Effect<&str, &str, ()> = Effect::new(|_| None);
        let cloned = effect.clone();

        assert!(Arc::ptr_eq(&effect.run, &cloned.run));
    }
}
