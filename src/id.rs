use std::sync::atomic::{AtomicU64, Ordering};

use crate::{effect::observer_clean_up, runtime::RUNTIME, signal::Signal};

/// A stable identifier for a signal, effect, or scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct Id(u64);

impl Id {
    pub(crate) fn next() -> Id {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Id(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub(crate) fn signal(&self) -> Option<Signal> {
        RUNTIME.with(|runtime| runtime.signals.borrow().get(self).cloned())
    }

    pub(crate) fn add_signal(&self, signal: Signal) {
        RUNTIME.with(|runtime| runtime.signals.borrow_mut().insert(*self, signal));
    }

    /// Register this id as a child of the current scope.
    pub(crate) fn set_scope(&self) {
        RUNTIME.with(|runtime| {
            let scope = runtime.current_scope.borrow();
            let mut children = runtime.children.borrow_mut();
            let children = children.entry(*scope).or_default();
            children.insert(*self);
        });
    }

    /// Dispose this id and everything it owns. Children go first; then the
    /// effects subscribed to a signal stored under this id are unlinked; then
    /// an effect registered under this id is unlinked from the signals it
    /// observes; cleanup callbacks run last, drained so each runs at most
    /// once.
    pub(crate) fn dispose(&self) {
        let (children, signal, effect, cleanups) = RUNTIME.with(|runtime| {
            (
                runtime.children.borrow_mut().remove(self),
                runtime.signals.borrow_mut().remove(self),
                runtime.effects.borrow_mut().remove(self),
                runtime.cleanups.borrow_mut().remove(self),
            )
        });

        if let Some(children) = children {
            for child in children {
                child.dispose();
            }
        }

        if let Some(signal) = signal {
            for (_, effect) in signal.subscribers() {
                observer_clean_up(&effect);
            }
        }

        if let Some(effect) = effect {
            observer_clean_up(&effect);
        }

        if let Some(cleanups) = cleanups {
            for cleanup in cleanups {
                cleanup();
            }
        }
    }
}
