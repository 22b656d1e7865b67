use std::{cell::Cell, rc::Rc, time::Duration};

use crate::window::{TimerToken, WindowHandle};

/// Collapses a burst of notifications into a single deferred action.
///
/// Each [`schedule`](Debounce::schedule) supersedes whatever was pending:
/// when a timer fires, its action runs only if its token is still the
/// pending one. [`cancel`](Debounce::cancel) invalidates the pending token,
/// so an already requested timer fires into a no-op. Clones share the
/// pending state.
#[derive(Clone)]
pub struct Debounce {
    window: Rc<dyn WindowHandle>,
    quiet: Duration,
    pending: Rc<Cell<TimerToken>>,
}

impl Debounce {
    pub fn new(window: Rc<dyn WindowHandle>, quiet: Duration) -> Self {
        Self {
            window,
            quiet,
            pending: Rc::new(Cell::new(TimerToken::INVALID)),
        }
    }

    /// Run `action` after the quiet period, dropping any pending action.
    pub fn schedule(&self, action: impl FnOnce() + 'static) {
        let pending = self.pending.clone();
        let token = self.window.request_timer(
            self.quiet,
            Box::new(move |token| {
                if pending.get() == token {
                    pending.set(TimerToken::INVALID);
                    action();
                }
            }),
        );
        self.pending.set(token);
    }

    /// Drop the pending action, if any.
    pub fn cancel(&self) {
        self.pending.set(TimerToken::INVALID);
    }
}
