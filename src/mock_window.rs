//! Mock window implementation for headless testing.
//!
//! This module provides a [`WindowHandle`] double that works without a real
//! window system: resize notifications are emitted manually and timers fire
//! against a manually advanced clock.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    time::Duration,
};

use crate::window::{ResizeCallback, Subscription, TimerToken, WindowHandle};

/// A [`WindowHandle`] double with a manual clock.
///
/// Clones share state, so a test can keep one handle for driving and hand
/// another to the code under observation.
#[derive(Clone, Default)]
pub struct MockWindow {
    inner: Rc<MockWindowInner>,
}

#[derive(Default)]
struct MockWindowInner {
    now: Cell<Duration>,
    next_listener: Cell<u64>,
    listeners: RefCell<Vec<(u64, Rc<ResizeCallback>)>>,
    timers: RefCell<Vec<MockTimer>>,
}

struct MockTimer {
    token: TimerToken,
    deadline: Duration,
    action: Box<dyn FnOnce(TimerToken)>,
}

impl MockWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invoke every registered resize listener.
    pub fn emit_resize(&self) {
        let listeners: Vec<Rc<ResizeCallback>> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect();
        for callback in listeners {
            callback();
        }
    }

    /// Advance the clock by `elapsed`, firing due timers in deadline order.
    /// Actions may request new timers; those fire too if they fall within
    /// the advanced window.
    pub fn advance(&self, elapsed: Duration) {
        let target = self.inner.now.get() + elapsed;
        loop {
            let due = {
                let timers = self.inner.timers.borrow();
                timers
                    .iter()
                    .enumerate()
                    .filter(|(_, timer)| timer.deadline <= target)
                    .min_by_key(|(_, timer)| timer.deadline)
                    .map(|(index, _)| index)
            };
            let Some(index) = due else {
                break;
            };
            let timer = self.inner.timers.borrow_mut().remove(index);
            if timer.deadline > self.inner.now.get() {
                self.inner.now.set(timer.deadline);
            }
            (timer.action)(timer.token);
        }
        self.inner.now.set(target);
    }

    /// Number of currently registered resize listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Number of timers that have not fired yet.
    pub fn pending_timer_count(&self) -> usize {
        self.inner.timers.borrow().len()
    }
}

impl WindowHandle for MockWindow {
    fn add_resize_listener(&self, callback: Rc<ResizeCallback>) -> Subscription {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner.listeners.borrow_mut().push((id, callback));

        let inner = self.inner.clone();
        Subscription::new(move || {
            inner
                .listeners
                .borrow_mut()
                .retain(|(listener, _)| *listener != id);
        })
    }

    fn request_timer(&self, delay: Duration, action: Box<dyn FnOnce(TimerToken)>) -> TimerToken {
        let token = TimerToken::next();
        self.inner.timers.borrow_mut().push(MockTimer {
            token,
            deadline: self.inner.now.get() + delay,
            action,
        });
        token
    }
}
