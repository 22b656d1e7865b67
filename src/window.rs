use std::{rc::Rc, sync::atomic::AtomicU64, time::Duration};

/// Callback invoked on window resize notifications.
pub type ResizeCallback = dyn Fn();

/// Identifies a one-shot timer requested from a [`WindowHandle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

impl TimerToken {
    /// A token that does not correspond to any timer.
    pub const INVALID: TimerToken = TimerToken(0);

    /// Create a new token.
    pub fn next() -> TimerToken {
        static TIMER_COUNTER: AtomicU64 = AtomicU64::new(1);
        TimerToken(TIMER_COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed))
    }
}

/// The capabilities the size observer needs from its host window.
///
/// Real UI hosts implement this against their event loop; tests use
/// [`MockWindow`](crate::MockWindow).
pub trait WindowHandle {
    /// Register `callback` on the window resize notification. Disposing or
    /// dropping the returned [`Subscription`] unregisters it.
    fn add_resize_listener(&self, callback: Rc<ResizeCallback>) -> Subscription;

    /// Schedule `action` to run once, `delay` from now. Timers are one-shot
    /// and are not cancelled at the host; consumers decide staleness by
    /// comparing the fired token against the one they last requested.
    fn request_timer(&self, delay: Duration, action: Box<dyn FnOnce(TimerToken)>) -> TimerToken;
}

/// Releases a resize listener registration, at most once.
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// Unregister now instead of at drop.
    pub fn dispose(mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}
