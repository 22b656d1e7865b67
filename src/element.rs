use std::rc::{Rc, Weak};

use crate::signal::{create_rw_signal, RwSignal};

/// Measured content size of an element, in whole pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0,
        height: 0,
    };

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are exactly zero.
    pub fn is_zero(&self) -> bool {
        self.width == 0 && self.height == 0
    }
}

/// Measurement capability of a rendered element.
pub trait Element {
    /// Current content width and height of the element.
    fn client_size(&self) -> Size;
}

/// A weak, reactive handle to a mounted [`Element`].
///
/// The handle never owns the element: it holds a [`Weak`] reference and a
/// dead one reads as unresolved. It starts unresolved and resolves once
/// [`set`](ElementRef::set) points it at a mounted element. Effects that
/// read it through [`get`](ElementRef::get) re-run only when the referenced
/// identity changes.
pub struct ElementRef {
    inner: RwSignal<Option<Weak<dyn Element>>>,
}

impl Copy for ElementRef {}

impl Clone for ElementRef {
    fn clone(&self) -> Self {
        *self
    }
}

impl Default for ElementRef {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementRef {
    /// Create an unresolved reference under the current scope.
    pub fn new() -> Self {
        Self {
            inner: create_rw_signal(None),
        }
    }

    /// Point the reference at `element`. A no-op when the identity is
    /// unchanged, so re-setting the same element does not re-run observers.
    pub fn set(&self, element: &Rc<dyn Element>) {
        let changed = self.inner.with_untracked(|current| {
            match current.as_ref().and_then(Weak::upgrade) {
                Some(live) => !Rc::ptr_eq(&live, element),
                None => true,
            }
        });
        if changed {
            self.inner.set(Some(Rc::downgrade(element)));
        }
    }

    /// Reset to unresolved. A no-op when already unresolved.
    pub fn clear(&self) {
        let resolved = self.inner.with_untracked(|current| current.is_some());
        if resolved {
            self.inner.set(None);
        }
    }

    /// Resolve the element, subscribing the running effect to identity
    /// changes. A dead weak handle resolves to `None`.
    pub fn get(&self) -> Option<Rc<dyn Element>> {
        self.inner.with(|current| current.as_ref().and_then(Weak::upgrade))
    }

    /// Resolve the element without subscribing.
    pub fn get_untracked(&self) -> Option<Rc<dyn Element>> {
        self.inner
            .with_untracked(|current| current.as_ref().and_then(Weak::upgrade))
    }
}
