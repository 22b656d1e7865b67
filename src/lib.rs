//! Reactive element size observation with breakpoint flags.
//!
//! `sizewatch` tracks the rendered size of a UI element and exposes reactive
//! width/height plus derived breakpoint flags to the observing code. It is
//! built on a fine-grained reactive core: reads inside an effect subscribe
//! that effect, and writes re-run exactly the subscribed effects.
//!
//! The platform is injected rather than assumed: hosts provide element
//! measurement through [`Element`], and resize notification plus timer
//! scheduling through [`WindowHandle`]. [`MockWindow`] implements the latter
//! for headless tests.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use sizewatch::{Breakpoints, Element, ElementRef, MockWindow, Size, SizeObserver};
//!
//! struct Panel {
//!     size: Cell<Size>,
//! }
//!
//! impl Element for Panel {
//!     fn client_size(&self) -> Size {
//!         self.size.get()
//!     }
//! }
//!
//! let window = MockWindow::new();
//! let el = ElementRef::new();
//! let observer = SizeObserver::new(
//!     Rc::new(window.clone()),
//!     el,
//!     Breakpoints::default().with_mobile(500),
//! );
//!
//! // Nothing mounted yet: zero size, and zero is below the mobile cutoff.
//! assert_eq!(observer.width(), 0);
//! assert!(observer.is_mobile());
//!
//! let panel: Rc<dyn Element> = Rc::new(Panel {
//!     size: Cell::new(Size::new(640, 480)),
//! });
//! el.set(&panel);
//!
//! assert_eq!(observer.width(), 640);
//! assert!(!observer.is_mobile());
//! assert_eq!(window.listener_count(), 1);
//! ```

mod breakpoints;
mod debounce;
mod effect;
mod element;
mod id;
mod mock_window;
mod observer;
mod runtime;
mod scope;
mod signal;
mod window;

pub use breakpoints::{Breakpoints, SizeFlags};
pub use debounce::Debounce;
pub use effect::create_effect;
pub use element::{Element, ElementRef, Size};
pub use mock_window::MockWindow;
pub use observer::{create_size_observer, SizeObserver, SizeReading, DEFAULT_RESIZE_DEBOUNCE};
pub use scope::{on_cleanup, with_scope, Scope};
pub use signal::{create_rw_signal, create_signal, ReadSignal, RwSignal, WriteSignal};
pub use window::{ResizeCallback, Subscription, TimerToken, WindowHandle};
