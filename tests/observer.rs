//! End-to-end tests for the size observer, driven through [`MockWindow`].
//!
//! The element is a plain struct behind the [`Element`] measurement trait;
//! resize notifications and the debounce clock are driven manually.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use sizewatch::{
    create_effect, create_size_observer, Breakpoints, Element, ElementRef, MockWindow, Size,
    SizeFlags, SizeObserver, SizeReading,
};

// ============================================================================
// Fixtures
// ============================================================================

struct Panel {
    size: Cell<Size>,
}

impl Panel {
    fn new(width: u32, height: u32) -> Rc<Panel> {
        Rc::new(Panel {
            size: Cell::new(Size::new(width, height)),
        })
    }

    fn resize(&self, width: u32, height: u32) {
        self.size.set(Size::new(width, height));
    }
}

impl Element for Panel {
    fn client_size(&self) -> Size {
        self.size.get()
    }
}

fn mount(el: &ElementRef, panel: &Rc<Panel>) {
    let element: Rc<dyn Element> = panel.clone();
    el.set(&element);
}

fn observe(window: &MockWindow, el: ElementRef) -> SizeObserver {
    SizeObserver::new(Rc::new(window.clone()), el, Breakpoints::default())
}

// ============================================================================
// Mount and measurement
// ============================================================================

#[test]
fn unresolved_reference_reads_zero() {
    let window = MockWindow::new();
    let observer = observe(&window, ElementRef::new());

    let reading = observer.read();
    assert_eq!(reading.width, 0);
    assert_eq!(reading.height, 0);
    assert!(reading.is_mobile);
    assert!(!reading.is_wide);
    assert_eq!(window.listener_count(), 0);
}

#[test]
fn initial_measurement_is_published_on_mount() {
    let window = MockWindow::new();
    let el = ElementRef::new();
    let observer = observe(&window, el);

    let panel = Panel::new(300, 200);
    mount(&el, &panel);

    assert_eq!(
        observer.read(),
        SizeReading {
            width: 300,
            height: 200,
            is_mobile: true,
            is_wide: false,
        }
    );
    assert_eq!(window.listener_count(), 1);
}

#[test]
fn zero_sized_element_is_not_listened_to() {
    let window = MockWindow::new();
    let el = ElementRef::new();
    let observer = observe(&window, el);

    let panel = Panel::new(0, 0);
    mount(&el, &panel);

    assert_eq!(window.listener_count(), 0);

    // The element grows later, but nothing is listening: the size stays
    // frozen until the reference changes identity.
    panel.resize(640, 480);
    window.emit_resize();
    window.advance(Duration::from_millis(100));

    assert_eq!(observer.size(), Size::ZERO);
}

#[test]
fn reference_identity_change_remeasures_immediately() {
    let window = MockWindow::new();
    let el = ElementRef::new();
    let observer = observe(&window, el);

    let first = Panel::new(300, 200);
    mount(&el, &first);
    assert_eq!(observer.width(), 300);
    assert_eq!(window.listener_count(), 1);

    // Same identity: nothing re-runs, nothing re-registers.
    mount(&el, &first);
    assert_eq!(window.listener_count(), 1);

    let second = Panel::new(1200, 800);
    mount(&el, &second);
    assert_eq!(
        observer.read(),
        SizeReading {
            width: 1200,
            height: 800,
            is_mobile: false,
            is_wide: true,
        }
    );
    // The previous registration was released before the new one was added.
    assert_eq!(window.listener_count(), 1);
}

#[test]
fn clearing_the_reference_stops_observation() {
    let window = MockWindow::new();
    let el = ElementRef::new();
    let observer = observe(&window, el);

    let panel = Panel::new(300, 200);
    mount(&el, &panel);
    assert_eq!(window.listener_count(), 1);

    el.clear();
    assert_eq!(window.listener_count(), 0);

    panel.resize(500, 500);
    window.emit_resize();
    window.advance(Duration::from_millis(100));
    assert_eq!(observer.width(), 300);
}

#[test]
fn element_ref_notifies_only_on_identity_change() {
    let runs = Rc::new(Cell::new(0));
    let el = ElementRef::new();

    let counted = runs.clone();
    create_effect(move |_| {
        el.get();
        counted.set(counted.get() + 1);
    });
    assert_eq!(runs.get(), 1);

    let panel = Panel::new(10, 10);
    mount(&el, &panel);
    assert_eq!(runs.get(), 2);

    mount(&el, &panel);
    assert_eq!(runs.get(), 2);

    let other = Panel::new(20, 20);
    mount(&el, &other);
    assert_eq!(runs.get(), 3);

    el.clear();
    assert_eq!(runs.get(), 4);

    el.clear();
    assert_eq!(runs.get(), 4);
}

// ============================================================================
// Debounced resize
// ============================================================================

#[test]
fn resize_bursts_collapse_to_the_last_measurement() {
    let window = MockWindow::new();
    let el = ElementRef::new();
    let observer = observe(&window, el);

    let panel = Panel::new(300, 200);
    mount(&el, &panel);

    let publishes = Rc::new(Cell::new(0));
    let counted = publishes.clone();
    let observed = observer.clone();
    create_effect(move |_| {
        observed.width();
        counted.set(counted.get() + 1);
    });
    assert_eq!(publishes.get(), 1);

    for width in [400, 900, 1200] {
        panel.resize(width, 200);
        window.emit_resize();
        window.advance(Duration::from_millis(10));
    }

    // The quiet period has not elapsed since the last notification.
    assert_eq!(observer.width(), 300);

    window.advance(Duration::from_millis(50));
    assert_eq!(observer.width(), 1200);
    assert_eq!(window.pending_timer_count(), 0);

    // Only the initial run and the final measurement were ever seen: no
    // intermediate width was published.
    assert_eq!(publishes.get(), 2);
}

#[test]
fn unchanged_measurement_is_not_republished() {
    let window = MockWindow::new();
    let el = ElementRef::new();
    let observer = observe(&window, el);

    let panel = Panel::new(300, 200);
    mount(&el, &panel);

    let publishes = Rc::new(Cell::new(0));
    let counted = publishes.clone();
    let observed = observer.clone();
    create_effect(move |_| {
        observed.size();
        counted.set(counted.get() + 1);
    });
    assert_eq!(publishes.get(), 1);

    // A resize notification that leaves the element at the same size.
    window.emit_resize();
    window.advance(Duration::from_millis(50));

    assert_eq!(publishes.get(), 1);
}

#[test]
fn custom_quiet_period_defers_measurement() {
    let window = MockWindow::new();
    let el = ElementRef::new();
    let observer = SizeObserver::with_debounce(
        Rc::new(window.clone()),
        el,
        Breakpoints::default(),
        Duration::from_millis(200),
    );

    let panel = Panel::new(300, 200);
    mount(&el, &panel);

    panel.resize(1100, 200);
    window.emit_resize();
    window.advance(Duration::from_millis(199));
    assert_eq!(observer.width(), 300);

    window.advance(Duration::from_millis(1));
    assert_eq!(observer.width(), 1100);
    assert_eq!(observer.flags(), SizeFlags::WIDE);
}

#[test]
fn dead_element_is_treated_as_unresolved() {
    let window = MockWindow::new();
    let el = ElementRef::new();
    let observer = create_size_observer(Rc::new(window.clone()), el, Breakpoints::default());

    let panel = Panel::new(300, 200);
    mount(&el, &panel);
    assert_eq!(observer.width(), 300);

    // The element dies between the notification and the measurement.
    window.emit_resize();
    drop(panel);
    window.advance(Duration::from_millis(50));

    assert_eq!(observer.width(), 300);
}

// ============================================================================
// Thresholds
// ============================================================================

#[test]
fn overridden_thresholds_keep_unspecified_defaults() {
    let window = MockWindow::new();
    let el = ElementRef::new();
    let observer = SizeObserver::new(
        Rc::new(window.clone()),
        el,
        Breakpoints::default().with_mobile(500),
    );

    let panel = Panel::new(600, 400);
    mount(&el, &panel);

    // 600 is not mobile under the override, and the wide threshold keeps
    // its default of 1000.
    assert!(!observer.is_mobile());
    assert!(!observer.is_wide());
    assert_eq!(observer.breakpoints().mobile(), 500);
    assert_eq!(observer.breakpoints().wide(), 1000);
    assert_eq!(observer.height(), 400);
}

// ============================================================================
// Teardown
// ============================================================================

#[test]
fn dispose_releases_listener_and_pending_timer_exactly_once() {
    let window = MockWindow::new();
    let el = ElementRef::new();
    let observer = observe(&window, el);

    let panel = Panel::new(300, 200);
    mount(&el, &panel);
    assert_eq!(window.listener_count(), 1);

    // Leave a measurement pending, then tear down.
    panel.resize(800, 600);
    window.emit_resize();
    observer.dispose();

    assert_eq!(window.listener_count(), 0);
    window.advance(Duration::from_millis(100));
    assert_eq!(observer.width(), 300);

    observer.dispose();
    assert_eq!(window.listener_count(), 0);
}

#[test]
fn disposed_observer_ignores_later_reference_changes() {
    let window = MockWindow::new();
    let el = ElementRef::new();
    let observer = observe(&window, el);

    let panel = Panel::new(300, 200);
    mount(&el, &panel);
    observer.dispose();
    assert_eq!(window.listener_count(), 0);

    let other = Panel::new(900, 700);
    mount(&el, &other);
    assert_eq!(window.listener_count(), 0);
    assert_eq!(observer.width(), 300);
}
