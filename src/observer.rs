use std::{rc::Rc, time::Duration};

use crate::{
    breakpoints::{Breakpoints, SizeFlags},
    debounce::Debounce,
    element::{ElementRef, Size},
    scope::{on_cleanup, Scope},
    signal::{create_rw_signal, RwSignal},
    window::{ResizeCallback, WindowHandle},
};

/// Quiet period between the last resize notification and re-measurement.
pub const DEFAULT_RESIZE_DEBOUNCE: Duration = Duration::from_millis(50);

/// One observation of the size state, with the derived flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeReading {
    pub width: u32,
    pub height: u32,
    pub is_mobile: bool,
    pub is_wide: bool,
}

/// Tracks the rendered size of the element behind an [`ElementRef`].
///
/// While the reference is unresolved the size stays at zero. Once it
/// resolves, the element is measured immediately and then re-measured after
/// each burst of window resize notifications settles. An element measuring
/// zero in both dimensions is treated as not ready to observe: its size is
/// published once and no resize listener is registered until the reference
/// changes identity.
///
/// All reads subscribe the running effect, so consumers re-run exactly when
/// the measurement changes. The derived flags are pure projections of the
/// current width and the configured [`Breakpoints`], never stored.
pub struct SizeObserver {
    size: RwSignal<Size>,
    breakpoints: Rc<Breakpoints>,
    scope: Scope,
}

impl Clone for SizeObserver {
    fn clone(&self) -> Self {
        Self {
            size: self.size,
            breakpoints: self.breakpoints.clone(),
            scope: self.scope,
        }
    }
}

impl SizeObserver {
    /// Start observing `el` with the default quiet period.
    pub fn new(window: Rc<dyn WindowHandle>, el: ElementRef, breakpoints: Breakpoints) -> Self {
        Self::with_debounce(window, el, breakpoints, DEFAULT_RESIZE_DEBOUNCE)
    }

    /// Start observing `el`, re-measuring after `quiet` of resize silence.
    ///
    /// The size signal belongs to the current scope; the observation itself
    /// runs under a child scope so that [`dispose`](SizeObserver::dispose)
    /// stops it without invalidating reads of the last measurement.
    pub fn with_debounce(
        window: Rc<dyn WindowHandle>,
        el: ElementRef,
        breakpoints: Breakpoints,
        quiet: Duration,
    ) -> Self {
        let size = create_rw_signal(Size::ZERO);
        let debounce = Debounce::new(window.clone(), quiet);
        let scope = Scope::current().create_child();

        scope.create_effect(move |_| {
            let Some(element) = el.get() else {
                return;
            };

            let measured = element.client_size();
            publish(size, measured);

            // An element with no measurable box is not ready to observe:
            // skip the listener until the reference changes identity.
            if measured.is_zero() {
                return;
            }

            let callback: Rc<ResizeCallback> = {
                let debounce = debounce.clone();
                Rc::new(move || {
                    debounce.schedule(move || {
                        if let Some(element) = el.get_untracked() {
                            publish(size, element.client_size());
                        }
                    });
                })
            };

            let subscription = window.add_resize_listener(callback);
            let debounce = debounce.clone();
            on_cleanup(move || {
                subscription.dispose();
                debounce.cancel();
            });
        });

        Self {
            size,
            breakpoints: Rc::new(breakpoints),
            scope,
        }
    }

    /// Current width, in pixels.
    pub fn width(&self) -> u32 {
        self.size.get().width
    }

    /// Current height, in pixels.
    pub fn height(&self) -> u32 {
        self.size.get().height
    }

    /// Current measurement.
    pub fn size(&self) -> Size {
        self.size.get()
    }

    /// Whether the current width is below the mobile threshold.
    pub fn is_mobile(&self) -> bool {
        self.breakpoints.is_mobile(self.size.get().width)
    }

    /// Whether the current width is above the wide threshold.
    pub fn is_wide(&self) -> bool {
        self.breakpoints.is_wide(self.size.get().width)
    }

    /// The flag set for the current width.
    pub fn flags(&self) -> SizeFlags {
        self.breakpoints.flags(self.size.get().width)
    }

    /// Snapshot of the size state and derived flags.
    pub fn read(&self) -> SizeReading {
        let size = self.size.get();
        let flags = self.breakpoints.flags(size.width);
        SizeReading {
            width: size.width,
            height: size.height,
            is_mobile: flags.contains(SizeFlags::MOBILE),
            is_wide: flags.contains(SizeFlags::WIDE),
        }
    }

    /// The merged thresholds this observer classifies against.
    pub fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    /// Stop observing: the resize listener is unregistered and any pending
    /// measurement is invalidated, exactly once. The last published size
    /// stays readable. Disposing again is a no-op.
    pub fn dispose(&self) {
        self.scope.dispose();
    }
}

/// Start observing `el` under the current scope.
pub fn create_size_observer(
    window: Rc<dyn WindowHandle>,
    el: ElementRef,
    breakpoints: Breakpoints,
) -> SizeObserver {
    SizeObserver::new(window, el, breakpoints)
}

fn publish(size: RwSignal<Size>, measured: Size) {
    let changed = size.with_untracked(|current| *current != measured);
    if changed {
        size.set(measured);
    }
}
