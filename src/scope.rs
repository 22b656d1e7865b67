use std::{any::Any, fmt};

use crate::{
    effect::create_effect,
    id::Id,
    runtime::RUNTIME,
    signal::{create_rw_signal, create_signal, ReadSignal, RwSignal, WriteSignal},
};

/// Ownership handle for reactive state. Signals and effects belong to the
/// scope that was current when they were created; disposing a scope tears
/// down everything under it, child scopes included.
#[derive(Clone, Copy)]
pub struct Scope(pub(crate) Id);

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Scope");
        s.field("id", &self.0);
        s.finish()
    }
}

impl Scope {
    /// Create a scope that is not attached to any parent.
    pub fn new() -> Self {
        Self(Id::next())
    }

    /// The scope that signals and effects are currently created under.
    pub fn current() -> Scope {
        RUNTIME.with(|runtime| Scope(*runtime.current_scope.borrow()))
    }

    /// Create a child scope, disposed together with this one.
    pub fn create_child(&self) -> Scope {
        let child = Id::next();
        RUNTIME.with(|runtime| {
            let mut children = runtime.children.borrow_mut();
            let children = children.entry(self.0).or_default();
            children.insert(child);
        });
        Scope(child)
    }

    /// Create a signal owned by this scope.
    pub fn create_signal<T>(self, value: T) -> (ReadSignal<T>, WriteSignal<T>)
    where
        T: Any + 'static,
    {
        with_scope(self, || create_signal(value))
    }

    /// Create a [`RwSignal`] owned by this scope.
    pub fn create_rw_signal<T>(self, value: T) -> RwSignal<T>
    where
        T: Any + 'static,
    {
        with_scope(self, || create_rw_signal(value))
    }

    /// Create an effect owned by this scope.
    pub fn create_effect<T>(self, f: impl Fn(Option<T>) -> T + 'static)
    where
        T: 'static,
    {
        with_scope(self, || create_effect(f))
    }

    /// Register a callback that runs when this scope is disposed.
    pub fn on_cleanup(&self, f: impl FnOnce() + 'static) {
        RUNTIME.with(|runtime| {
            runtime
                .cleanups
                .borrow_mut()
                .entry(self.0)
                .or_default()
                .push(Box::new(f));
        });
    }

    /// Dispose this scope and everything it owns. Idempotent.
    pub fn dispose(&self) {
        self.0.dispose();
    }
}

/// Run `f` with `scope` as the current scope.
pub fn with_scope<T>(scope: Scope, f: impl FnOnce() -> T) -> T
where
    T: 'static,
{
    let prev_scope = RUNTIME.with(|runtime| {
        let mut current_scope = runtime.current_scope.borrow_mut();
        let prev_scope = *current_scope;
        *current_scope = scope.0;
        prev_scope
    });

    let result = f();

    RUNTIME.with(|runtime| {
        *runtime.current_scope.borrow_mut() = prev_scope;
    });

    result
}

/// Register a callback that runs when the current Scope is disposed. Inside
/// an effect the current Scope is the effect's own, so the callback also
/// runs right before the effect re-runs.
pub fn on_cleanup(f: impl FnOnce() + 'static) {
    Scope::current().on_cleanup(f);
}
