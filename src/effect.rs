use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{
    id::Id,
    runtime::RUNTIME,
    scope::{with_scope, Scope},
    signal::Signal,
};

pub(crate) trait EffectTrait {
    fn id(&self) -> Id;
    fn run(&self);
    fn add_observer(&self, signal: Signal);
    fn current_observers(&self) -> HashMap<Id, Signal>;
    fn clear_observers(&self);
}

struct Effect<T, F>
where
    T: 'static,
    F: Fn(Option<T>) -> T,
{
    id: Id,
    f: F,
    value: Rc<RefCell<Option<T>>>,
    observers: Rc<RefCell<HashMap<Id, Signal>>>,
}

impl<T, F> Drop for Effect<T, F>
where
    T: 'static,
    F: Fn(Option<T>) -> T,
{
    fn drop(&mut self) {
        self.id.dispose();
    }
}

/// Run `f` once immediately and again whenever a signal it read during its
/// previous run changes.
///
/// Dependencies are re-tracked from scratch on every run, so only the
/// signals actually read last time can trigger the next run. `f` receives
/// its previous return value, `None` on the first run. Each run starts by
/// disposing the effect's own scope, which runs any [`on_cleanup`] callbacks
/// registered during the previous run.
///
/// [`on_cleanup`]: crate::scope::on_cleanup
pub fn create_effect<T>(f: impl Fn(Option<T>) -> T + 'static)
where
    T: 'static,
{
    let id = Id::next();
    let effect = Rc::new(Effect {
        id,
        f,
        value: Rc::new(RefCell::new(None)),
        observers: Rc::new(RefCell::new(HashMap::new())),
    });
    id.set_scope();

    run_effect(effect);
}

pub(crate) fn run_effect(effect: Rc<dyn EffectTrait>) {
    effect.id().dispose();

    observer_clean_up(&effect);

    RUNTIME.with(|runtime| {
        runtime
            .effects
            .borrow_mut()
            .insert(effect.id(), effect.clone());
        *runtime.current_effect.borrow_mut() = Some(effect.clone());
    });

    with_scope(Scope(effect.id()), move || {
        effect.run();
    });

    RUNTIME.with(|runtime| {
        *runtime.current_effect.borrow_mut() = None;
    });
}

/// Unlink an effect from every signal it subscribed to, and clear its
/// observer list so the next run re-tracks from scratch.
pub(crate) fn observer_clean_up(effect: &Rc<dyn EffectTrait>) {
    for (_, observer) in effect.current_observers() {
        observer.subscribers.borrow_mut().remove(&effect.id());
    }
    effect.clear_observers();
}

impl<T, F> EffectTrait for Effect<T, F>
where
    T: 'static,
    F: Fn(Option<T>) -> T,
{
    fn id(&self) -> Id {
        self.id
    }

    fn run(&self) {
        let curr_value = self.value.borrow_mut().take();

        let new_value = (self.f)(curr_value);

        *self.value.borrow_mut() = Some(new_value);
    }

    fn add_observer(&self, signal: Signal) {
        self.observers.borrow_mut().insert(signal.id, signal);
    }

    fn current_observers(&self) -> HashMap<Id, Signal> {
        self.observers.borrow().clone()
    }

    fn clear_observers(&self) {
        self.observers.borrow_mut().clear();
    }
}
