use std::{
    any::Any,
    cell::{Ref, RefCell},
    collections::HashMap,
    fmt,
    marker::PhantomData,
    rc::Rc,
};

use crate::{
    effect::{run_effect, EffectTrait},
    id::Id,
    runtime::RUNTIME,
};

/// A signal that can be both read and written.
///
/// The handle is `Copy`: it is an id into the runtime's signal arena, typed
/// by `PhantomData`. Reading it inside an effect subscribes the effect.
pub struct RwSignal<T> {
    pub(crate) id: Id,
    ty: PhantomData<T>,
}

impl<T> Copy for RwSignal<T> {}

impl<T> Clone for RwSignal<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for RwSignal<T> {}

impl<T> PartialEq for RwSignal<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> fmt::Debug for RwSignal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("RwSignal");
        s.field("id", &self.id);
        s.finish()
    }
}

impl<T> RwSignal<T> {
    /// A read-only handle to the same signal.
    pub fn read_only(&self) -> ReadSignal<T> {
        ReadSignal {
            id: self.id,
            ty: PhantomData,
        }
    }

    /// A write-only handle to the same signal.
    pub fn write_only(&self) -> WriteSignal<T> {
        WriteSignal {
            id: self.id,
            ty: PhantomData,
        }
    }
}

impl<T: 'static> RwSignal<T> {
    pub fn new(value: T) -> Self {
        create_rw_signal(value)
    }

    /// Clone the current value. Inside an effect this subscribes the effect
    /// to future changes.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.signal().get()
    }

    /// Clone the current value without subscribing.
    pub fn get_untracked(&self) -> T
    where
        T: Clone,
    {
        self.signal().get_untracked()
    }

    /// Apply `f` to the current value. Inside an effect this subscribes the
    /// effect to future changes.
    pub fn with<O>(&self, f: impl FnOnce(&T) -> O) -> O {
        self.signal().with(f)
    }

    /// Apply `f` to the current value without subscribing.
    pub fn with_untracked<O>(&self, f: impl FnOnce(&T) -> O) -> O {
        self.signal().with_untracked(f)
    }

    /// Replace the value and run the subscribed effects.
    pub fn set(&self, value: T) {
        self.signal().update_value(|v| *v = value);
    }

    /// Update the value in place and run the subscribed effects.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.signal().update_value(f);
    }

    fn signal(&self) -> Signal {
        self.id
            .signal()
            .expect("accessing a signal after its scope was disposed")
    }
}

/// The reading half of a signal.
pub struct ReadSignal<T> {
    pub(crate) id: Id,
    ty: PhantomData<T>,
}

impl<T> Copy for ReadSignal<T> {}

impl<T> Clone for ReadSignal<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ReadSignal<T> {}

impl<T> PartialEq for ReadSignal<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T: 'static> ReadSignal<T> {
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.signal().get()
    }

    pub fn get_untracked(&self) -> T
    where
        T: Clone,
    {
        self.signal().get_untracked()
    }

    pub fn with<O>(&self, f: impl FnOnce(&T) -> O) -> O {
        self.signal().with(f)
    }

    pub fn with_untracked<O>(&self, f: impl FnOnce(&T) -> O) -> O {
        self.signal().with_untracked(f)
    }

    fn signal(&self) -> Signal {
        self.id
            .signal()
            .expect("accessing a signal after its scope was disposed")
    }
}

/// The writing half of a signal.
pub struct WriteSignal<T> {
    pub(crate) id: Id,
    ty: PhantomData<T>,
}

impl<T> Copy for WriteSignal<T> {}

impl<T> Clone for WriteSignal<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for WriteSignal<T> {}

impl<T> PartialEq for WriteSignal<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T: 'static> WriteSignal<T> {
    pub fn set(&self, value: T) {
        self.signal().update_value(|v| *v = value);
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.signal().update_value(f);
    }

    fn signal(&self) -> Signal {
        self.id
            .signal()
            .expect("accessing a signal after its scope was disposed")
    }
}

/// Create a new [`RwSignal`] under the current scope.
pub fn create_rw_signal<T>(value: T) -> RwSignal<T>
where
    T: Any + 'static,
{
    let id = Signal::create(value);
    id.set_scope();
    RwSignal {
        id,
        ty: PhantomData,
    }
}

/// Create a new signal under the current scope, split into its reading and
/// writing halves.
pub fn create_signal<T>(value: T) -> (ReadSignal<T>, WriteSignal<T>)
where
    T: Any + 'static,
{
    let s = create_rw_signal(value);
    (s.read_only(), s.write_only())
}

/// The arena entry behind the typed handles: the boxed value plus the
/// effects currently subscribed to it.
#[derive(Clone)]
pub(crate) struct Signal {
    pub(crate) id: Id,
    value: Rc<dyn Any>,
    pub(crate) subscribers: Rc<RefCell<HashMap<Id, Rc<dyn EffectTrait>>>>,
}

impl Signal {
    pub(crate) fn create<T>(value: T) -> Id
    where
        T: Any + 'static,
    {
        let id = Id::next();
        let value = RefCell::new(value);
        let signal = Signal {
            id,
            subscribers: Rc::new(RefCell::new(HashMap::new())),
            value: Rc::new(value),
        };
        id.add_signal(signal);
        id
    }

    fn borrow<T: 'static>(&self) -> Ref<'_, T> {
        let value = self
            .value
            .downcast_ref::<RefCell<T>>()
            .expect("to downcast signal type");
        value.borrow()
    }

    fn get_untracked<T: Clone + 'static>(&self) -> T {
        let value = self.borrow::<T>();
        value.clone()
    }

    fn get<T: Clone + 'static>(&self) -> T {
        self.subscribe();
        self.get_untracked()
    }

    fn with_untracked<O, T: 'static>(&self, f: impl FnOnce(&T) -> O) -> O {
        let value = self.borrow::<T>();
        f(&value)
    }

    fn with<O, T: 'static>(&self, f: impl FnOnce(&T) -> O) -> O {
        self.subscribe();
        self.with_untracked(f)
    }

    fn update_value<U, T: 'static>(&self, f: impl FnOnce(&mut T) -> U) -> U {
        let result = {
            let value = self
                .value
                .downcast_ref::<RefCell<T>>()
                .expect("to downcast signal type");
            f(&mut value.borrow_mut())
        };
        self.run_effects();
        result
    }

    pub(crate) fn subscribers(&self) -> HashMap<Id, Rc<dyn EffectTrait>> {
        self.subscribers.borrow().clone()
    }

    fn run_effects(&self) {
        for (_, subscriber) in self.subscribers() {
            run_effect(subscriber);
        }
    }

    fn subscribe(&self) {
        RUNTIME.with(|runtime| {
            if let Some(effect) = runtime.current_effect.borrow().as_ref() {
                self.subscribers
                    .borrow_mut()
                    .insert(effect.id(), effect.clone());
                effect.add_observer(self.clone());
            }
        });
    }
}
