use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
    rc::Rc,
};

use smallvec::SmallVec;

use crate::{effect::EffectTrait, id::Id, signal::Signal};

pub(crate) type CleanupList = SmallVec<[Box<dyn FnOnce()>; 2]>;

thread_local! {
    pub(crate) static RUNTIME: Runtime = Runtime::new();
}

/// The reactive runtime. All state lives in a thread local, so signals must
/// be accessed from the thread that created them.
pub(crate) struct Runtime {
    pub(crate) current_effect: RefCell<Option<Rc<dyn EffectTrait>>>,
    pub(crate) current_scope: RefCell<Id>,
    pub(crate) children: RefCell<HashMap<Id, HashSet<Id>>>,
    pub(crate) signals: RefCell<HashMap<Id, Signal>>,
    pub(crate) effects: RefCell<HashMap<Id, Rc<dyn EffectTrait>>>,
    pub(crate) cleanups: RefCell<HashMap<Id, CleanupList>>,
}

impl Runtime {
    fn new() -> Self {
        Self {
            current_effect: RefCell::new(None),
            current_scope: RefCell::new(Id::next()),
            children: RefCell::new(HashMap::new()),
            signals: Default::default(),
            effects: Default::default(),
            cleanups: Default::default(),
        }
    }
}
