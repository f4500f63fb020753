use std::{cell::RefCell, rc::Rc};

use derive_ex::derive_ex;

use crate::{
    dispatch::{notify_each, ListenerKey, ListenerList},
    listener::ListenerKind,
    ChangeListener, InvalidationListener, ObservableValue,
};


/// Listener registry and notification for one observable value.
///
/// A value holder embeds this, stores each accepted mutation in its own backing value,
/// and then calls [`fire_value_changed`](Self::fire_value_changed).
///
/// All invalidation listeners are notified first, in registration order, and then all
/// change listeners, in registration order. Dependents that only mark themselves stale
/// are therefore already stale when change listeners run and read other values.
///
/// Mutation is single-threaded. The type is neither `Send` nor `Sync`.
#[derive_ex(Default, bound())]
#[default(Self::new())]
pub struct ObservableValueBase<T: 'static> {
    invalidation: RefCell<ListenerList<dyn InvalidationListener>>,
    change: RefCell<ListenerList<dyn ChangeListener<T>>>,
}

impl<T: 'static> ObservableValueBase<T> {
    pub fn new() -> Self {
        Self {
            invalidation: RefCell::new(ListenerList::new()),
            change: RefCell::new(ListenerList::new()),
        }
    }

    pub fn add_listener(&self, listener: Rc<dyn InvalidationListener>) -> ListenerKey {
        self.invalidation.borrow_mut().insert(listener)
    }
    pub fn remove_listener(&self, listener: &Rc<dyn InvalidationListener>) {
        if self.invalidation.borrow_mut().remove_first(listener).is_none() {
            tracing::debug!(kind = %ListenerKind::Invalidation, "listener not registered");
        }
    }
    /// Removes exactly the registration identified by `key`.
    pub fn remove_listener_key(&self, key: ListenerKey) {
        self.invalidation.borrow_mut().remove_key(key);
    }

    pub fn add_change_listener(&self, listener: Rc<dyn ChangeListener<T>>) -> ListenerKey {
        self.change.borrow_mut().insert(listener)
    }
    pub fn remove_change_listener(&self, listener: &Rc<dyn ChangeListener<T>>) {
        if self.change.borrow_mut().remove_first(listener).is_none() {
            tracing::debug!(kind = %ListenerKind::Change, "listener not registered");
        }
    }
    /// Removes exactly the registration identified by `key`.
    pub fn remove_change_listener_key(&self, key: ListenerKey) {
        self.change.borrow_mut().remove_key(key);
    }

    pub fn invalidation_listener_count(&self) -> usize {
        self.invalidation.borrow().len()
    }
    pub fn change_listener_count(&self) -> usize {
        self.change.borrow().len()
    }
    pub fn has_change_listeners(&self) -> bool {
        !self.change.borrow().is_empty()
    }

    /// Notifies invalidation listeners only.
    pub fn fire_invalidated<O: ObservableValue<T>>(&self, observable: &O) {
        notify_each(&self.invalidation, ListenerKind::Invalidation, |l| {
            l.invalidated(observable)
        });
    }

    /// Notifies change listeners only, delivering the same `old` and `new` to each of them.
    pub fn fire_changed<O: ObservableValue<T>>(&self, observable: &O, old: &T, new: &T) {
        notify_each(&self.change, ListenerKind::Change, |l| {
            l.changed(observable, old, new)
        });
    }

    /// Notifies invalidation listeners, then change listeners, of one accepted mutation.
    ///
    /// The holder must already report `new` from `get_value`.
    pub fn fire_value_changed<O: ObservableValue<T>>(&self, observable: &O, old: &T, new: &T) {
        self.fire_invalidated(observable);
        self.fire_changed(observable, old, new);
    }
}
