use std::{cell::RefCell, fmt::Display, rc::Rc};

use assert_call::call;

use crate::{
    change_listener, invalidation_listener, ChangeListener, InvalidationListener,
    ObservableValue, Subscription,
};

pub fn call_invalidated(name: &'static str) -> Rc<dyn InvalidationListener> {
    invalidation_listener(move |_| call!("{}", name))
}

pub fn call_changed<T: Display + 'static>(name: &'static str) -> Rc<dyn ChangeListener<T>> {
    change_listener(move |_, old: &T, new: &T| call!("{} {}->{}", name, old, new))
}

pub struct Recorder<T> {
    rc: Rc<RefCell<Vec<(T, T)>>>,
    s: Subscription,
}

pub fn record<T: Clone + 'static>(o: &(impl ObservableValue<T> + ?Sized)) -> Recorder<T> {
    let rc = Rc::new(RefCell::new(Vec::new()));
    let r = rc.clone();
    let s = o.subscribe_change(change_listener(move |_, old: &T, new: &T| {
        r.borrow_mut().push((old.clone(), new.clone()));
    }));
    Recorder { rc, s }
}
impl<T> Recorder<T> {
    pub fn finish(self) -> Vec<(T, T)> {
        let Recorder { rc, mut s } = self;
        s.unsubscribe();
        let changes = rc.borrow_mut().drain(..).collect();
        changes
    }
}
