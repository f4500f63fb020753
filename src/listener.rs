use std::rc::Rc;

use parse_display::Display;

use crate::{Observable, ObservableValue};

/// Receives notice that an observable's value may have become stale.
///
/// The value itself is not delivered, so a dependent can defer recomputation until it is read.
pub trait InvalidationListener {
    fn invalidated(&self, observable: &dyn Observable);
}
impl<F: Fn(&dyn Observable)> InvalidationListener for F {
    fn invalidated(&self, observable: &dyn Observable) {
        self(observable)
    }
}

/// Receives the previous and the new value after an observable value has changed.
pub trait ChangeListener<T> {
    fn changed(&self, observable: &dyn ObservableValue<T>, old: &T, new: &T);
}
impl<T, F: Fn(&dyn ObservableValue<T>, &T, &T)> ChangeListener<T> for F {
    fn changed(&self, observable: &dyn ObservableValue<T>, old: &T, new: &T) {
        self(observable, old, new)
    }
}

/// Create an invalidation listener handle from a closure.
pub fn invalidation_listener(
    f: impl Fn(&dyn Observable) + 'static,
) -> Rc<dyn InvalidationListener> {
    Rc::new(f)
}

/// Create a change listener handle from a closure.
pub fn change_listener<T: 'static>(
    f: impl Fn(&dyn ObservableValue<T>, &T, &T) + 'static,
) -> Rc<dyn ChangeListener<T>> {
    Rc::new(f)
}

#[derive(Display, Debug, Clone, Copy, Eq, PartialEq)]
#[display(style = "snake_case")]
pub(crate) enum ListenerKind {
    Invalidation,
    Change,
}
