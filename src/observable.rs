use std::rc::Rc;

use crate::{ChangeListener, InvalidationListener, Subscription};

/// An entity whose value can become stale, and which tells registered listeners when it does.
///
/// Registrations are keyed by listener identity (the `Rc` allocation), not by equality.
/// Registering the same listener twice yields two independent notifications.
pub trait Observable {
    fn add_listener(&self, listener: Rc<dyn InvalidationListener>);

    /// Removes one registration of `listener`. Does nothing if it is not registered.
    fn remove_listener(&self, listener: &Rc<dyn InvalidationListener>);

    /// Registers `listener` and returns a subscription that removes it again.
    ///
    /// Value holders remove exactly the registration created here, without keeping the holder
    /// alive. Holders without registration keys can use [`subscribe_by_identity`].
    fn subscribe(&self, listener: Rc<dyn InvalidationListener>) -> Subscription;
}

/// An [`Observable`] that exposes its current value and reports changes with old and new values.
pub trait ObservableValue<T>: Observable {
    fn get_value(&self) -> T;

    fn add_change_listener(&self, listener: Rc<dyn ChangeListener<T>>);

    /// Removes one registration of `listener`. Does nothing if it is not registered.
    fn remove_change_listener(&self, listener: &Rc<dyn ChangeListener<T>>);

    /// Registers `listener` and returns a subscription that removes it again.
    ///
    /// See [`subscribe_change_by_identity`] for holders without registration keys.
    fn subscribe_change(&self, listener: Rc<dyn ChangeListener<T>>) -> Subscription;
}

/// An [`ObservableValue`] that can be written from outside.
pub trait WritableValue<T>: ObservableValue<T> {
    /// Replaces the current value.
    ///
    /// Listeners are notified before this returns, after the new value has been stored.
    fn set_value(&self, value: T);
}

/// Registers `listener` on `observable` and returns a subscription that removes it with
/// [`Observable::remove_listener`].
///
/// The subscription keeps a clone of `observable` until it is released.
pub fn subscribe_by_identity<O: Observable + Clone + 'static>(
    observable: &O,
    listener: Rc<dyn InvalidationListener>,
) -> Subscription {
    observable.add_listener(listener.clone());
    let observable = observable.clone();
    Subscription::from_fn(move || observable.remove_listener(&listener))
}

/// Registers `listener` on `observable` and returns a subscription that removes it with
/// [`ObservableValue::remove_change_listener`].
pub fn subscribe_change_by_identity<T: 'static, O: ObservableValue<T> + Clone + 'static>(
    observable: &O,
    listener: Rc<dyn ChangeListener<T>>,
) -> Subscription {
    observable.add_change_listener(listener.clone());
    let observable = observable.clone();
    Subscription::from_fn(move || observable.remove_change_listener(&listener))
}
