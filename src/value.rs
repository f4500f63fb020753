use std::{cell::RefCell, fmt, mem::replace, rc::Rc};

use derive_ex::derive_ex;
use serde::{Deserialize, Serialize};

use crate::{
    ChangeListener, InvalidationListener, Number, Observable, ObservableNumberValue,
    ObservableValue, ObservableValueBase, Subscription, WritableValue,
};


pub type BooleanValue = Value<bool>;
pub type IntegerValue = Value<i32>;
pub type LongValue = Value<i64>;
pub type FloatValue = Value<f32>;
pub type DoubleValue = Value<f64>;
pub type StringValue = Value<String>;
pub type ObjectValue<T> = Value<T>;

pub type ReadOnlyBooleanValue = ReadOnlyValue<bool>;
pub type ReadOnlyIntegerValue = ReadOnlyValue<i32>;
pub type ReadOnlyLongValue = ReadOnlyValue<i64>;
pub type ReadOnlyFloatValue = ReadOnlyValue<f32>;
pub type ReadOnlyDoubleValue = ReadOnlyValue<f64>;
pub type ReadOnlyStringValue = ReadOnlyValue<String>;
pub type ReadOnlyObjectValue<T> = ReadOnlyValue<T>;

/// Similar to `Rc<RefCell<T>>`, but notifies listeners when the value is written.
///
/// Clones share the same value and the same listeners.
///
/// Writes through [`set`](Self::set) and [`WritableValue::set_value`] that store a value equal
/// to the current one are ignored and notify nobody.
/// Use [`set_always`](Self::set_always) to notify regardless.
#[derive_ex(Clone, bound())]
pub struct Value<T: 'static>(Rc<ValueNode<T>>);

struct ValueNode<T: 'static> {
    base: ObservableValueBase<T>,
    value: RefCell<T>,
}

impl<T: 'static> Value<T> {
    /// Create a new `Value` with the given initial value.
    pub fn new(value: T) -> Self {
        Self(Rc::new(ValueNode {
            base: ObservableValueBase::new(),
            value: RefCell::new(value),
        }))
    }

    /// Gets the current value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.value.borrow().clone()
    }

    /// Calls `f` with a reference to the current value.
    ///
    /// Panics if `f` writes to this value.
    pub fn with<U>(&self, f: impl FnOnce(&T) -> U) -> U {
        f(&*self.0.value.borrow())
    }

    /// Sets the value and notifies listeners if it differs from the current value.
    pub fn set(&self, value: T)
    where
        T: Clone + PartialEq,
    {
        let changed = *self.0.value.borrow() != value;
        if changed {
            self.set_always(value);
        }
    }

    /// Sets the value and notifies listeners, even if it is equal to the current value.
    pub fn set_always(&self, value: T)
    where
        T: Clone,
    {
        let new = value.clone();
        let old = replace(&mut *self.0.value.borrow_mut(), value);
        self.0.base.fire_value_changed(self, &old, &new);
    }

    /// Modifies the value in place and notifies listeners.
    ///
    /// Panics if `f` reads or writes this value.
    pub fn modify(&self, f: impl FnOnce(&mut T))
    where
        T: Clone,
    {
        let (old, new) = {
            let mut value = self.0.value.borrow_mut();
            let old = value.clone();
            f(&mut *value);
            (old, value.clone())
        };
        self.0.base.fire_value_changed(self, &old, &new);
    }

    /// Returns an observable-only view sharing this value and its listeners.
    pub fn read_only(&self) -> ReadOnlyValue<T> {
        ReadOnlyValue(self.clone())
    }

    /// Returns `true` if both handles refer to the same value.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Rc::ptr_eq(&this.0, &other.0)
    }

    pub fn invalidation_listener_count(&self) -> usize {
        self.0.base.invalidation_listener_count()
    }
    pub fn change_listener_count(&self) -> usize {
        self.0.base.change_listener_count()
    }
}
impl<T: Default + 'static> Default for Value<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
impl<T: fmt::Debug> fmt::Debug for Value<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.value.try_borrow() {
            Ok(value) => fmt::Debug::fmt(&*value, f),
            Err(_) => write!(f, "<borrowed>"),
        }
    }
}
impl<T> Serialize for Value<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        match self.0.value.try_borrow() {
            Ok(value) => T::serialize(&*value, serializer),
            Err(_) => Err(serde::ser::Error::custom("borrowed")),
        }
    }
}
impl<'de, T> Deserialize<'de> for Value<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Value<T>, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Value::new)
    }
}

impl<T: 'static> Observable for Value<T> {
    fn add_listener(&self, listener: Rc<dyn InvalidationListener>) {
        self.0.base.add_listener(listener);
    }
    fn remove_listener(&self, listener: &Rc<dyn InvalidationListener>) {
        self.0.base.remove_listener(listener);
    }
    fn subscribe(&self, listener: Rc<dyn InvalidationListener>) -> Subscription {
        let key = self.0.base.add_listener(listener);
        Subscription::from_weak_fn(Rc::downgrade(&self.0), move |node| {
            node.base.remove_listener_key(key)
        })
    }
}
impl<T: Clone + 'static> ObservableValue<T> for Value<T> {
    fn get_value(&self) -> T {
        self.get()
    }
    fn add_change_listener(&self, listener: Rc<dyn ChangeListener<T>>) {
        self.0.base.add_change_listener(listener);
    }
    fn remove_change_listener(&self, listener: &Rc<dyn ChangeListener<T>>) {
        self.0.base.remove_change_listener(listener);
    }
    fn subscribe_change(&self, listener: Rc<dyn ChangeListener<T>>) -> Subscription {
        let key = self.0.base.add_change_listener(listener);
        Subscription::from_weak_fn(Rc::downgrade(&self.0), move |node| {
            node.base.remove_change_listener_key(key)
        })
    }
}
impl<T: Clone + PartialEq + 'static> WritableValue<T> for Value<T> {
    fn set_value(&self, value: T) {
        self.set(value)
    }
}
impl<T: Number> ObservableNumberValue for Value<T> {
    fn int_value(&self) -> i32 {
        self.get().as_i32()
    }
    fn long_value(&self) -> i64 {
        self.get().as_i64()
    }
    fn float_value(&self) -> f32 {
        self.get().as_f32()
    }
    fn double_value(&self) -> f64 {
        self.get().as_f64()
    }
}

/// Observable-only view of a [`Value`].
#[derive_ex(Clone, bound())]
pub struct ReadOnlyValue<T: 'static>(Value<T>);

impl<T: 'static> ReadOnlyValue<T> {
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.get()
    }
    pub fn with<U>(&self, f: impl FnOnce(&T) -> U) -> U {
        self.0.with(f)
    }
}
impl<T: fmt::Debug> fmt::Debug for ReadOnlyValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl<T: 'static> Observable for ReadOnlyValue<T> {
    fn add_listener(&self, listener: Rc<dyn InvalidationListener>) {
        self.0.add_listener(listener)
    }
    fn remove_listener(&self, listener: &Rc<dyn InvalidationListener>) {
        self.0.remove_listener(listener)
    }
    fn subscribe(&self, listener: Rc<dyn InvalidationListener>) -> Subscription {
        self.0.subscribe(listener)
    }
}
impl<T: Clone + 'static> ObservableValue<T> for ReadOnlyValue<T> {
    fn get_value(&self) -> T {
        self.0.get()
    }
    fn add_change_listener(&self, listener: Rc<dyn ChangeListener<T>>) {
        self.0.add_change_listener(listener)
    }
    fn remove_change_listener(&self, listener: &Rc<dyn ChangeListener<T>>) {
        self.0.remove_change_listener(listener)
    }
    fn subscribe_change(&self, listener: Rc<dyn ChangeListener<T>>) -> Subscription {
        self.0.subscribe_change(listener)
    }
}
impl<T: Number> ObservableNumberValue for ReadOnlyValue<T> {
    fn int_value(&self) -> i32 {
        self.0.int_value()
    }
    fn long_value(&self) -> i64 {
        self.0.long_value()
    }
    fn float_value(&self) -> f32 {
        self.0.float_value()
    }
    fn double_value(&self) -> f64 {
        self.0.double_value()
    }
}
