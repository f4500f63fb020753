use std::{cell::RefCell, fmt, mem::take, rc::Rc};

use derive_ex::derive_ex;

use crate::{
    invalidation_listener, ChangeListener, InvalidationListener, Number, Observable,
    ObservableNumberValue, ObservableValue, ObservableValueBase, Subscription,
};


/// A lazily computed value derived from other observables.
///
/// The value is computed on the first read and cached. When a dependency registered with
/// [`bind`](Self::bind) is invalidated, the cache is discarded and invalidation listeners are
/// notified once. Further invalidations are absorbed until the value is read again.
///
/// While change listeners are registered, the value is recomputed right after invalidation
/// listeners have run, and change listeners are notified if it differs from the previous value.
/// Registering a change listener computes the value if the cache is stale, so the next
/// invalidation has a previous value to compare against.
///
/// Dependencies are released by [`unbind_all`](Self::unbind_all) or when the last handle is dropped.
#[derive_ex(Clone, bound())]
pub struct Binding<T: 'static>(Rc<BindingNode<T>>);

struct BindingNode<T: 'static> {
    base: ObservableValueBase<T>,
    compute: Box<dyn Fn() -> T>,
    cache: RefCell<Option<T>>,
    dependencies: RefCell<Vec<Subscription>>,
}

impl<T: Clone + PartialEq + 'static> Binding<T> {
    pub fn new(compute: impl Fn() -> T + 'static) -> Self {
        Self(Rc::new(BindingNode {
            base: ObservableValueBase::new(),
            compute: Box::new(compute),
            cache: RefCell::new(None),
            dependencies: RefCell::new(Vec::new()),
        }))
    }

    /// Invalidate this binding whenever `dependency` is invalidated.
    pub fn bind<O: Observable + ?Sized>(&self, dependency: &O) {
        let node = Rc::downgrade(&self.0);
        let s = dependency.subscribe(invalidation_listener(move |_| {
            if let Some(node) = node.upgrade() {
                Binding(node).invalidate();
            }
        }));
        self.0.dependencies.borrow_mut().push(s);
    }

    /// Stop listening to all dependencies.
    pub fn unbind_all(&self) {
        let dependencies = take(&mut *self.0.dependencies.borrow_mut());
        drop(dependencies);
    }

    pub fn dependency_count(&self) -> usize {
        self.0.dependencies.borrow().len()
    }

    /// Returns `true` if the cached value is current.
    pub fn is_valid(&self) -> bool {
        self.0.cache.borrow().is_some()
    }

    /// Gets the value, computing it if the cache is stale.
    pub fn get(&self) -> T {
        if let Some(value) = self.0.cache.borrow().as_ref() {
            return value.clone();
        }
        tracing::trace!("recompute binding");
        let value = (self.0.compute)();
        *self.0.cache.borrow_mut() = Some(value.clone());
        value
    }

    /// Discard the cached value and notify listeners.
    ///
    /// Does nothing if the cache is already stale.
    pub fn invalidate(&self) {
        let Some(old) = self.0.cache.borrow_mut().take() else {
            return;
        };
        self.0.base.fire_invalidated(self);
        if self.0.base.has_change_listeners() {
            let new = self.get();
            if new != old {
                self.0.base.fire_changed(self, &old, &new);
            }
        }
    }
}
impl<T: fmt::Debug> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.cache.try_borrow() {
            Ok(cache) => match &*cache {
                Some(value) => fmt::Debug::fmt(value, f),
                None => write!(f, "<invalid>"),
            },
            Err(_) => write!(f, "<borrowed>"),
        }
    }
}

impl<T: 'static> Observable for Binding<T> {
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
impl<T: Clone + PartialEq + 'static> ObservableValue<T> for Binding<T> {
    fn get_value(&self) -> T {
        self.get()
    }
    fn add_change_listener(&self, listener: Rc<dyn ChangeListener<T>>) {
        self.get();
        self.0.base.add_change_listener(listener);
    }
    fn remove_change_listener(&self, listener: &Rc<dyn ChangeListener<T>>) {
        self.0.base.remove_change_listener(listener);
    }
    fn subscribe_change(&self, listener: Rc<dyn ChangeListener<T>>) -> Subscription {
        self.get();
        let key = self.0.base.add_change_listener(listener);
        Subscription::from_weak_fn(Rc::downgrade(&self.0), move |node| {
            node.base.remove_change_listener_key(key)
        })
    }
}
impl<T: Number> ObservableNumberValue for Binding<T> {
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
