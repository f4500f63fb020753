use std::{
    fmt,
    mem::take,
    rc::{Rc, Weak},
};

use crate::CompositionError;

#[cfg(test)]
mod tests;

/// A cancellable handle for one listener registration, or for several combined.
///
/// The registration is released by [`unsubscribe`](Self::unsubscribe) or when the handle is dropped.
/// Releasing an already released handle does nothing.
#[derive(Default)]
#[must_use]
pub struct Subscription(RawSubscription);

impl Subscription {
    /// A subscription that releases nothing.
    pub const EMPTY: Subscription = Subscription(RawSubscription::Empty);

    pub fn empty() -> Self {
        Self::EMPTY
    }
    pub fn from_fn(f: impl FnOnce() + 'static) -> Self {
        Subscription(RawSubscription::Fn(Box::new(f)))
    }

    /// Create a subscription that calls `unsubscribe` with `this` if it is still alive at release time.
    pub fn from_weak_fn<T: ?Sized + 'static>(
        this: Weak<T>,
        unsubscribe: impl FnOnce(Rc<T>) + 'static,
    ) -> Self {
        Subscription(RawSubscription::Fn(Box::new(move || {
            if let Some(this) = this.upgrade() {
                unsubscribe(this)
            }
        })))
    }

    /// Combine subscriptions into one that releases each of them once, in the given order.
    pub fn combine(subscriptions: impl IntoIterator<Item = Subscription>) -> Self {
        let items: Vec<_> = subscriptions
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        if items.is_empty() {
            Self::empty()
        } else {
            Subscription(RawSubscription::Combined(items))
        }
    }

    /// Like [`combine`](Self::combine), but accepts a possibly absent list of possibly absent subscriptions.
    ///
    /// The whole list is validated before anything is taken from it.
    /// On error the list is left untouched and no subscription is released.
    pub fn try_combine(
        subscriptions: Option<&mut Vec<Option<Subscription>>>,
    ) -> Result<Self, CompositionError> {
        let subscriptions = subscriptions.ok_or(CompositionError::AbsentList)?;
        if let Some(index) = subscriptions.iter().position(Option::is_none) {
            return Err(CompositionError::AbsentElement(index));
        }
        Ok(Self::combine(subscriptions.drain(..).flatten()))
    }

    /// Combine with `other`. The result releases `self` first, then `other`.
    pub fn and(self, other: Subscription) -> Self {
        Self::combine([self, other])
    }

    /// Like [`and`](Self::and), but accepts a possibly absent operand.
    ///
    /// On success `self` is replaced by the combined subscription.
    /// On error `self` is left untouched.
    pub fn try_and(&mut self, other: Option<Subscription>) -> Result<(), CompositionError> {
        let other = other.ok_or(CompositionError::AbsentOperand)?;
        let this = take(self);
        *self = this.and(other);
        Ok(())
    }

    /// Release the registration now.
    pub fn unsubscribe(&mut self) {
        match take(&mut self.0) {
            RawSubscription::Empty => {}
            RawSubscription::Fn(f) => {
                tracing::trace!("release subscription");
                f()
            }
            RawSubscription::Combined(items) => {
                // Items not yet reached are still released by drop if one of them panics.
                for mut s in items {
                    s.unsubscribe();
                }
            }
        }
    }

    /// Drop the handle without releasing the registration.
    pub fn detach(mut self) {
        if let RawSubscription::Combined(items) = take(&mut self.0) {
            for s in items {
                s.detach();
            }
        }
    }

    /// Returns `true` if releasing this subscription would do nothing.
    pub fn is_empty(&self) -> bool {
        matches!(self.0, RawSubscription::Empty)
    }
}
impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            RawSubscription::Empty => write!(f, "Subscription::Empty"),
            RawSubscription::Fn(_) => write!(f, "Subscription::Fn"),
            RawSubscription::Combined(items) => f
                .debug_tuple("Subscription::Combined")
                .field(&items.len())
                .finish(),
        }
    }
}

#[derive(Default)]
enum RawSubscription {
    #[default]
    Empty,
    Fn(Box<dyn FnOnce() + 'static>),
    Combined(Vec<Subscription>),
}
