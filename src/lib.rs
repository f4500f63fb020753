//! Observable values with invalidation and change listeners, and composable subscriptions.
//!
//! ```
//! use observable_value::*;
//! use std::{cell::RefCell, rc::Rc};
//!
//! let counter = IntegerValue::new(0);
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let l = log.clone();
//! let s = counter.subscribe_change(change_listener(move |_, old: &i32, new: &i32| {
//!     l.borrow_mut().push((*old, *new));
//! }));
//! counter.set(5);
//! counter.set(5);
//! counter.set(7);
//! drop(s);
//! counter.set(9);
//! assert_eq!(*log.borrow(), [(0, 5), (5, 7)]);
//! ```
mod binding;
mod dispatch;
mod error;
mod listener;
mod number;
mod observable;
mod subscription;
mod value;
mod value_base;

#[cfg(test)]
mod test_helpers;

pub use binding::*;
pub use dispatch::ListenerKey;
pub use error::*;
pub use listener::{change_listener, invalidation_listener, ChangeListener, InvalidationListener};
pub use number::*;
pub use observable::*;
pub use subscription::*;
pub use value::*;
pub use value_base::*;
