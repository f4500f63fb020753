use std::{cell::RefCell, ptr, rc::Rc};

use smallvec::SmallVec;

use crate::listener::ListenerKind;


/// Identifies one registration in a listener list.
///
/// Keys are never reused within a list, so a stale key never removes a later registration.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ListenerKey(u64);

struct Entry<L: ?Sized> {
    key: ListenerKey,
    listener: Rc<L>,
}
impl<L: ?Sized> Clone for Entry<L> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            listener: self.listener.clone(),
        }
    }
}

type Entries<L> = SmallVec<[Entry<L>; 1]>;

/// Ordered registrations of one listener kind.
///
/// Entries stay sorted by key because keys are issued in increasing order and
/// removal preserves the order of the rest.
pub(crate) struct ListenerList<L: ?Sized> {
    entries: Entries<L>,
    next_key: u64,
}

impl<L: ?Sized> ListenerList<L> {
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
            next_key: 0,
        }
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn insert(&mut self, listener: Rc<L>) -> ListenerKey {
        let key = ListenerKey(self.next_key);
        self.next_key += 1;
        self.entries.push(Entry { key, listener });
        key
    }
    pub fn contains_key(&self, key: ListenerKey) -> bool {
        self.index_of_key(key).is_ok()
    }
    pub fn remove_key(&mut self, key: ListenerKey) -> Option<Rc<L>> {
        let index = self.index_of_key(key).ok()?;
        Some(self.entries.remove(index).listener)
    }

    /// Removes the earliest registration of `listener`, compared by identity.
    pub fn remove_first(&mut self, listener: &Rc<L>) -> Option<Rc<L>> {
        let index = self
            .entries
            .iter()
            .position(|e| ptr::addr_eq(Rc::as_ptr(&e.listener), Rc::as_ptr(listener)))?;
        Some(self.entries.remove(index).listener)
    }

    fn index_of_key(&self, key: ListenerKey) -> Result<usize, usize> {
        self.entries.binary_search_by_key(&key, |e| e.key)
    }
    fn snapshot(&self) -> Entries<L> {
        self.entries.clone()
    }
}

/// Calls `f` for every listener registered in `list` when the pass starts.
///
/// No borrow of `list` is held while `f` runs, so listeners may register or
/// unregister freely. Listeners added during the pass are not called in it.
/// Listeners removed during the pass are not called for the rest of it.
pub(crate) fn notify_each<L: ?Sized>(
    list: &RefCell<ListenerList<L>>,
    kind: ListenerKind,
    mut f: impl FnMut(&L),
) {
    let snapshot = list.borrow().snapshot();
    if snapshot.is_empty() {
        return;
    }
    tracing::trace!(%kind, count = snapshot.len(), "notify listeners");
    for entry in &snapshot {
        if list.borrow().contains_key(entry.key) {
            f(&*entry.listener);
        }
    }
}
