//! Change direction and non-owning observer registration.
//!
//! Subjects never own their observers: they keep weak handles and skip (and
//! prune) observers that have been dropped. Delivery follows registration
//! order, except that an observer may be attached at the front of the list.

use std::cell::RefCell;
use std::fmt;
use std::rc::Weak;

/// Direction of a change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Insert,
    Delete,
}

impl Direction {
    pub fn is_insert(self) -> bool {
        self == Direction::Insert
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Insert => write!(f, "insert"),
            Direction::Delete => write!(f, "delete"),
        }
    }
}

/// Handle returned on registration, used to detach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(pub u64);

/// Registration-ordered list of weakly held observers.
pub struct ObserverList<T: ?Sized> {
    entries: Vec<(ObserverId, Weak<RefCell<T>>)>,
    next_id: u64,
}

impl<T: ?Sized> ObserverList<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    fn allocate(&mut self) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Attach an observer at the end of the delivery order.
    pub fn attach(&mut self, observer: Weak<RefCell<T>>) -> ObserverId {
        let id = self.allocate();
        self.entries.push((id, observer));
        id
    }

    /// Attach an observer at the front of the delivery order.
    pub fn attach_first(&mut self, observer: Weak<RefCell<T>>) -> ObserverId {
        let id = self.allocate();
        self.entries.insert(0, (id, observer));
        id
    }

    /// Detach an observer. Returns false if the handle is unknown.
    pub fn detach(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    /// Number of registered observers that are still alive.
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, weak)| weak.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deliver to every live observer in order, pruning dropped ones.
    ///
    /// Observers must not re-enter the subject that is notifying them.
    pub fn notify(&mut self, mut deliver: impl FnMut(&mut T)) {
        self.entries.retain(|(_, weak)| weak.strong_count() > 0);
        for (_, weak) in &self.entries {
            if let Some(observer) = weak.upgrade() {
                deliver(&mut *observer.borrow_mut());
            }
        }
    }
}

impl<T: ?Sized> Default for ObserverList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for ObserverList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverList")
            .field("observers", &self.entries.len())
            .finish()
    }
}
