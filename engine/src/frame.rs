//! Matching frames.

use trellis_core::{Tuple, Value};

/// Fixed-size variable slots of one match attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchingFrame {
    slots: Vec<Option<Value>>,
}

impl MatchingFrame {
    pub fn new(size: usize) -> Self {
        Self {
            slots: vec![None; size],
        }
    }

    pub fn size(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, slot: usize) -> Option<&Value> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    pub fn is_bound(&self, slot: usize) -> bool {
        self.get(slot).is_some()
    }

    pub fn set(&mut self, slot: usize, value: Value) {
        self.slots[slot] = Some(value);
    }

    pub fn clear(&mut self, slot: usize) {
        self.slots[slot] = None;
    }

    pub fn clear_all(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    /// Values of `slots`, or `None` if any is unbound.
    pub fn values(&self, slots: &[usize]) -> Option<Vec<Value>> {
        slots.iter().map(|slot| self.get(*slot).cloned()).collect()
    }

    /// Partial binding pattern over `slots`.
    pub fn pattern(&self, slots: &[usize]) -> Vec<Option<Value>> {
        slots.iter().map(|slot| self.get(*slot).cloned()).collect()
    }

    /// Tuple of the values at `slots`, or `None` if any is unbound.
    pub fn project(&self, slots: &[usize]) -> Option<Tuple> {
        self.values(slots).map(Tuple::new)
    }
}
