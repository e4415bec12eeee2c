//! Eager unification of variables joined by equality.

use crate::{Constraint, Variable};

/// Union-find over variables; the lowest variable of a class represents it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Unification {
    parent: Vec<Variable>,
}

impl Unification {
    /// Every variable is its own class.
    pub fn identity(count: usize) -> Self {
        Self {
            parent: (0..count).map(Variable).collect(),
        }
    }

    /// Unify the variables of every equality among `constraints`.
    pub fn from_equalities(count: usize, constraints: &[Constraint]) -> Self {
        let mut unification = Self::identity(count);
        for constraint in constraints {
            if let Constraint::Equality { left, right } = constraint {
                unification.union(*left, *right);
            }
        }
        unification
    }

    /// Representative of the class of `var`.
    pub fn find(&self, var: Variable) -> Variable {
        let mut current = var;
        while let Some(&parent) = self.parent.get(current.index()) {
            if parent == current {
                break;
            }
            current = parent;
        }
        current
    }

    pub fn union(&mut self, a: Variable, b: Variable) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        let (low, high) = if ra < rb { (ra, rb) } else { (rb, ra) };
        self.parent[high.index()] = low;
        // Flatten so every lookup is a single hop.
        for index in 0..self.parent.len() {
            let root = self.find(Variable(index));
            self.parent[index] = root;
        }
    }

    pub fn is_unified(&self, a: Variable, b: Variable) -> bool {
        self.find(a) == self.find(b)
    }

    /// Whether every variable is alone in its class.
    pub fn is_trivial(&self) -> bool {
        self.parent.iter().enumerate().all(|(i, p)| p.index() == i)
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }
}
