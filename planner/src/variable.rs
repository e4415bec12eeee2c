//! Pattern variables.

use std::collections::BTreeSet;
use std::fmt;

/// A pattern variable, identified by its position in a constraint set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable(pub usize);

impl Variable {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.0)
    }
}

/// Ordered set of variables bound at some point of a plan.
pub type VariableSet = BTreeSet<Variable>;
