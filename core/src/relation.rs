//! Relation keys and tuples exchanged with the storage layer.

use crate::Value;
use std::fmt;

/// Suffix of the derived strongly-connected-component relation.
pub const STRONG_COMPONENTS_SUFFIX: &str = "#scc";

/// Suffix of the derived weakly-connected-component relation.
pub const WEAK_COMPONENTS_SUFFIX: &str = "#wcc";

/// Identifies a relation stored in a model.
///
/// Enumerable relations can produce their tuples for any binding pattern.
/// Non-enumerable relations only answer membership of fully bound tuples,
/// so constraints over them are deferred until every argument is bound.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelationKey {
    name: String,
    arity: usize,
    enumerable: bool,
}

impl RelationKey {
    /// Create an enumerable relation key.
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        Self {
            name: name.into(),
            arity,
            enumerable: true,
        }
    }

    /// Create a non-enumerable (membership only) relation key.
    pub fn filter(name: impl Into<String>, arity: usize) -> Self {
        Self {
            name: name.into(),
            arity,
            enumerable: false,
        }
    }

    /// Derived `(node, representative)` relation of the strong components of `base`.
    pub fn strong_components(base: &str) -> Self {
        Self::new(format!("{}{}", base, STRONG_COMPONENTS_SUFFIX), 2)
    }

    /// Derived `(node, representative)` relation of the weak components of `base`.
    pub fn weak_components(base: &str) -> Self {
        Self::new(format!("{}{}", base, WEAK_COMPONENTS_SUFFIX), 2)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn is_enumerable(&self) -> bool {
        self.enumerable
    }

    pub fn is_unary(&self) -> bool {
        self.arity == 1
    }

    /// If this is a derived component relation, the base relation name and
    /// whether the components are strong.
    pub fn component_base(&self) -> Option<(&str, bool)> {
        if let Some(base) = self.name.strip_suffix(STRONG_COMPONENTS_SUFFIX) {
            Some((base, true))
        } else {
            self.name
                .strip_suffix(WEAK_COMPONENTS_SUFFIX)
                .map(|base| (base, false))
        }
    }
}

impl fmt::Display for RelationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.arity)
    }
}

/// An ordered tuple of values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Tuple(pub Vec<Value>);

impl Tuple {
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    pub fn arity(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }

    pub fn into_values(self) -> Vec<Value> {
        self.0
    }

    /// Check whether this tuple agrees with a partial binding pattern.
    pub fn matches(&self, pattern: &[Option<Value>]) -> bool {
        self.0.len() == pattern.len()
            && self
                .0
                .iter()
                .zip(pattern)
                .all(|(value, bound)| bound.as_ref().map_or(true, |b| b == value))
    }
}

impl From<Vec<Value>> for Tuple {
    fn from(values: Vec<Value>) -> Self {
        Tuple(values)
    }
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, ")")
    }
}

/// Build a tuple from values convertible into [`Value`].
#[macro_export]
macro_rules! tuple {
    () => {
        $crate::Tuple::default()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Tuple::new(vec![$($crate::Value::from($value)),+])
    };
}
