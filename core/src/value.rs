//! Values stored in relation tuples and matching frames.
//!
//! Values are totally ordered and hashable so they can serve both as graph
//! nodes and as keys of materialized indexes.

use crate::NodeId;
use std::fmt;

/// A tuple component or frame slot content.
///
/// The derived order sorts by variant first (`Bool < Int < String < Node`),
/// then by payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Value {
    Bool(bool),
    Int(i64),
    String(String),
    Node(NodeId),
}

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        if let Value::Int(n) = self {
            Some(*n)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        if let Value::String(text) = self {
            Some(text)
        } else {
            None
        }
    }

    pub fn as_node(&self) -> Option<NodeId> {
        if let Value::Node(node) = self {
            Some(*node)
        } else {
            None
        }
    }

    /// Only `Bool(true)` satisfies a predicate.
    pub fn is_true(&self) -> bool {
        *self == Value::Bool(true)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(flag) => write!(f, "{}", flag),
            Value::Int(n) => write!(f, "{}", n),
            Value::String(text) => write!(f, "{:?}", text),
            Value::Node(node) => write!(f, "#{}", node),
        }
    }
}

macro_rules! value_from {
    ($($source:ty => |$v:ident| $body:expr),* $(,)?) => {
        $(
            impl From<$source> for Value {
                fn from($v: $source) -> Self {
                    $body
                }
            }
        )*
    };
}

value_from! {
    bool => |v| Value::Bool(v),
    i64 => |v| Value::Int(v),
    i32 => |v| Value::Int(i64::from(v)),
    String => |v| Value::String(v),
    &str => |v| Value::String(v.to_owned()),
    NodeId => |v| Value::Node(v),
}
