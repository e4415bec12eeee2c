//! Trellis Graph Storage
//!
//! This crate provides the mutable directed multigraph observed by the
//! connectivity maintainers:
//! - Node set with mirrored outgoing/incoming adjacency multisets
//! - Typed change events delivered to registered observers
//! - Forward, backward and undirected traversals
//! - Induced sub-graphs

mod error;
mod event;
mod graph;
mod index;
pub mod traverse;

pub use error::*;
pub use event::*;
pub use graph::*;
pub use index::*;

use std::fmt::Debug;
use std::hash::Hash;

/// Bound satisfied by every type usable as a graph node.
///
/// `Ord` makes representative election deterministic.
pub trait GraphNode: Clone + Eq + Hash + Ord + Debug + 'static {}

impl<T: Clone + Eq + Hash + Ord + Debug + 'static> GraphNode for T {}
