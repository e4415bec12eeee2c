//! Trellis Core Types
//!
//! This crate provides the foundational types shared by the matching core:
//! - Node identity (NodeId)
//! - Values stored in relations and matching frames
//! - Relation keys and tuples exchanged with the storage layer
//! - Change direction and non-owning observer lists

mod id;
mod observer;
mod relation;
mod value;

pub use id::*;
pub use observer::*;
pub use relation::*;
pub use value::*;
