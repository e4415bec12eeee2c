//! Trellis Session
//!
//! Ties the core together behind one entry point:
//! - In-memory model whose binary relations are observed graphs
//! - Derived component relations kept current by the connectivity maintainers
//! - Query engine that plans and compiles each query shape once

mod engine;
mod error;
mod model;
mod session;

pub use engine::*;
pub use error::*;
pub use model::*;
pub use session::*;
