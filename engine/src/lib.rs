//! Trellis Execution Engine
//!
//! Executes search plans by chronological backtracking:
//! - Search context: the storage capabilities the engine consumes
//! - Matching frame: per-attempt variable slots
//! - Stateless operations compiled from plan steps
//! - Stateful check/extend executors created per attempt
//! - Driver loop and a lazy, restartable match iterator

mod compiler;
mod context;
mod error;
mod executor;
mod frame;
mod operation;
mod plan_executor;

pub use compiler::*;
pub use context::*;
pub use error::*;
pub use executor::*;
pub use frame::*;
pub use operation::*;
pub use plan_executor::*;
