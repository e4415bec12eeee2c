//! Trellis Query Planner
//!
//! Turns an unordered constraint set into a linear search plan:
//! - Variables and constraints with readiness preconditions
//! - Eager unification of variables joined by equality
//! - Greedy ordering under a strict total order of heuristics
//! - Diagnostics naming constraints that can never be evaluated

mod constraint;
mod error;
mod heuristics;
mod plan;
mod planner;
mod set;
mod unify;
mod variable;

pub use constraint::*;
pub use error::*;
pub use heuristics::*;
pub use plan::*;
pub use planner::*;
pub use set::*;
pub use unify::*;
pub use variable::*;
