//! Trellis Integration Test Framework
//!
//! Provides a fluent API for scenario tests against a session:
//!
//! - **mutations** - graph and tuple changes applied by a step
//! - **queries** - constraint sets built from named variables
//! - **assertions** - component, reachability and row expectations
//!
//! Every step is followed by a consistency check of all maintained
//! components against batch recomputation.
//!
//! # Example
//!
//! ```
//! use trellis_tests::prelude::*;
//!
//! Scenario::new("cycle")
//!     .step("close", |m| m.edge("edge", 1, 2).edge("edge", 2, 1), |a| {
//!         a.strong_components("edge", &[&[1, 2]])
//!     })
//!     .run()
//!     .unwrap();
//! ```

mod error;
mod mutation;
mod query;
mod runner;
mod scenario;

pub use assertion::{Assertion, AssertionBuilder};
pub use error::{ScenarioError, ScenarioResult};
pub use mutation::{Mutation, MutationBuilder};
pub use query::Query;
pub use scenario::{Scenario, Step};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::assertion::{Assertion, AssertionBuilder};
    pub use crate::error::{ScenarioError, ScenarioResult};
    pub use crate::mutation::{Mutation, MutationBuilder};
    pub use crate::query::Query;
    pub use crate::scenario::Scenario;
    pub use trellis_config::EngineConfig;
    pub use trellis_core::{tuple, Tuple, Value};
}
