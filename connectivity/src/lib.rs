//! Trellis Connectivity
//!
//! Incremental maintenance of the strongly and weakly connected components of
//! a mutable directed multigraph:
//! - Component partition with representative election and change notifications
//! - Batch seeding (Tarjan SCC, breadth-first flooding)
//! - Strong and weak maintainers observing a graph
//! - Condensation of the strong components, answering reachability
//! - Materialized `(node, representative)` relation

mod error;
mod maintainer;
mod partition;
mod reduced;
mod relation;
pub mod scc;
mod strong;
mod weak;

pub use error::*;
pub use maintainer::*;
pub use partition::*;
pub use reduced::*;
pub use relation::*;
pub use strong::*;
pub use weak::*;
