//! Trellis Engine Configuration
//!
//! Static options supplied when an engine is constructed:
//! - Planning strategy selector
//! - Eager or lazy handling of variable equalities
//! - Strict incremental consistency for recursive queries over cyclic graphs
//! - Optional bound on the number of cached query plans
//!
//! ```
//! use trellis_config::{EngineConfig, EqualityHandling};
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     equality_handling = "lazy"
//!     strict_consistency = true
//! "#).unwrap();
//!
//! assert_eq!(config.equality_handling, EqualityHandling::Lazy);
//! assert!(config.strict_consistency);
//! ```

mod config;
mod error;

pub use config::*;
pub use error::*;
