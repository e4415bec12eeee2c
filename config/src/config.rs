//! Engine configuration.

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Strategy used to order constraints into a search plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlannerStrategy {
    /// Greedy linear ordering by readiness and binding heuristics.
    #[default]
    BasicLinear,
    /// Tree-shaped plans. Recognized but not provided by this engine.
    QuasiTree,
    /// Cost-estimate driven plans. Recognized but not provided by this engine.
    CostBased,
}

impl fmt::Display for PlannerStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerStrategy::BasicLinear => write!(f, "basic_linear"),
            PlannerStrategy::QuasiTree => write!(f, "quasi_tree"),
            PlannerStrategy::CostBased => write!(f, "cost_based"),
        }
    }
}

/// How constraints equating two variables are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EqualityHandling {
    /// Unify equal variables before planning so they share a frame slot.
    #[default]
    Eager,
    /// Keep equalities as deferred constraints copying or comparing values.
    Lazy,
}

/// Static engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    #[serde(default)]
    pub planner_strategy: PlannerStrategy,

    #[serde(default)]
    pub equality_handling: EqualityHandling,

    /// Validate partitions after every mutation and answer reachability by
    /// traversal instead of component shortcuts.
    #[serde(default)]
    pub strict_consistency: bool,

    /// Maximum number of compiled plans kept by a query engine. The oldest
    /// plan is evicted first. Unbounded when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_cache_capacity: Option<usize>,
}

impl EngineConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Cross-field checks.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.plan_cache_capacity == Some(0) {
            return Err(ConfigError::invalid("plan_cache_capacity must be at least 1"));
        }
        Ok(())
    }

    pub fn with_planner_strategy(mut self, strategy: PlannerStrategy) -> Self {
        self.planner_strategy = strategy;
        self
    }

    pub fn with_equality_handling(mut self, handling: EqualityHandling) -> Self {
        self.equality_handling = handling;
        self
    }

    pub fn with_strict_consistency(mut self, strict: bool) -> Self {
        self.strict_consistency = strict;
        self
    }

    pub fn with_plan_cache_capacity(mut self, capacity: usize) -> Self {
        self.plan_cache_capacity = Some(capacity);
        self
    }

    /// Configuration with lazy equalities.
    pub fn lazy() -> Self {
        Self::default().with_equality_handling(EqualityHandling::Lazy)
    }
}
