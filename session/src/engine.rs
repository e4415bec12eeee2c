//! Query engine with a plan cache.

use crate::SessionResult;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tracing::debug;
use trellis_config::EngineConfig;
use trellis_engine::{CompiledPlan, OperationCompiler};
use trellis_planner::{ConstraintSet, Planner, SearchPlan, Variable};

/// Plans and compiles queries, once per distinct query shape.
///
/// A shape is the constraint set together with the requested outputs.
/// Expression constraints compare by function identity, so a cached plan is
/// reused only when the same function values are passed again.
///
/// The cache grows with every new shape unless the configuration sets
/// `plan_cache_capacity`, in which case the oldest shape is evicted first.
pub struct QueryEngine {
    config: EngineConfig,
    planner: Planner,
    cache: HashMap<QueryShape, Arc<CompiledPlan>>,
    insertion_order: VecDeque<QueryShape>,
}

type QueryShape = (ConstraintSet, Vec<Variable>);

impl QueryEngine {
    pub fn new(config: EngineConfig) -> Self {
        let planner = Planner::new(&config);
        Self {
            config,
            planner,
            cache: HashMap::new(),
            insertion_order: VecDeque::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Plan without compiling or caching, for inspection.
    pub fn plan(&self, set: &ConstraintSet, outputs: &[Variable]) -> SessionResult<SearchPlan> {
        Ok(self.planner.plan(set, outputs)?)
    }

    /// The compiled plan of a query shape, built on first use.
    pub fn prepare(
        &mut self,
        set: &ConstraintSet,
        outputs: &[Variable],
    ) -> SessionResult<Arc<CompiledPlan>> {
        let key = (set.clone(), outputs.to_vec());
        if let Some(plan) = self.cache.get(&key) {
            return Ok(Arc::clone(plan));
        }
        let plan = self.planner.plan(set, outputs)?;
        debug!(constraints = set.len(), "caching plan:\n{}", plan);
        let compiled = Arc::new(OperationCompiler::compile(&plan)?);
        if let Some(capacity) = self.config.plan_cache_capacity {
            while self.cache.len() >= capacity.max(1) {
                let Some(oldest) = self.insertion_order.pop_front() else {
                    break;
                };
                self.cache.remove(&oldest);
                debug!(cached = self.cache.len(), "evicted oldest plan");
            }
        }
        self.insertion_order.push_back(key.clone());
        self.cache.insert(key, Arc::clone(&compiled));
        Ok(compiled)
    }

    /// Number of cached query shapes.
    pub fn cached_plans(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
        self.insertion_order.clear();
    }
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
