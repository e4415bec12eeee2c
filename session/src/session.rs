//! Session: a model plus the engine that queries it.

use crate::{Model, QueryEngine, SessionResult};
use trellis_config::EngineConfig;
use trellis_core::Tuple;
use trellis_engine::Matches;
use trellis_planner::{ConstraintSet, Variable};

/// A model and a query engine sharing one configuration.
pub struct Session {
    model: Model,
    engine: QueryEngine,
}

impl Session {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            model: Model::new(&config),
            engine: QueryEngine::new(config),
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut Model {
        &mut self.model
    }

    pub fn engine(&self) -> &QueryEngine {
        &self.engine
    }

    /// Every match of the query, projected onto `outputs`.
    pub fn query(&mut self, set: &ConstraintSet, outputs: &[Variable]) -> SessionResult<Vec<Tuple>> {
        let plan = self.engine.prepare(set, outputs)?;
        let rows = Matches::new(&plan, &self.model).collect();
        Ok(rows)
    }

    /// The first match only; the search stops as soon as it is found.
    pub fn first(&mut self, set: &ConstraintSet, outputs: &[Variable]) -> SessionResult<Option<Tuple>> {
        let plan = self.engine.prepare(set, outputs)?;
        let first = Matches::new(&plan, &self.model).next();
        Ok(first)
    }

    /// Number of matches.
    pub fn count(&mut self, set: &ConstraintSet, outputs: &[Variable]) -> SessionResult<usize> {
        let plan = self.engine.prepare(set, outputs)?;
        let count = Matches::new(&plan, &self.model).count();
        Ok(count)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
