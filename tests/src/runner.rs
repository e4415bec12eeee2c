//! Scenario runner.

use trellis_session::Session;

use crate::error::{ScenarioError, ScenarioResult};
use crate::scenario::Scenario;

/// Runs a scenario against a fresh session.
pub struct Runner<'s> {
    scenario: &'s Scenario,
}

impl<'s> Runner<'s> {
    /// Create a new runner for a scenario.
    pub fn new(scenario: &'s Scenario) -> Self {
        Self { scenario }
    }

    /// Run the scenario, returning the final session for further inspection.
    pub fn run(&self) -> ScenarioResult<Session> {
        let mut session = Session::new(self.scenario.engine_config().clone());

        for step in self.scenario.steps() {
            // 1. Apply the mutations
            for mutation in &step.mutations {
                mutation
                    .apply(session.model_mut())
                    .map_err(|e| ScenarioError::step_execution(&step.name, e.to_string()))?;
            }

            // 2. Components must match batch recomputation after every step
            session
                .model()
                .validate()
                .map_err(|e| ScenarioError::inconsistent(&step.name, e.to_string()))?;

            // 3. Check the assertion
            step.assertion
                .verify(&mut session)
                .map_err(|message| ScenarioError::assertion_failed(&step.name, message))?;
        }

        Ok(session)
    }
}
