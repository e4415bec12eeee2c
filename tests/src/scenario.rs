//! Scenario definition and builder.

use trellis_config::EngineConfig;
use trellis_session::Session;

use crate::assertion::{Assertion, AssertionBuilder};
use crate::error::ScenarioResult;
use crate::mutation::{Mutation, MutationBuilder};
use crate::runner::Runner;

/// A step in a scenario: mutations followed by an assertion.
#[derive(Debug)]
pub struct Step {
    /// Step name (for reporting).
    pub name: String,
    /// Changes applied in order.
    pub mutations: Vec<Mutation>,
    /// Assertion to verify the result.
    pub assertion: Assertion,
}

/// A complete test scenario.
#[derive(Debug)]
pub struct Scenario {
    /// Scenario name (for reporting).
    name: String,
    /// Configuration of the session the scenario runs in.
    config: EngineConfig,
    /// Steps with assertions.
    steps: Vec<Step>,
}

impl Scenario {
    /// Create a new scenario with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: EngineConfig::default(),
            steps: Vec::new(),
        }
    }

    /// Run under a specific configuration.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate every maintainer after each graph event and disable
    /// reachability shortcuts.
    pub fn strict(mut self) -> Self {
        self.config = self.config.with_strict_consistency(true);
        self
    }

    /// Add a step with its mutations and assertion.
    pub fn step<M, F>(mut self, name: impl Into<String>, mutations_fn: M, assertion_fn: F) -> Self
    where
        M: FnOnce(MutationBuilder) -> MutationBuilder,
        F: FnOnce(AssertionBuilder) -> AssertionBuilder,
    {
        let name = name.into();
        let mutations = mutations_fn(MutationBuilder::new()).build();
        let assertion = assertion_fn(AssertionBuilder::new()).build();
        self.steps.push(Step {
            name,
            mutations,
            assertion,
        });
        self
    }

    /// Run the scenario and return the final session.
    pub fn run(&self) -> ScenarioResult<Session> {
        Runner::new(self).run()
    }

    /// Get the scenario name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn engine_config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get the steps.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScenarioError;

    #[test]
    fn test_scenario_builder() {
        let scenario = Scenario::new("test")
            .strict()
            .step("chain", |m| m.edge("edge", 1, 2).edge("edge", 2, 3), |a| a)
            .step("cut", |m| m.remove_edge("edge", 1, 2), |a| a.reaches("edge", 1, 3, false));

        assert_eq!(scenario.name(), "test");
        assert_eq!(scenario.steps().len(), 2);
        assert_eq!(scenario.steps()[0].mutations.len(), 2);
        assert_eq!(scenario.steps()[1].assertion.len(), 1);
        assert!(scenario.engine_config().strict_consistency);
    }

    #[test]
    fn test_failed_assertion_names_step() {
        let scenario = Scenario::new("wrong")
            .step("pair", |m| m.edge("edge", 1, 2), |a| a.same_strong("edge", &[1, 2]));

        let err = scenario.run().err().unwrap();

        assert!(matches!(err, ScenarioError::AssertionFailed { ref step, .. } if step == "pair"));
    }

    #[test]
    fn test_rejected_mutation_names_step() {
        let scenario = Scenario::new("derived")
            .step("write_derived", |m| m.edge("edge#scc", 1, 1), |a| a);

        let err = scenario.run().err().unwrap();

        assert!(matches!(err, ScenarioError::StepExecution { ref step, .. } if step == "write_derived"));
    }
}
