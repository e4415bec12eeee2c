//! Plans produced for representative constraint sets.

use pretty_assertions::assert_eq;
use trellis_config::EqualityHandling;
use trellis_planner::{PlanError, PlanStep, SearchPlan};
use trellis_session::{QueryEngine, SessionError};
use trellis_tests::prelude::*;

fn plan(query: &Query, config: EngineConfig) -> Result<SearchPlan, SessionError> {
    QueryEngine::new(config).plan(query.set(), query.outputs())
}

fn applied(plan: &SearchPlan) -> Vec<String> {
    plan.constraints()
        .map(|c| c.describe(plan.variable_names()))
        .collect()
}

// ========== TEST: unary_checks_surround_binary_edge ==========
#[test]
fn test_unary_checks_surround_binary_edge() {
    // GIVEN: {type(x), type(y), edge(x, y)} projected onto x
    let query = Query::new()
        .relation("type", &["x"])
        .relation("type", &["y"])
        .relation("edge", &["x", "y"])
        .returns(&["x"]);

    // WHEN
    let plan = plan(&query, EngineConfig::default()).unwrap();

    // THEN
    assert_eq!(
        applied(&plan),
        vec!["type(x)", "export x as x", "edge(x, y)", "type(y)"]
    );
    assert_eq!(
        plan.steps().last(),
        Some(&PlanStep::Project {
            variables: query.outputs().to_vec()
        })
    );
}

// ========== TEST: planning_is_deterministic ==========
#[test]
fn test_planning_is_deterministic() {
    let query = Query::new()
        .relation("edge", &["a", "b"])
        .relation("edge", &["b", "c"])
        .relation("edge", &["c", "a"])
        .not_equal("a", "c")
        .constant("b", 2)
        .returns(&["a", "c"]);

    let first = plan(&query, EngineConfig::default()).unwrap();
    let second = plan(&query, EngineConfig::default()).unwrap();

    assert_eq!(first, second);
    assert_eq!(applied(&first)[0], "b == 2");
}

// ========== TEST: every_constraint_placed_once_and_bound ==========
#[test]
fn test_every_constraint_placed_once_and_bound() {
    let query = Query::new()
        .relation("person", &["p"])
        .relation("knows", &["p", "q"])
        .relation("knows", &["q", "r"])
        .filter("adult", &["r"])
        .eval("s", "succ", &["r"], |v| Some(Value::Int(v[0].as_int()? + 1)))
        .not_equal("p", "r")
        .returns(&["p", "s"]);

    let plan = plan(&query, EngineConfig::default()).unwrap();

    // Six constraints plus one export per output
    assert_eq!(plan.constraints().count(), 8);
    let mut bound = std::collections::BTreeSet::new();
    for step in plan.steps() {
        if let PlanStep::Apply {
            constraint,
            bound_before,
        } = step
        {
            assert_eq!(bound_before, &bound);
            bound.extend(constraint.variables());
        }
    }
    assert_eq!(bound.len(), 4);
}

// ========== TEST: equality_handling_diagnostics ==========
#[test]
fn test_equality_handling_diagnostics() {
    let query = Query::new().relation("node", &["x"]).equal("y", "z").returns(&["x"]);

    let eager = plan(&query, EngineConfig::default());
    let lazy = plan(
        &query,
        EngineConfig::default().with_equality_handling(EqualityHandling::Lazy),
    );

    assert!(matches!(
        eager,
        Err(SessionError::PlanError(PlanError::UndeducibleEquality { .. }))
    ));
    assert!(matches!(
        lazy,
        Err(SessionError::PlanError(PlanError::UndeducibleEquality { .. }))
    ));
}

// ========== TEST: unbindable_output_is_reported ==========
#[test]
fn test_unbindable_output_is_reported() {
    let query = Query::new()
        .relation("node", &["x"])
        .filter("flag", &["y"])
        .returns(&["x", "y"]);

    let result = plan(&query, EngineConfig::default());

    assert!(matches!(result, Err(SessionError::PlanError(_))));
}

// ========== TEST: operand_types_must_be_established ==========
#[test]
fn test_operand_types_must_be_established() {
    // GIVEN: `heavy` expects `x` to be a `weight`
    let positive = |v: &[Value]| Some(Value::Bool(v[0].as_int()? > 0));
    let typed = Query::new()
        .relation("weight", &["x"])
        .typed_check("heavy", &["x"], &[Some("weight")], positive)
        .returns(&["x"]);
    let untyped = Query::new()
        .relation("node", &["x"])
        .typed_check("heavy", &["x"], &[Some("weight")], positive)
        .returns(&["x"]);

    // WHEN
    let planned = plan(&typed, EngineConfig::default());
    let rejected = plan(&untyped, EngineConfig::default());

    // THEN
    assert!(planned.is_ok());
    assert!(matches!(
        rejected,
        Err(SessionError::PlanError(PlanError::TypeUnsafe { ref variables, .. }))
            if variables == &vec!["x".to_string()]
    ));
}
