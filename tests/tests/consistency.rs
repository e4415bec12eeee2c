//! Randomized agreement between shortcut and strict sessions.

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use trellis_core::RelationKey;
use trellis_engine::SearchContext;
use trellis_session::Session;
use trellis_tests::prelude::*;

const UNIVERSE: i64 = 10;

fn random_mutation(rng: &mut StdRng, edges: &mut Vec<(i64, i64)>) -> Mutation {
    let roll = rng.gen_range(0..100);
    if roll < 5 {
        let node = rng.gen_range(0..UNIVERSE);
        edges.retain(|(s, t)| *s != node && *t != node);
        return Mutation::DeleteNode {
            relation: "edge".into(),
            node: Value::Int(node),
        };
    }
    if roll < 65 || edges.is_empty() {
        let edge = (rng.gen_range(0..UNIVERSE), rng.gen_range(0..UNIVERSE));
        edges.push(edge);
        return Mutation::Insert {
            relation: "edge".into(),
            tuple: tuple![edge.0, edge.1],
        };
    }
    let (s, t) = edges.swap_remove(rng.gen_range(0..edges.len()));
    Mutation::Remove {
        relation: "edge".into(),
        tuple: tuple![s, t],
    }
}

fn closure_rows(session: &mut Session, start: i64) -> Vec<Tuple> {
    let query = Query::new()
        .constant("x", start)
        .reaches_or_equals("edge", "x", "y")
        .returns(&["y"]);
    session.query(query.set(), query.outputs()).unwrap()
}

// ========== TEST: shortcuts_agree_with_traversal ==========
#[test]
fn test_shortcuts_agree_with_traversal() {
    let edge = RelationKey::new("edge", 2);
    for seed in 0..6 {
        // GIVEN: the same mutations applied to a shortcut and a strict session
        let mut rng = StdRng::seed_from_u64(seed);
        let mut fast = Session::new(EngineConfig::default());
        let mut strict = Session::new(EngineConfig::default().with_strict_consistency(true));
        let mut edges = Vec::new();

        for round in 0..120 {
            let mutation = random_mutation(&mut rng, &mut edges);
            mutation.apply(fast.model_mut()).unwrap();
            mutation.apply(strict.model_mut()).unwrap();

            // THEN: both agree with batch recomputation
            fast.model().validate().unwrap();
            assert_eq!(
                fast.model().strong_components("edge"),
                strict.model().strong_components("edge"),
                "seed {} round {}",
                seed,
                round
            );

            // AND: every reachability answer agrees with plain traversal
            for s in 0..UNIVERSE {
                for t in 0..UNIVERSE {
                    let (s, t) = (Value::Int(s), Value::Int(t));
                    assert_eq!(
                        fast.model().reaches(&edge, &s, &t),
                        fast.model().reaches_by_traversal("edge", &s, &t),
                        "seed {} round {}: {} -> {}",
                        seed,
                        round,
                        s,
                        t
                    );
                }
            }

            // AND: condensation closures match the traversal closures
            for node in 0..UNIVERSE {
                let node = Value::Int(node);
                assert_eq!(
                    fast.model().reachable_targets(&edge, &node),
                    strict.model().reachable_targets(&edge, &node),
                    "seed {} round {}: targets of {}",
                    seed,
                    round,
                    node
                );
                assert_eq!(
                    fast.model().reachable_sources(&edge, &node),
                    strict.model().reachable_sources(&edge, &node),
                    "seed {} round {}: sources of {}",
                    seed,
                    round,
                    node
                );
            }

            let start = rng.gen_range(0..UNIVERSE);
            assert_eq!(closure_rows(&mut fast, start), closure_rows(&mut strict, start));
        }
    }
}

// ========== TEST: derived_relations_cover_every_node ==========
#[test]
fn test_derived_relations_cover_every_node() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut session = Session::default();
    let mut edges = Vec::new();

    for _ in 0..200 {
        let mutation = random_mutation(&mut rng, &mut edges);
        mutation.apply(session.model_mut()).unwrap();

        // Each node has exactly one strong and one weak representative
        let strong = Query::new()
            .strong_component("edge", "n", "r")
            .returns(&["n", "r"]);
        let weak = Query::new()
            .weak_component("edge", "n", "r")
            .returns(&["n", "r"]);
        let strong_rows = session.query(strong.set(), strong.outputs()).unwrap();
        let weak_rows = session.query(weak.set(), weak.outputs()).unwrap();
        let node_count: usize = session
            .model()
            .weak_components("edge")
            .iter()
            .map(|component| component.len())
            .sum();
        assert_eq!(strong_rows.len(), node_count);
        assert_eq!(weak_rows.len(), node_count);
    }
}
