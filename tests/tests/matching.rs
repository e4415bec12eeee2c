//! End-to-end matching through a session.

use trellis_tests::prelude::*;

fn even(values: &[Value]) -> Option<Value> {
    Some(Value::Bool(values[0].as_int()? % 2 == 0))
}

mod filter_after_enumeration {
    use super::*;

    pub fn scenario() -> Scenario {
        let numbers = (1..=5).fold(MutationBuilder::new(), |m, n| m.insert("number", tuple![n]));
        Scenario::new("filter_after_enumeration").step("seed", |_| numbers, |a| {
            a.rows(
                Query::new()
                    .relation("number", &["x"])
                    .check("even", &["x"], even)
                    .returns(&["x"]),
                vec![tuple![2], tuple![4]],
            )
        })
    }

    #[test]
    fn test_even_candidates_in_order() {
        scenario().run().unwrap();
    }
}

mod typed_paths {
    use super::*;

    fn two_hops() -> Query {
        Query::new()
            .relation("city", &["a"])
            .relation("road", &["a", "b"])
            .relation("road", &["b", "c"])
            .not_equal("a", "c")
            .returns(&["a", "c"])
    }

    pub fn scenario() -> Scenario {
        Scenario::new("typed_paths")
            .step(
                "seed",
                |m| {
                    m.insert("city", tuple!["lyon"])
                        .insert("city", tuple!["paris"])
                        .edges("road", &[("lyon", "paris"), ("paris", "lille"), ("paris", "lyon")])
                },
                |a| a.rows(two_hops(), vec![tuple!["lyon", "lille"]]),
            )
            .step("new_road", |m| m.edge("road", "lille", "lyon"), |a| {
                a.rows(two_hops(), vec![tuple!["lyon", "lille"], tuple!["paris", "lyon"]])
                    .same_strong("road", &["lyon", "paris", "lille"])
            })
    }

    #[test]
    fn test_two_hop_paths() {
        scenario().run().unwrap();
    }
}

mod recursion {
    use super::*;

    fn downstream_of_one() -> Query {
        Query::new()
            .constant("x", 1)
            .reaches("edge", "x", "y")
            .returns(&["y"])
    }

    fn loops() -> Query {
        Query::new().relation("node", &["n"]).reaches("edge", "n", "n").returns(&["n"])
    }

    pub fn scenario() -> Scenario {
        Scenario::new("recursion")
            .step(
                "chain",
                |m| {
                    m.edges("edge", &[(1, 2), (2, 3)])
                        .insert("node", tuple![1])
                        .insert("node", tuple![2])
                        .insert("node", tuple![3])
                },
                |a| {
                    a.rows(downstream_of_one(), vec![tuple![2], tuple![3]])
                        .row_count(loops(), 0)
                },
            )
            .step("close", |m| m.edge("edge", 3, 1), |a| {
                a.rows(downstream_of_one(), vec![tuple![1], tuple![2], tuple![3]])
                    .rows(loops(), vec![tuple![1], tuple![2], tuple![3]])
            })
            .step("reopen", |m| m.remove_edge("edge", 1, 2), |a| {
                a.rows(downstream_of_one(), Vec::new()).row_count(loops(), 0)
            })
    }

    #[test]
    fn test_closure_with_shortcuts() {
        scenario().run().unwrap();
    }

    #[test]
    fn test_closure_without_shortcuts() {
        scenario().strict().run().unwrap();
    }
}

mod component_queries {
    use super::*;

    fn peers_of_one() -> Query {
        Query::new()
            .constant("x", 1)
            .strong_component("edge", "x", "r")
            .strong_component("edge", "y", "r")
            .not_equal("x", "y")
            .returns(&["y"])
    }

    pub fn scenario() -> Scenario {
        Scenario::new("component_queries")
            .step("cycle", |m| m.edges("edge", &[(1, 2), (2, 3), (3, 1), (3, 4)]), |a| {
                a.rows(peers_of_one(), vec![tuple![2], tuple![3]])
            })
            .step("break", |m| m.remove_edge("edge", 2, 3), |a| {
                a.rows(peers_of_one(), Vec::new()).row_count(
                    Query::new().weak_component("edge", "n", "r").returns(&["n", "r"]),
                    4,
                )
            })
    }

    #[test]
    fn test_derived_relations_follow_mutations() {
        scenario().run().unwrap();
    }
}

mod equality_handling {
    use super::*;

    fn mirrored() -> Query {
        Query::new()
            .relation("edge", &["x", "y"])
            .equal("x", "z")
            .relation("edge", &["y", "z"])
            .returns(&["x", "y"])
    }

    fn scenario(config: EngineConfig) -> Scenario {
        Scenario::new("equality_handling").config(config).step(
            "pairs",
            |m| m.edges("edge", &[(1, 2), (2, 1), (2, 3)]),
            |a| a.rows(mirrored(), vec![tuple![1, 2], tuple![2, 1]]),
        )
    }

    #[test]
    fn test_eager_and_lazy_agree() {
        scenario(EngineConfig::default()).run().unwrap();
        scenario(EngineConfig::lazy()).run().unwrap();
    }

    #[test]
    fn test_undeducible_equality_fails_query() {
        Scenario::new("undeducible")
            .step("empty", |m| m, |a| {
                a.fails(
                    Query::new().relation("node", &["x"]).equal("y", "z").returns(&["x"]),
                    "can never be evaluated",
                )
            })
            .run()
            .unwrap();
    }
}
