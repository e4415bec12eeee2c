//! Weakly connected components maintained under single mutations.

use trellis_tests::prelude::*;

mod equal_sides {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("equal_sides")
            .step("two_pairs", |m| m.edge("edge", "A", "B").edge("edge", "C", "D"), |a| {
                a.weak_components("edge", &[&["A", "B"], &["C", "D"]])
                    .weak_representative("edge", "B", "A")
                    .weak_representative("edge", "D", "C")
            })
            .step("join", |m| m.edge("edge", "B", "C"), |a| {
                // Equal sizes: the source side keeps its representative
                a.same_weak("edge", &["A", "B", "C", "D"])
                    .weak_representative("edge", "D", "A")
            })
    }

    #[test]
    fn test_all_four_nodes_merge() {
        scenario().run().unwrap();
    }
}

mod larger_side_wins {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("larger_side_wins")
            .step("star_and_pair", |m| m.edges("edge", &[("A", "B"), ("A", "E"), ("C", "D")]), |a| {
                a.weak_components("edge", &[&["A", "B", "E"], &["C", "D"]])
            })
            .step("join_from_small_side", |m| m.edge("edge", "D", "B"), |a| {
                a.same_weak("edge", &["A", "B", "C", "D", "E"])
                    .weak_representative("edge", "C", "A")
            })
    }

    #[test]
    fn test_larger_component_keeps_representative() {
        scenario().strict().run().unwrap();
    }
}

mod bridges {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("bridges")
            .step("chain", |m| m.edges("edge", &[(1, 2), (2, 3), (3, 4)]), |a| {
                a.weak_components("edge", &[&[1, 2, 3, 4]])
            })
            .step("reverse_copy", |m| m.edge("edge", 3, 2), |a| {
                a.weak_components("edge", &[&[1, 2, 3, 4]])
            })
            .step("cut_with_reverse_left", |m| m.remove_edge("edge", 2, 3), |a| {
                a.weak_components("edge", &[&[1, 2, 3, 4]])
            })
            .step("cut_bridge", |m| m.remove_edge("edge", 3, 2), |a| {
                a.weak_components("edge", &[&[1, 2], &[3, 4]])
                    .weak_representative("edge", 4, 3)
            })
            .step("isolate", |m| m.delete_node("edge", 2), |a| {
                a.weak_components("edge", &[&[1], &[3, 4]])
            })
    }

    #[test]
    fn test_bridges_split_components() {
        scenario().strict().run().unwrap();
    }
}
