//! Strongly connected components maintained under single mutations.

use trellis_tests::prelude::*;

mod cycle_merge_and_split {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("cycle_merge_and_split")
            .step("insert_a_b", |m| m.edge("edge", "A", "B"), |a| {
                a.strong_components("edge", &[&["A"], &["B"]])
            })
            .step("insert_b_c", |m| m.edge("edge", "B", "C"), |a| {
                a.strong_components("edge", &[&["A"], &["B"], &["C"]])
            })
            .step("close_cycle", |m| m.edge("edge", "C", "A"), |a| {
                a.same_strong("edge", &["A", "B", "C"])
                    .strong_representative("edge", "C", "A")
            })
            .step("open_cycle", |m| m.remove_edge("edge", "C", "A"), |a| {
                a.strong_components("edge", &[&["A"], &["B"], &["C"]])
                    .strong_representative("edge", "A", "A")
                    .strong_representative("edge", "C", "C")
                    .reaches("edge", "C", "A", false)
            })
    }

    #[test]
    fn test_cycle_merges_and_splits() {
        scenario().run().unwrap();
    }

    #[test]
    fn test_cycle_merges_and_splits_strictly() {
        scenario().strict().run().unwrap();
    }
}

mod parallel_edges {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("parallel_edges")
            .step("double_back_edge", |m| m.edges("edge", &[(1, 2), (2, 1), (2, 1)]), |a| {
                a.strong_components("edge", &[&[1, 2]])
            })
            .step("remove_one_copy", |m| m.remove_edge("edge", 2, 1), |a| {
                a.strong_components("edge", &[&[1, 2]])
            })
            .step("remove_last_copy", |m| m.remove_edge("edge", 2, 1), |a| {
                a.strong_components("edge", &[&[1], &[2]])
            })
    }

    #[test]
    fn test_parallel_edges_keep_component() {
        scenario().strict().run().unwrap();
    }
}

mod nested_cycles {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("nested_cycles")
            .step("two_cycles", |m| m.edges("edge", &[(1, 2), (2, 1), (3, 4), (4, 3)]), |a| {
                a.strong_components("edge", &[&[1, 2], &[3, 4]])
            })
            .step("bridge_forward", |m| m.edge("edge", 2, 3), |a| {
                a.strong_components("edge", &[&[1, 2], &[3, 4]])
                    .same_weak("edge", &[1, 2, 3, 4])
            })
            .step("bridge_back", |m| m.edge("edge", 4, 1), |a| {
                a.strong_components("edge", &[&[1, 2, 3, 4]])
                    .strong_representative("edge", 4, 1)
            })
            .step("cut_inner_edge", |m| m.remove_edge("edge", 1, 2), |a| {
                a.strong_components("edge", &[&[1], &[2], &[3, 4]])
                    .reaches("edge", 2, 1, true)
                    .reaches("edge", 1, 2, false)
            })
            .step("delete_sink", |m| m.delete_node("edge", 1), |a| {
                a.strong_components("edge", &[&[2], &[3, 4]])
                    .weak_components("edge", &[&[2, 3, 4]])
            })
    }

    #[test]
    fn test_nested_cycles() {
        scenario().strict().run().unwrap();
    }
}

mod self_loops {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("self_loops")
            .step("loop", |m| m.edge("edge", 1, 1).node("edge", 2), |a| {
                a.strong_components("edge", &[&[1], &[2]])
                    .reaches("edge", 1, 1, true)
                    .reaches("edge", 2, 2, false)
            })
            .step("unloop", |m| m.remove_edge("edge", 1, 1), |a| {
                a.strong_components("edge", &[&[1], &[2]])
                    .reaches("edge", 1, 1, false)
            })
    }

    #[test]
    fn test_self_loops_do_not_change_components() {
        scenario().strict().run().unwrap();
    }
}
