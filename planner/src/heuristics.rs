//! Ordering heuristics for greedy plan construction.
//!
//! Candidates are compared under a strict total order, criteria in priority:
//! 1. literal constraints first
//! 2. ready constraints before those whose precondition is unmet
//! 3. constraints whose variables are all bound
//! 4. more variables already bound
//! 5. fewer variables left free
//! 6. lower sequence number
//!
//! Sequence numbers are unique, so no two candidates ever compare equal.

use std::cmp::{Ordering, Reverse};

/// The facts about one unplaced constraint that drive the ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// Position of the constraint in its set.
    pub sequence: usize,
    pub constant: bool,
    pub ready: bool,
    pub all_bound: bool,
    pub bound: usize,
    pub free: usize,
}

impl Candidate {
    fn rank(&self) -> (Reverse<bool>, Reverse<bool>, Reverse<bool>, Reverse<usize>, usize, usize) {
        (
            Reverse(self.constant),
            Reverse(self.ready),
            Reverse(self.all_bound),
            Reverse(self.bound),
            self.free,
            self.sequence,
        )
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The preferred candidate, if any.
pub fn select(candidates: impl IntoIterator<Item = Candidate>) -> Option<Candidate> {
    candidates.into_iter().min()
}
