//! Backtracking driver over a compiled plan.

use crate::{CompiledPlan, Executor, MatchingFrame, SearchContext};
use tracing::trace;
use trellis_core::Tuple;

/// Drives one match attempt: a cursor over the plan's executors that
/// advances on success and retreats on failure.
pub struct SearchPlanExecutor<'a> {
    context: &'a dyn SearchContext,
    executors: Vec<Executor<'a>>,
    cursor: usize,
    started: bool,
    exhausted: bool,
}

impl<'a> SearchPlanExecutor<'a> {
    pub fn new(plan: &'a CompiledPlan, context: &'a dyn SearchContext) -> Self {
        Self {
            context,
            executors: plan.operations().iter().map(Executor::new).collect(),
            cursor: 0,
            started: false,
            exhausted: false,
        }
    }

    /// Advance to the next complete match.
    ///
    /// Returns true with every step satisfied and the frame fully bound,
    /// or false once the search space is exhausted. After returning false
    /// it keeps returning false until [`SearchPlanExecutor::reset`].
    pub fn execute(&mut self, frame: &mut MatchingFrame) -> bool {
        let size = self.executors.len();
        if self.exhausted {
            return false;
        }

        if !self.started {
            self.started = true;
            self.cursor = 0;
            if size > 0 {
                self.executors[0].on_initialize(frame, self.context);
            }
        } else if self.cursor == size {
            if size == 0 {
                self.exhausted = true;
                return false;
            }
            // Resume from the last step to find the next match.
            self.cursor -= 1;
        }

        while self.cursor < size {
            let cursor = self.cursor;
            if self.executors[cursor].execute(frame, self.context) {
                self.cursor += 1;
                if self.cursor < size {
                    self.executors[self.cursor].on_initialize(frame, self.context);
                }
            } else {
                self.executors[cursor].on_backtrack(frame);
                if cursor == 0 {
                    self.exhausted = true;
                    return false;
                }
                self.cursor -= 1;
            }
        }
        true
    }

    /// Discard all progress so the next call starts a fresh search.
    pub fn reset(&mut self, frame: &mut MatchingFrame) {
        for executor in &mut self.executors {
            executor.on_backtrack(frame);
        }
        frame.clear_all();
        self.cursor = 0;
        self.started = false;
        self.exhausted = false;
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

/// Lazy sequence of projected matches.
///
/// Matches are produced on demand; dropping the iterator abandons the
/// search. Projections are not deduplicated.
pub struct Matches<'a> {
    plan: &'a CompiledPlan,
    executor: SearchPlanExecutor<'a>,
    frame: MatchingFrame,
}

impl<'a> Matches<'a> {
    pub fn new(plan: &'a CompiledPlan, context: &'a dyn SearchContext) -> Self {
        Self {
            plan,
            executor: SearchPlanExecutor::new(plan, context),
            frame: MatchingFrame::new(plan.frame_size()),
        }
    }

    /// Start over from the first match.
    pub fn restart(&mut self) {
        self.executor.reset(&mut self.frame);
    }

    /// The frame of the most recent match.
    pub fn frame(&self) -> &MatchingFrame {
        &self.frame
    }
}

impl Iterator for Matches<'_> {
    type Item = Tuple;

    fn next(&mut self) -> Option<Tuple> {
        while self.executor.execute(&mut self.frame) {
            if let Some(tuple) = self.frame.project(self.plan.projection()) {
                trace!(%tuple, "match found");
                return Some(tuple);
            }
        }
        None
    }
}
