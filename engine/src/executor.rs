//! Per-attempt executors wrapping stateless operations.
//!
//! Each executor follows the same lifecycle: `on_initialize` when the
//! driver first reaches its step, `execute` to produce the next
//! result, `on_backtrack` when the driver retreats past it.

use crate::{
    CandidateIter, CheckOperation, ExtendOperation, MatchingFrame, SearchContext, SearchOperation,
};
use trellis_core::Value;

/// Executes a check: succeeds at most once between backtracks.
#[derive(Debug)]
pub struct CheckExecutor<'a> {
    operation: &'a CheckOperation,
    executed: bool,
}

impl<'a> CheckExecutor<'a> {
    pub fn new(operation: &'a CheckOperation) -> Self {
        Self {
            operation,
            executed: false,
        }
    }

    pub fn on_initialize(&mut self) {
        self.executed = false;
    }

    pub fn execute(&mut self, frame: &MatchingFrame, context: &dyn SearchContext) -> bool {
        if self.executed {
            return false;
        }
        self.executed = true;
        self.operation.evaluate(frame, context)
    }

    pub fn on_backtrack(&mut self) {
        self.executed = false;
    }
}

/// Executes an extension: binds the next candidate on every call.
pub struct ExtendExecutor<'a> {
    operation: &'a ExtendOperation,
    writes: Vec<usize>,
    candidates: Option<CandidateIter<'a>>,
}

impl<'a> ExtendExecutor<'a> {
    pub fn new(operation: &'a ExtendOperation) -> Self {
        Self {
            operation,
            writes: operation.writes(),
            candidates: None,
        }
    }

    pub fn on_initialize(&mut self, frame: &MatchingFrame, context: &'a dyn SearchContext) {
        self.candidates = Some(self.operation.candidates(frame, context));
    }

    /// Bind the next consistent candidate. Returns false once exhausted.
    pub fn execute(&mut self, frame: &mut MatchingFrame) -> bool {
        self.clear(frame);
        let Some(candidates) = self.candidates.as_mut() else {
            return false;
        };
        for values in candidates {
            if bind(frame, &self.writes, values) {
                return true;
            }
            self.writes.iter().for_each(|slot| frame.clear(*slot));
        }
        false
    }

    pub fn on_backtrack(&mut self, frame: &mut MatchingFrame) {
        self.clear(frame);
        self.candidates = None;
    }

    fn clear(&self, frame: &mut MatchingFrame) {
        for slot in &self.writes {
            frame.clear(*slot);
        }
    }
}

/// Write `values` into `slots`; a slot written twice must receive equal values.
fn bind(frame: &mut MatchingFrame, slots: &[usize], values: Vec<Value>) -> bool {
    if values.len() != slots.len() {
        return false;
    }
    for (slot, value) in slots.iter().zip(values) {
        match frame.get(*slot) {
            Some(existing) if *existing != value => return false,
            Some(_) => {}
            None => frame.set(*slot, value),
        }
    }
    true
}

/// The executor for one plan step.
pub enum Executor<'a> {
    Check(CheckExecutor<'a>),
    Extend(ExtendExecutor<'a>),
}

impl<'a> Executor<'a> {
    pub fn new(operation: &'a SearchOperation) -> Self {
        match operation {
            SearchOperation::Check(op) => Executor::Check(CheckExecutor::new(op)),
            SearchOperation::Extend(op) => Executor::Extend(ExtendExecutor::new(op)),
        }
    }

    pub fn on_initialize(&mut self, frame: &MatchingFrame, context: &'a dyn SearchContext) {
        match self {
            Executor::Check(executor) => executor.on_initialize(),
            Executor::Extend(executor) => executor.on_initialize(frame, context),
        }
    }

    pub fn execute(&mut self, frame: &mut MatchingFrame, context: &dyn SearchContext) -> bool {
        match self {
            Executor::Check(executor) => executor.execute(frame, context),
            Executor::Extend(executor) => executor.execute(frame),
        }
    }

    pub fn on_backtrack(&mut self, frame: &mut MatchingFrame) {
        match self {
            Executor::Check(executor) => executor.on_backtrack(),
            Executor::Extend(executor) => executor.on_backtrack(frame),
        }
    }
}
