//! Stateless search operations.
//!
//! Operations describe what a plan step does in terms of frame slots. They
//! hold no per-attempt state and are shared read-only between attempts.

use crate::{MatchingFrame, SearchContext};
use std::collections::HashSet;
use trellis_core::{RelationKey, Tuple, Value};
use trellis_planner::ExpressionFn;

/// Lazy sequence of candidate values for the slots an extend operation writes.
pub type CandidateIter<'c> = Box<dyn Iterator<Item = Vec<Value>> + 'c>;

/// Tests values already present in the frame.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOperation {
    /// The tuple at `slots` belongs to `key`.
    Relation { key: RelationKey, slots: Vec<usize> },
    /// The slot holds `value`.
    Constant { slot: usize, value: Value },
    Equality { left: usize, right: usize },
    Inequality { left: usize, right: usize },
    /// `function(inputs)` is true, or equals the value at `output`.
    Expression {
        name: String,
        function: ExpressionFn,
        inputs: Vec<usize>,
        output: Option<usize>,
    },
    /// `target` is reachable from `source` through `key`.
    Reachability {
        key: RelationKey,
        source: usize,
        target: usize,
        reflexive: bool,
    },
}

impl CheckOperation {
    /// Run the predicate against the frame.
    pub fn evaluate(&self, frame: &MatchingFrame, context: &dyn SearchContext) -> bool {
        match self {
            CheckOperation::Relation { key, slots } => frame
                .project(slots)
                .map_or(false, |tuple| context.contains(key, &tuple)),
            CheckOperation::Constant { slot, value } => frame.get(*slot) == Some(value),
            CheckOperation::Equality { left, right } => match (frame.get(*left), frame.get(*right)) {
                (Some(l), Some(r)) => l == r,
                _ => false,
            },
            CheckOperation::Inequality { left, right } => {
                match (frame.get(*left), frame.get(*right)) {
                    (Some(l), Some(r)) => l != r,
                    _ => false,
                }
            }
            CheckOperation::Expression {
                function,
                inputs,
                output,
                ..
            } => {
                let Some(values) = frame.values(inputs) else {
                    return false;
                };
                let result = function.call(&values);
                match output {
                    Some(slot) => result.is_some() && result.as_ref() == frame.get(*slot),
                    None => result.is_some_and(|value| value.is_true()),
                }
            }
            CheckOperation::Reachability {
                key,
                source,
                target,
                reflexive,
            } => match (frame.get(*source), frame.get(*target)) {
                (Some(s), Some(t)) => (*reflexive && s == t) || context.reaches(key, s, t),
                _ => false,
            },
        }
    }
}

/// Binds values for unbound slots.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtendOperation {
    /// Enumerate tuples of `key`; `bound[i]` tells whether `slots[i]` is an input.
    Relation {
        key: RelationKey,
        slots: Vec<usize>,
        bound: Vec<bool>,
    },
    /// Bind the slot to a literal.
    Constant { slot: usize, value: Value },
    /// Copy a bound slot into an unbound one.
    Copy { from: usize, to: usize },
    /// Bind `output` to `function(inputs)`.
    Expression {
        name: String,
        function: ExpressionFn,
        inputs: Vec<usize>,
        output: usize,
    },
    /// Bind `target` to every value reachable from the bound `source`.
    ClosureForward {
        key: RelationKey,
        source: usize,
        target: usize,
        reflexive: bool,
    },
    /// Bind `source` to every value reaching the bound `target`.
    ClosureBackward {
        key: RelationKey,
        source: usize,
        target: usize,
        reflexive: bool,
    },
    /// Bind both endpoints to every reachable pair.
    ClosureAllPairs {
        key: RelationKey,
        source: usize,
        target: usize,
        reflexive: bool,
    },
}

impl ExtendOperation {
    /// Slots written by each candidate, in candidate order. A slot may repeat.
    pub fn writes(&self) -> Vec<usize> {
        match self {
            ExtendOperation::Relation { slots, bound, .. } => slots
                .iter()
                .zip(bound)
                .filter(|(_, bound)| !**bound)
                .map(|(slot, _)| *slot)
                .collect(),
            ExtendOperation::Constant { slot, .. } => vec![*slot],
            ExtendOperation::Copy { to, .. } => vec![*to],
            ExtendOperation::Expression { output, .. } => vec![*output],
            ExtendOperation::ClosureForward { target, .. } => vec![*target],
            ExtendOperation::ClosureBackward { source, .. } => vec![*source],
            ExtendOperation::ClosureAllPairs { source, target, .. } => vec![*source, *target],
        }
    }

    /// Candidate sequence for the current frame, aligned with [`ExtendOperation::writes`].
    pub fn candidates<'c>(
        &self,
        frame: &MatchingFrame,
        context: &'c dyn SearchContext,
    ) -> CandidateIter<'c> {
        match self {
            ExtendOperation::Relation { key, slots, bound } => {
                let pattern: Vec<Option<Value>> = slots
                    .iter()
                    .zip(bound)
                    .map(|(slot, bound)| if *bound { frame.get(*slot).cloned() } else { None })
                    .collect();
                let free: Vec<usize> = (0..slots.len()).filter(|i| !bound[*i]).collect();
                Box::new(context.enumerate(key, &pattern).map(move |tuple: Tuple| {
                    free.iter()
                        .filter_map(|i| tuple.get(*i).cloned())
                        .collect()
                }))
            }
            ExtendOperation::Constant { value, .. } => Box::new(std::iter::once(vec![value.clone()])),
            ExtendOperation::Copy { from, .. } => {
                Box::new(frame.get(*from).cloned().map(|v| vec![v]).into_iter())
            }
            ExtendOperation::Expression {
                function, inputs, ..
            } => {
                let result = frame.values(inputs).and_then(|values| function.call(&values));
                Box::new(result.map(|v| vec![v]).into_iter())
            }
            ExtendOperation::ClosureForward {
                key,
                source,
                reflexive,
                ..
            } => {
                let Some(start) = frame.get(*source).cloned() else {
                    return Box::new(std::iter::empty());
                };
                let reached = context.reachable_targets(key, &start);
                Box::new(with_start(start, reached, *reflexive).into_iter().map(|v| vec![v]))
            }
            ExtendOperation::ClosureBackward {
                key,
                target,
                reflexive,
                ..
            } => {
                let Some(end) = frame.get(*target).cloned() else {
                    return Box::new(std::iter::empty());
                };
                let reached = context.reachable_sources(key, &end);
                Box::new(with_start(end, reached, *reflexive).into_iter().map(|v| vec![v]))
            }
            ExtendOperation::ClosureAllPairs { key, reflexive, .. } => {
                let key = key.clone();
                let reflexive = *reflexive;
                Box::new(context.domain(&key).into_iter().flat_map(move |start| {
                    let reached = context.reachable_targets(&key, &start);
                    with_start(start.clone(), reached, reflexive)
                        .into_iter()
                        .map(move |end| vec![start.clone(), end])
                }))
            }
        }
    }
}

/// Prepend `start` to a reachable set for reflexive closures.
fn with_start(start: Value, reached: Vec<Value>, reflexive: bool) -> Vec<Value> {
    if !reflexive {
        return reached;
    }
    let mut seen: HashSet<&Value> = HashSet::new();
    let mut all = vec![start.clone()];
    seen.insert(&start);
    all.extend(reached.iter().filter(|v| seen.insert(*v)).cloned());
    all
}

/// A compiled plan step.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOperation {
    Check(CheckOperation),
    Extend(ExtendOperation),
}

impl SearchOperation {
    pub fn is_check(&self) -> bool {
        matches!(self, SearchOperation::Check(_))
    }
}
