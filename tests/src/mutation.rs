//! Mutations applied by scenario steps.

use trellis_core::{RelationKey, Tuple, Value};
use trellis_session::{Model, SessionResult};

/// A single change to the model.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Insert { relation: String, tuple: Tuple },
    Remove { relation: String, tuple: Tuple },
    InsertNode { relation: String, node: Value },
    DeleteNode { relation: String, node: Value },
}

impl Mutation {
    /// Apply to `model`.
    pub fn apply(&self, model: &mut Model) -> SessionResult<()> {
        match self {
            Mutation::Insert { relation, tuple } => {
                model.insert(&RelationKey::new(relation.as_str(), tuple.arity()), tuple.clone())?;
            }
            Mutation::Remove { relation, tuple } => {
                model.remove(&RelationKey::new(relation.as_str(), tuple.arity()), tuple)?;
            }
            Mutation::InsertNode { relation, node } => {
                model.insert_node(relation, node.clone())?;
            }
            Mutation::DeleteNode { relation, node } => {
                model.delete_node(relation, node);
            }
        }
        Ok(())
    }
}

/// Fluent builder for the mutations of one step.
#[derive(Debug, Default)]
pub struct MutationBuilder {
    mutations: Vec<Mutation>,
}

impl MutationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an edge of a binary relation.
    pub fn edge(self, relation: &str, source: impl Into<Value>, target: impl Into<Value>) -> Self {
        self.insert(relation, Tuple::new(vec![source.into(), target.into()]))
    }

    /// Insert several edges in order.
    pub fn edges<V: Clone + Into<Value>>(mut self, relation: &str, pairs: &[(V, V)]) -> Self {
        for (source, target) in pairs {
            self = self.edge(relation, source.clone(), target.clone());
        }
        self
    }

    /// Remove one occurrence of an edge.
    pub fn remove_edge(
        self,
        relation: &str,
        source: impl Into<Value>,
        target: impl Into<Value>,
    ) -> Self {
        self.remove(relation, Tuple::new(vec![source.into(), target.into()]))
    }

    pub fn node(mut self, relation: &str, node: impl Into<Value>) -> Self {
        self.mutations.push(Mutation::InsertNode {
            relation: relation.to_string(),
            node: node.into(),
        });
        self
    }

    pub fn delete_node(mut self, relation: &str, node: impl Into<Value>) -> Self {
        self.mutations.push(Mutation::DeleteNode {
            relation: relation.to_string(),
            node: node.into(),
        });
        self
    }

    /// Insert a tuple; the relation arity is the tuple's.
    pub fn insert(mut self, relation: &str, tuple: Tuple) -> Self {
        self.mutations.push(Mutation::Insert {
            relation: relation.to_string(),
            tuple,
        });
        self
    }

    pub fn remove(mut self, relation: &str, tuple: Tuple) -> Self {
        self.mutations.push(Mutation::Remove {
            relation: relation.to_string(),
            tuple,
        });
        self
    }

    pub fn build(self) -> Vec<Mutation> {
        self.mutations
    }
}
