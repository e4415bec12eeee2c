//! Batch component computation used for seeding and validation.

use std::collections::{HashMap, HashSet};
use trellis_graph::{traverse, Adjacency, GraphNode};

struct Frame<'g, N> {
    node: &'g N,
    successors: std::vec::IntoIter<&'g N>,
}

/// Iterative Tarjan over an adjacency.
struct Tarjan<'g, N: GraphNode> {
    graph: &'g Adjacency<N>,
    counter: usize,
    index: HashMap<&'g N, usize>,
    lowlink: HashMap<&'g N, usize>,
    stack: Vec<&'g N>,
    on_stack: HashSet<&'g N>,
    components: Vec<HashSet<N>>,
}

impl<'g, N: GraphNode> Tarjan<'g, N> {
    fn new(graph: &'g Adjacency<N>) -> Self {
        Self {
            graph,
            counter: 0,
            index: HashMap::new(),
            lowlink: HashMap::new(),
            stack: Vec::new(),
            on_stack: HashSet::new(),
            components: Vec::new(),
        }
    }

    fn enter(&mut self, node: &'g N) -> Frame<'g, N> {
        self.index.insert(node, self.counter);
        self.lowlink.insert(node, self.counter);
        self.counter += 1;
        self.stack.push(node);
        self.on_stack.insert(node);

        let mut successors: Vec<&'g N> = self.graph.targets(node).collect();
        successors.sort();
        Frame {
            node,
            successors: successors.into_iter(),
        }
    }

    fn lower(&mut self, node: &'g N, candidate: usize) {
        if let Some(low) = self.lowlink.get_mut(node) {
            *low = (*low).min(candidate);
        }
    }

    fn run(&mut self, root: &'g N) {
        let mut calls = vec![self.enter(root)];

        while let Some(frame) = calls.last_mut() {
            let node = frame.node;
            if let Some(next) = frame.successors.next() {
                let visited = self.index.get(next).copied();
                match visited {
                    None => {
                        let frame = self.enter(next);
                        calls.push(frame);
                    }
                    Some(next_index) if self.on_stack.contains(next) => {
                        self.lower(node, next_index);
                    }
                    Some(_) => {}
                }
                continue;
            }

            calls.pop();
            let low = self.lowlink[node];
            if let Some(parent) = calls.last() {
                self.lower(parent.node, low);
            }
            if low == self.index[node] {
                let mut component = HashSet::new();
                while let Some(member) = self.stack.pop() {
                    self.on_stack.remove(member);
                    component.insert(member.clone());
                    if member == node {
                        break;
                    }
                }
                self.components.push(component);
            }
        }
    }
}

/// Strongly connected components of the whole adjacency.
pub fn strongly_connected_components<N: GraphNode>(graph: &Adjacency<N>) -> Vec<HashSet<N>> {
    let mut roots: Vec<&N> = graph.nodes().collect();
    roots.sort();

    let mut tarjan = Tarjan::new(graph);
    for root in roots {
        if !tarjan.index.contains_key(root) {
            tarjan.run(root);
        }
    }
    tarjan.components
}

/// Weakly connected components of the whole adjacency.
pub fn weakly_connected_components<N: GraphNode>(graph: &Adjacency<N>) -> Vec<HashSet<N>> {
    let mut roots: Vec<&N> = graph.nodes().collect();
    roots.sort();

    let mut seen: HashSet<N> = HashSet::new();
    let mut components = Vec::new();
    for root in roots {
        if seen.contains(root) {
            continue;
        }
        let component = traverse::undirected_reachable(graph, root, None);
        seen.extend(component.iter().cloned());
        components.push(component);
    }
    components
}
