use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

use crate::automaton::{state::State, symbol::Symbol};

/// Identifies a state inside the automaton that owns it.
pub type StateId = NodeIndex<u32>;

/// The arena holding the states of one automaton together with their
/// outgoing transitions. Transitions form a multimap from symbol to
/// destination states, duplicates are allowed at this level.
///
/// States are never removed individually, so the state ids of a graph are
/// always the dense range `0..state_count()` in insertion order.
#[derive(Debug, Clone, Default)]
pub struct StateGraph {
    graph: DiGraph<State, Symbol>,
}

impl StateGraph {
    pub fn new() -> Self {
        StateGraph {
            graph: DiGraph::new(),
        }
    }

    pub fn add_state(&mut self, state: State) -> StateId {
        self.graph.add_node(state)
    }

    /// Appends a transition, no matter what transitions `from` already has.
    pub fn add_transition(&mut self, from: StateId, symbol: Symbol, to: StateId) {
        self.graph.add_edge(from, to, symbol);
    }

    /// Iterates the destinations of `from` on `symbol` in no particular order.
    pub fn targets(&self, from: StateId, symbol: Symbol) -> impl Iterator<Item = StateId> + '_ {
        self.graph
            .edges_directed(from, Direction::Outgoing)
            .filter(move |edge| *edge.weight() == symbol)
            .map(|edge| edge.target())
    }

    /// The destinations of `from` on `symbol`, in the order the transitions
    /// were added.
    pub fn transitions(&self, from: StateId, symbol: Symbol) -> Vec<StateId> {
        // petgraph hands out outgoing edges newest first
        let mut targets = self.targets(from, symbol).collect::<Vec<_>>();
        targets.reverse();
        targets
    }

    pub fn has_transition(&self, from: StateId, symbol: Symbol) -> bool {
        self.targets(from, symbol).next().is_some()
    }

    /// All outgoing transitions of `from` in insertion order.
    pub fn outgoing(&self, from: StateId) -> Vec<(Symbol, StateId)> {
        let mut outgoing = self
            .graph
            .edges_directed(from, Direction::Outgoing)
            .map(|edge| (*edge.weight(), edge.target()))
            .collect::<Vec<_>>();
        outgoing.reverse();
        outgoing
    }

    /// All transitions of the graph in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (StateId, Symbol, StateId)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (edge.source(), *edge.weight(), edge.target()))
    }

    pub fn state(&self, id: StateId) -> &State {
        &self.graph[id]
    }

    pub fn state_mut(&mut self, id: StateId) -> &mut State {
        &mut self.graph[id]
    }

    pub fn contains(&self, id: StateId) -> bool {
        self.graph.node_weight(id).is_some()
    }

    pub fn state_ids(&self) -> impl Iterator<Item = StateId> + '_ {
        self.graph.node_indices()
    }

    pub fn state_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn transition_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn clear(&mut self) {
        self.graph.clear();
    }
}
