use std::{collections::BTreeSet, fmt::Display};

use crate::automaton::{
    graph::{StateGraph, StateId},
    state::State,
    symbol::Symbol,
};

/// The part every automaton shares: the state arena, the start state and the
/// cached alphabet.
///
/// The alphabet holds every non-epsilon symbol used by a transition. It may be
/// extended explicitly, but epsilon never enters it.
#[derive(Debug, Clone, Default)]
pub struct AutomatonCore {
    graph: StateGraph,
    start: Option<StateId>,
    alphabet: BTreeSet<char>,
}

impl AutomatonCore {
    pub fn new() -> Self {
        AutomatonCore::default()
    }

    pub fn graph(&self) -> &StateGraph {
        &self.graph
    }

    pub fn add_state(&mut self, state: State) -> StateId {
        self.graph.add_state(state)
    }

    pub fn state(&self, id: StateId) -> &State {
        self.graph.state(id)
    }

    pub fn state_mut(&mut self, id: StateId) -> &mut State {
        self.graph.state_mut(id)
    }

    pub fn start(&self) -> Option<StateId> {
        self.start
    }

    pub fn set_start(&mut self, start: Option<StateId>) {
        debug_assert!(
            start.is_none_or(|id| self.graph.contains(id)),
            "start state {start:?} does not belong to this automaton"
        );
        self.start = start;
    }

    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    /// Adds a symbol to the alphabet. The epsilon symbol is ignored.
    pub fn add_symbol(&mut self, symbol: impl Into<Symbol>) {
        if let Symbol::Letter(c) = symbol.into() {
            self.alphabet.insert(c);
        }
    }

    /// Appends a transition without any checks and records its symbol.
    pub fn push_transition(&mut self, from: StateId, symbol: Symbol, to: StateId) {
        self.graph.add_transition(from, symbol, to);
        self.add_symbol(symbol);
    }

    /// Drops every state and transition. The start state goes with them,
    /// the alphabet is kept.
    pub fn clear_states(&mut self) {
        self.graph.clear();
        self.start = None;
    }

    pub fn clear_alphabet(&mut self) {
        self.alphabet.clear();
    }

    pub fn to_graphviz(&self) -> String {
        let mut dot = String::new();

        dot.push_str("digraph finite_automaton {\n");
        dot.push_str("rankdir=LR;\n");
        dot.push_str("node [shape = circle];\n");
        dot.push_str("__start [label = \"\", shape = none, width = 0, height = 0];\n");

        for id in self.graph.state_ids() {
            let state = self.graph.state(id);
            let shape = if state.accepting {
                "doublecircle"
            } else {
                "circle"
            };

            dot.push_str(&format!(
                "q{} [ label = \"{}\", shape = {} ];\n",
                id.index(),
                escape_label(&state.name),
                shape
            ));
        }

        if let Some(start) = self.start {
            dot.push_str(&format!("__start -> q{};\n", start.index()));
        }

        for (from, symbol, to) in self.graph.edges() {
            dot.push_str(&format!(
                "q{} -> q{} [ label = \"{}\" ];\n",
                from.index(),
                to.index(),
                escape_label(&symbol.to_string())
            ));
        }

        dot.push_str("}\n");

        dot
    }
}

fn escape_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Lists every state with its markers and its transitions, alphabet symbols
/// first and epsilon moves last.
impl Display for AutomatonCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for id in self.graph.state_ids() {
            let state = self.graph.state(id);

            write!(f, "State: {}", state.name)?;
            if self.start == Some(id) {
                write!(f, " (Start)")?;
            }
            if state.accepting {
                write!(f, " (Final)")?;
            }
            writeln!(f)?;
            writeln!(f, "Transitions:")?;

            let symbols = self
                .alphabet
                .iter()
                .map(|c| Symbol::Letter(*c))
                .chain(std::iter::once(Symbol::Epsilon));

            let mut any = false;
            for symbol in symbols {
                for target in self.graph.transitions(id, symbol) {
                    writeln!(
                        f,
                        "{}--{}-->{}",
                        state.name,
                        symbol,
                        self.graph.state(target).name
                    )?;
                    any = true;
                }
            }

            if !any {
                writeln!(f, "None")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
