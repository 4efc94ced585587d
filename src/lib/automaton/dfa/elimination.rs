use std::collections::BTreeMap;

use itertools::Itertools;

use crate::automaton::{Automaton, EPSILON, dfa::DFA, graph::StateId};

/// Regular expression fragments between pairs of states, the generalized
/// transitions of the state elimination method. A fragment is stored without
/// surrounding parentheses, every use wraps it.
#[derive(Debug, Clone, Default)]
struct FragmentTable {
    fragments: BTreeMap<(StateId, StateId), String>,
}

impl FragmentTable {
    fn from_dfa(dfa: &DFA) -> Self {
        let mut table = FragmentTable::default();

        for (from, symbol, to) in dfa.iter_transitions() {
            table.add(from, to, symbol.as_char().to_string());
        }

        table
    }

    fn get(&self, from: StateId, to: StateId) -> Option<&str> {
        self.fragments.get(&(from, to)).map(String::as_str)
    }

    /// Adds `fragment` as an alternative to whatever leads from `from` to `to`.
    fn add(&mut self, from: StateId, to: StateId, fragment: String) {
        self.fragments
            .entry((from, to))
            .and_modify(|existing| {
                existing.push('+');
                existing.push_str(&fragment);
            })
            .or_insert(fragment);
    }

    /// Removes `state` and reroutes every path through it as
    /// `(in).(loop)*.(out)`.
    fn eliminate(&mut self, state: StateId) {
        let (touching, rest): (BTreeMap<_, _>, BTreeMap<_, _>) = std::mem::take(&mut self.fragments)
            .into_iter()
            .partition(|((from, to), _)| *from == state || *to == state);
        self.fragments = rest;

        let mut self_loop = None;
        let mut incoming = vec![];
        let mut outgoing = vec![];

        for ((from, to), fragment) in touching {
            if from == state && to == state {
                self_loop = Some(fragment);
            } else if to == state {
                incoming.push((from, fragment));
            } else {
                outgoing.push((to, fragment));
            }
        }

        let through = match &self_loop {
            Some(fragment) => format!(".({fragment})*."),
            None => ".".to_string(),
        };

        for ((from, into), (to, out)) in incoming.iter().cartesian_product(outgoing.iter()) {
            self.add(*from, *to, format!("({into}){through}({out})"));
        }
    }

    /// The expression for all words leading from `start` to `end` once every
    /// other state has been eliminated.
    fn term(&self, start: StateId, end: StateId) -> Option<String> {
        let start_loop = self.get(start, start);

        if start == end {
            return Some(match start_loop {
                Some(fragment) => format!("({fragment})*"),
                None => EPSILON.to_string(),
            });
        }

        let forward = self.get(start, end)?;
        let end_loop = match self.get(end, end) {
            Some(fragment) => format!(".({fragment})*"),
            None => String::new(),
        };

        let mut cycles = vec![];
        if let Some(fragment) = start_loop {
            cycles.push(format!("({fragment})"));
        }
        if let Some(back) = self.get(end, start) {
            cycles.push(format!("({forward}){end_loop}.({back})"));
        }

        let prefix = if cycles.is_empty() {
            String::new()
        } else {
            format!("({})*.", cycles.join("+"))
        };

        Some(format!("{prefix}({forward}){end_loop}"))
    }
}

impl DFA {
    /// Converts the DFA into an equivalent regular expression by state
    /// elimination.
    ///
    /// Concatenation is written with an explicit `.`, so the result can be
    /// compiled again with [crate::regex::from_regex]. A DFA without a start
    /// state or without reachable final states yields the empty string.
    pub fn to_regex(&self) -> String {
        let Some(start) = self.get_start() else {
            return String::new();
        };

        let mut table = FragmentTable::from_dfa(self);

        for state in self.iter_states() {
            if state != start && !self.is_accepting(state) {
                table.eliminate(state);
            }
        }

        let terms = self
            .iter_accepting()
            .filter_map(|end| {
                let mut table = table.clone();

                for other in self.iter_accepting() {
                    if other != end && other != start {
                        table.eliminate(other);
                    }
                }

                table.term(start, end)
            })
            .collect_vec();

        let regex = terms.join("+");
        tracing::debug!("converted DFA with {} states to {:?}", self.state_count(), regex);

        regex
    }
}
