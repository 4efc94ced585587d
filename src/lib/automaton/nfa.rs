use std::{collections::VecDeque, fmt::Display};

use hashbrown::HashMap;
use itertools::Itertools;

use crate::{
    automaton::{
        Alphabet, Automaton, Language,
        core::AutomatonCore,
        dfa::DFA,
        graph::StateId,
        index_map::IndexSet,
        symbol::Symbol,
    },
    error::TransitionError,
};

/// A non-deterministic finite automaton with epsilon transitions.
///
/// All constructions (`union_with`, `concat_with`, ...) leave their operands
/// untouched and return a freshly built automaton.
#[derive(Debug, Clone, Default)]
pub struct NFA {
    core: AutomatonCore,
}

impl NFA {
    pub fn new() -> Self {
        NFA::default()
    }

    /// The two state fragment `start -> end` with one transition per symbol,
    /// `end` being the only final state. This is the building block of the
    /// Thompson construction.
    pub fn from_symbols(symbols: impl IntoIterator<Item = impl Into<Symbol>>) -> Self {
        let mut nfa = NFA::new();

        let start = nfa.add_state("start", false);
        let end = nfa.add_state("end", true);
        nfa.set_start(Some(start));

        for symbol in symbols {
            nfa.push_transition(start, symbol, end);
        }

        nfa
    }

    /// The fragment accepting exactly the one letter word `symbol`. The
    /// epsilon character yields a fragment accepting the empty word.
    pub fn literal(symbol: char) -> Self {
        NFA::from_symbols([symbol])
    }

    /// Appends a transition. This never fails for an NFA.
    pub fn push_transition(&mut self, from: StateId, symbol: impl Into<Symbol>, to: StateId) {
        self.core.push_transition(from, symbol.into(), to);
    }

    pub fn add_epsilon_transition(&mut self, from: StateId, to: StateId) {
        self.push_transition(from, Symbol::Epsilon, to);
    }

    /// The smallest superset of `states` that is closed under epsilon
    /// transitions. The result is sorted and free of duplicates, so it can be
    /// used to identify a set of states.
    pub fn epsilon_closure(&self, states: &[StateId]) -> Vec<StateId> {
        let mut visited = IndexSet::new(self.state_count());
        let mut closure = Vec::new();
        let mut stack = Vec::new();

        for &state in states {
            if visited.insert(state) {
                closure.push(state);
                stack.push(state);
            }
        }

        while let Some(state) = stack.pop() {
            for next in self.core.graph().targets(state, Symbol::Epsilon) {
                if visited.insert(next) {
                    closure.push(next);
                    stack.push(next);
                }
            }
        }

        closure.sort_unstable();
        closure
    }

    /// Moves every state of `states` along `symbol` and closes the result
    /// under epsilon transitions.
    pub fn step(&self, states: &[StateId], symbol: char) -> Vec<StateId> {
        let moved = states
            .iter()
            .flat_map(|&state| self.core.graph().targets(state, Symbol::Letter(symbol)))
            .collect_vec();

        self.epsilon_closure(&moved)
    }

    fn contains_accepting(&self, states: &[StateId]) -> bool {
        states.iter().any(|&state| self.is_accepting(state))
    }

    /// Builds an NFA for `L(self) ∪ L(other)`.
    /// A fresh start state leads with epsilon transitions to the copies of
    /// both start states. Copied states get the suffixes `_1` and `_2`.
    pub fn union_with(&self, other: &NFA) -> NFA {
        let mut result = NFA::new();

        let start = result.add_state("start", false);
        result.set_start(Some(start));

        for (operand, suffix) in [(self, "_1"), (other, "_2")] {
            let operand_start = operand.get_start();

            let state_map = operand.copy_states_into(&mut result, |result, original, copy| {
                result.state_mut(copy).push_suffix(suffix);

                if Some(original) == operand_start {
                    result.add_epsilon_transition(start, copy);
                }
            });

            operand.copy_transitions_into(&mut result, &state_map);
        }

        result
    }

    /// Builds an NFA for `L(self) · L(other)`.
    /// The final states of `self` lose their final flag and lead with an
    /// epsilon transition to the copy of the start of `other`.
    pub fn concat_with(&self, other: &NFA) -> NFA {
        let mut result = NFA::new();

        let self_start = self.get_start();
        let mut former_finals = vec![];

        let state_map = self.copy_states_into(&mut result, |result, original, copy| {
            let state = result.state_mut(copy);
            state.push_suffix("_1");

            if state.accepting {
                state.accepting = false;
                former_finals.push(copy);
            }

            if Some(original) == self_start {
                result.set_start(Some(copy));
            }
        });
        self.copy_transitions_into(&mut result, &state_map);

        let original_other_start = other.get_start();
        let mut other_start = None;

        let state_map = other.copy_states_into(&mut result, |result, original, copy| {
            result.state_mut(copy).push_suffix("_2");

            if Some(original) == original_other_start {
                other_start = Some(copy);
            }
        });
        other.copy_transitions_into(&mut result, &state_map);

        if let Some(other_start) = other_start {
            for state in former_finals {
                result.add_epsilon_transition(state, other_start);
            }
        }

        result
    }

    /// Builds an NFA for `L(self)*`.
    /// A fresh start state leads by epsilon transitions to the copied start
    /// and to a new final state `final-start`, every final state leads back
    /// to the copied start. The copied start may have incoming transitions,
    /// so it never gets the epsilon move to `final-start` itself.
    pub fn kleene_star(&self) -> NFA {
        let mut result = NFA::new();

        let self_start = self.get_start();
        let mut copied_start = None;
        let mut finals = vec![];

        let state_map = self.copy_states_into(&mut result, |result, original, copy| {
            if result.is_accepting(copy) {
                finals.push(copy);
            }

            if Some(original) == self_start {
                copied_start = Some(copy);
            }
        });
        self.copy_transitions_into(&mut result, &state_map);

        let start = result.add_state("start", false);
        result.set_start(Some(start));

        let final_start = result.add_state("final-start", true);
        result.add_epsilon_transition(start, final_start);

        // without a start state the star contains just the empty word
        if let Some(copied_start) = copied_start {
            result.add_epsilon_transition(start, copied_start);

            for state in finals {
                result.add_epsilon_transition(state, copied_start);
            }
        }

        result
    }

    /// Builds an NFA for `L(self) ∩ L(other)` over their common alphabet.
    ///
    /// Each state of the result stands for a pair of epsilon closed state
    /// sets, one per operand. The pairs are explored breadth first starting
    /// with the closures of both start states. A pair is final if both sets
    /// contain a final state.
    pub fn intersect_with(&self, other: &NFA) -> NFA {
        let common_alphabet = self
            .alphabet()
            .intersection(other.alphabet())
            .copied()
            .collect_vec();

        // the alphabet grows with the transitions actually created
        let mut result = NFA::new();

        let (Some(self_start), Some(other_start)) = (self.get_start(), other.get_start()) else {
            return result;
        };

        let start_pair = (
            self.epsilon_closure(&[self_start]),
            other.epsilon_closure(&[other_start]),
        );

        let start = result.add_state("start", false);
        result.set_start(Some(start));

        let mut state_map: HashMap<(Vec<StateId>, Vec<StateId>), StateId> = HashMap::new();
        state_map.insert(start_pair.clone(), start);

        let mut queue = VecDeque::from([(start_pair.0, start_pair.1, start)]);

        while let Some((left, right, current)) = queue.pop_front() {
            if self.contains_accepting(&left) && other.contains_accepting(&right) {
                result.state_mut(current).accepting = true;
            }

            for &symbol in &common_alphabet {
                let next_left = self.step(&left, symbol);
                let next_right = other.step(&right, symbol);

                if next_left.is_empty() || next_right.is_empty() {
                    continue;
                }

                let key = (next_left, next_right);
                let next = match state_map.get(&key) {
                    Some(&next) => next,
                    None => {
                        let next = result.add_state(format!("state{}", state_map.len()), false);
                        state_map.insert(key.clone(), next);
                        queue.push_back((key.0, key.1, next));
                        next
                    }
                };

                result.push_transition(current, symbol, next);
            }
        }

        result
    }

    /// Converts this NFA into an equivalent complete DFA by the subset
    /// construction. Every reachable set of states becomes one DFA state, the
    /// empty set becomes the sink `trap`.
    pub fn determinize(&self) -> DFA {
        let mut dfa = DFA::new();
        for &symbol in self.alphabet() {
            dfa.add_symbol_to_alphabet(symbol);
        }

        let Some(start) = self.get_start() else {
            return dfa;
        };

        let start_set = self.epsilon_closure(&[start]);
        let dfa_start = dfa.add_state("d0", self.contains_accepting(&start_set));
        dfa.set_start(Some(dfa_start));

        let mut state_map: HashMap<Vec<StateId>, StateId> = HashMap::new();
        state_map.insert(start_set.clone(), dfa_start);

        let mut stack = vec![(start_set, dfa_start)];

        while let Some((set, from)) = stack.pop() {
            for &symbol in self.alphabet() {
                let target = self.step(&set, symbol);

                let to = match state_map.get(&target) {
                    Some(&to) => to,
                    None => {
                        let name = if target.is_empty() {
                            "trap".to_string()
                        } else {
                            format!("d{}", state_map.len())
                        };

                        let to = dfa.add_state(name, self.contains_accepting(&target));
                        state_map.insert(target.clone(), to);
                        stack.push((target, to));
                        to
                    }
                };

                // every (set, symbol) pair is visited exactly once
                dfa.core_mut()
                    .push_transition(from, Symbol::Letter(symbol), to);
            }
        }

        tracing::debug!(
            "determinized NFA with {} states into DFA with {} states",
            self.state_count(),
            dfa.state_count()
        );

        dfa
    }
}

impl Alphabet for NFA {
    fn alphabet(&self) -> &std::collections::BTreeSet<char> {
        self.core.alphabet()
    }
}

impl Automaton for NFA {
    fn core(&self) -> &AutomatonCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AutomatonCore {
        &mut self.core
    }

    fn add_transition(
        &mut self,
        from: StateId,
        symbol: impl Into<Symbol>,
        to: StateId,
    ) -> Result<(), TransitionError> {
        self.push_transition(from, symbol, to);
        Ok(())
    }
}

impl Language for NFA {
    /// Simulates the NFA on the set of reachable states, without building
    /// the subset automaton.
    fn accepts(&self, input: &str) -> bool {
        let Some(start) = self.get_start() else {
            return false;
        };

        let mut current = self.epsilon_closure(&[start]);

        for symbol in input.chars() {
            current = self.step(&current, symbol);

            if current.is_empty() {
                return false;
            }
        }

        self.contains_accepting(&current)
    }
}

impl Display for NFA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.core)
    }
}
