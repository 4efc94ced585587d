use std::{
    collections::{BTreeSet, VecDeque},
    fmt::Display,
};

use hashbrown::HashMap;
use itertools::Itertools;

use crate::{
    automaton::{
        Alphabet, Automaton, Language, core::AutomatonCore, graph::StateId, nfa::NFA,
        symbol::Symbol,
    },
    error::{AutomatonError, TransitionError},
};

pub mod elimination;
pub mod minimization;

/// A deterministic finite automaton.
///
/// Every state has at most one transition per symbol and there are no
/// epsilon transitions. The automaton does not have to be complete, a
/// missing transition rejects the input.
#[derive(Debug, Clone, Default)]
pub struct DFA {
    core: AutomatonCore,
}

impl DFA {
    pub fn new() -> Self {
        DFA::default()
    }

    /// The unique successor of `from` on `symbol`, if there is one.
    pub fn next_state(&self, from: StateId, symbol: char) -> Option<StateId> {
        self.core
            .graph()
            .targets(from, Symbol::Letter(symbol))
            .next()
    }

    /// Like [Language::accepts], but reports a missing start state instead
    /// of rejecting.
    pub fn try_accepts(&self, input: &str) -> Result<bool, AutomatonError> {
        let mut current = self.get_start().ok_or(AutomatonError::MissingStart)?;

        for symbol in input.chars() {
            match self.next_state(current, symbol) {
                Some(next) => current = next,
                None => return Ok(false),
            }
        }

        Ok(self.is_accepting(current))
    }

    /// Builds the product automaton for `L(self) ∩ L(other)` over the common
    /// alphabet. Only pairs reachable from the pair of start states are
    /// created, a pair is final iff both components are final.
    pub fn intersect_with(&self, other: &DFA) -> DFA {
        let common_alphabet = self
            .alphabet()
            .intersection(other.alphabet())
            .copied()
            .collect_vec();

        // the alphabet grows with the transitions actually created
        let mut result = DFA::new();

        let (Some(self_start), Some(other_start)) = (self.get_start(), other.get_start()) else {
            return result;
        };

        let start = result
            .core
            .add_state(self.state(self_start).join(other.state(other_start)));
        result.set_start(Some(start));

        let mut state_map = HashMap::new();
        state_map.insert((self_start, other_start), start);

        let mut queue = VecDeque::from([(self_start, other_start, start)]);

        while let Some((left, right, current)) = queue.pop_front() {
            for &symbol in &common_alphabet {
                let (Some(next_left), Some(next_right)) =
                    (self.next_state(left, symbol), other.next_state(right, symbol))
                else {
                    continue;
                };

                let next = *state_map
                    .entry((next_left, next_right))
                    .or_insert_with(|| {
                        let next = result
                            .core
                            .add_state(self.state(next_left).join(other.state(next_right)));
                        queue.push_back((next_left, next_right, next));
                        next
                    });

                result
                    .core
                    .push_transition(current, Symbol::Letter(symbol), next);
            }
        }

        result
    }

    /// Copies `self` with every final flag flipped.
    ///
    /// This only yields the complement language if `self` is complete over
    /// its alphabet, see [DFA::completed].
    pub fn complement(&self) -> DFA {
        let mut result = DFA::new();
        let start = self.get_start();

        let state_map = self.copy_states_into(&mut result, |result, original, copy| {
            result.state_mut(copy).invert_mut();

            if Some(original) == start {
                result.set_start(Some(copy));
            }
        });
        self.copy_transitions_into(&mut result, &state_map);

        result
    }

    fn missing_transitions(&self) -> Vec<(StateId, char)> {
        self.iter_states()
            .cartesian_product(self.alphabet().iter().copied())
            .filter(|&(state, symbol)| self.next_state(state, symbol).is_none())
            .collect_vec()
    }

    /// Checks whether every state has a transition for every alphabet symbol.
    pub fn is_complete(&self) -> bool {
        self.missing_transitions().is_empty()
    }

    /// A copy of `self` where every missing transition leads into a new
    /// non-final sink state `trap`. Returns a plain copy if `self` is
    /// already complete.
    pub fn completed(&self) -> DFA {
        let mut result = self.clone();

        let missing = self.missing_transitions();
        if missing.is_empty() {
            return result;
        }

        let trap = result.add_state("trap", false);

        for (state, symbol) in missing {
            result
                .core
                .push_transition(state, Symbol::Letter(symbol), trap);
        }

        for &symbol in self.alphabet() {
            result
                .core
                .push_transition(trap, Symbol::Letter(symbol), trap);
        }

        result
    }

    pub fn to_nfa(&self) -> NFA {
        let mut nfa = NFA::new();
        let start = self.get_start();

        let state_map = self.copy_states_into(&mut nfa, |nfa, original, copy| {
            if Some(original) == start {
                nfa.set_start(Some(copy));
            }
        });
        self.copy_transitions_into(&mut nfa, &state_map);

        nfa
    }
}

impl Alphabet for DFA {
    fn alphabet(&self) -> &BTreeSet<char> {
        self.core.alphabet()
    }
}

impl Automaton for DFA {
    fn core(&self) -> &AutomatonCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AutomatonCore {
        &mut self.core
    }

    /// Adds a transition if it keeps the automaton deterministic.
    /// Epsilon transitions and a second transition for the same symbol are
    /// rejected with a warning and leave the automaton unchanged.
    fn add_transition(
        &mut self,
        from: StateId,
        symbol: impl Into<Symbol>,
        to: StateId,
    ) -> Result<(), TransitionError> {
        let symbol = symbol.into();

        let error = match symbol {
            Symbol::Epsilon => TransitionError::EpsilonInDfa {
                from: self.state(from).name.clone(),
            },
            Symbol::Letter(letter) if self.next_state(from, letter).is_some() => {
                TransitionError::Nondeterministic {
                    from: self.state(from).name.clone(),
                    symbol: letter,
                    to: self.state(to).name.clone(),
                }
            }
            Symbol::Letter(_) => {
                self.core.push_transition(from, symbol, to);
                return Ok(());
            }
        };

        tracing::warn!("{error}");
        Err(error)
    }
}

impl Language for DFA {
    fn accepts(&self, input: &str) -> bool {
        match self.try_accepts(input) {
            Ok(accepted) => accepted,
            Err(error) => {
                tracing::warn!("{error}, rejecting {input:?}");
                false
            }
        }
    }
}

impl Display for DFA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.core)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_transitions_in_state_then_symbol_order() {
        let mut dfa = DFA::new();
        let q0 = dfa.add_state("q0", false);
        let q1 = dfa.add_state("q1", true);
        dfa.set_start(Some(q0));

        dfa.add_transition(q0, 'a', q1).unwrap();
        dfa.add_transition(q1, 'b', q0).unwrap();

        assert_eq!(dfa.missing_transitions(), vec![(q0, 'b'), (q1, 'a')]);
        assert!(!dfa.is_complete());
        assert!(dfa.completed().is_complete());
    }
}
