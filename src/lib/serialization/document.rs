use serde::{Deserialize, Serialize};

use crate::{
    automaton::{Automaton, EPSILON, State, StateId},
    error::SerializationError,
};

/// A single transition, states are referenced by their position in
/// [AutomatonDocument::states]. `symbol` is `'@'` for epsilon transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub from: usize,
    pub symbol: char,
    pub to: usize,
}

/// Format independent snapshot of an automaton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatonDocument {
    pub alphabet: Vec<char>,
    pub states: Vec<State>,
    pub start: Option<usize>,
    pub transitions: Vec<TransitionRecord>,
}

impl AutomatonDocument {
    pub fn from_automaton<A: Automaton>(automaton: &A) -> Self {
        // state ids are dense and in insertion order, so they double as
        // positions in the state list
        AutomatonDocument {
            alphabet: automaton.alphabet().iter().copied().collect(),
            states: automaton
                .iter_states()
                .map(|id| automaton.state(id).clone())
                .collect(),
            start: automaton.get_start().map(|id| id.index()),
            transitions: automaton
                .iter_transitions()
                .map(|(from, symbol, to)| TransitionRecord {
                    from: from.index(),
                    symbol: symbol.as_char(),
                    to: to.index(),
                })
                .collect(),
        }
    }

    /// Builds a fresh automaton from the document, validating every state
    /// reference.
    pub fn into_automaton<A: Automaton>(self) -> Result<A, SerializationError> {
        let mut automaton = A::default();

        for symbol in self.alphabet {
            if symbol == EPSILON {
                return Err(SerializationError::EpsilonInAlphabet);
            }
            automaton.add_symbol_to_alphabet(symbol);
        }

        let ids = self
            .states
            .into_iter()
            .map(|state| automaton.core_mut().add_state(state))
            .collect::<Vec<_>>();

        let lookup = |index: usize| -> Result<StateId, SerializationError> {
            ids.get(index)
                .copied()
                .ok_or(SerializationError::InvalidStateIndex {
                    index: index as u64,
                    count: ids.len(),
                })
        };

        if let Some(start) = self.start {
            automaton.set_start(Some(lookup(start)?));
        }

        for record in self.transitions {
            let from = lookup(record.from)?;
            let to = lookup(record.to)?;

            // a rejected transition was already reported by the automaton
            automaton.add_transition(from, record.symbol, to).ok();
        }

        Ok(automaton)
    }
}
