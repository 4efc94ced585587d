use std::{
    collections::BTreeSet,
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use crate::{
    error::{SerializationError, TransitionError},
    serialization::{AutomatonSerializer, binary::BinarySerializer},
};

pub mod core;
pub mod dfa;
pub mod graph;
pub mod index_map;
pub mod nfa;
pub mod state;
pub mod symbol;

pub use self::{
    core::AutomatonCore,
    graph::StateId,
    index_map::StateMap,
    state::State,
    symbol::{EPSILON, Symbol},
};

/// Access to the set of symbols an automaton reads.
pub trait Alphabet {
    fn alphabet(&self) -> &BTreeSet<char>;
}

/// Something that decides membership of words.
pub trait Language: Alphabet {
    fn accepts(&self, input: &str) -> bool;
}

/// Shared behaviour of DFAs and NFAs on top of an [AutomatonCore].
///
/// Implementors only decide how transitions are inserted, everything else is
/// provided on top of the core.
pub trait Automaton: Alphabet + Default + Sized {
    fn core(&self) -> &AutomatonCore;

    fn core_mut(&mut self) -> &mut AutomatonCore;

    /// Adds a transition. `'@'` converts to [Symbol::Epsilon].
    fn add_transition(
        &mut self,
        from: StateId,
        symbol: impl Into<Symbol>,
        to: StateId,
    ) -> Result<(), TransitionError>;

    fn add_state(&mut self, name: impl Into<String>, accepting: bool) -> StateId {
        self.core_mut().add_state(State::new(name, accepting))
    }

    fn state(&self, id: StateId) -> &State {
        self.core().state(id)
    }

    fn state_mut(&mut self, id: StateId) -> &mut State {
        self.core_mut().state_mut(id)
    }

    fn get_start(&self) -> Option<StateId> {
        self.core().start()
    }

    fn set_start(&mut self, start: Option<StateId>) {
        self.core_mut().set_start(start);
    }

    fn is_accepting(&self, id: StateId) -> bool {
        self.state(id).accepting
    }

    fn state_count(&self) -> usize {
        self.core().graph().state_count()
    }

    fn transition_count(&self) -> usize {
        self.core().graph().transition_count()
    }

    fn iter_states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.core().graph().state_ids()
    }

    fn iter_accepting(&self) -> impl Iterator<Item = StateId> + '_ {
        self.iter_states().filter(move |id| self.is_accepting(*id))
    }

    /// All transitions in insertion order.
    fn iter_transitions(&self) -> impl Iterator<Item = (StateId, Symbol, StateId)> + '_ {
        self.core().graph().edges()
    }

    /// The destinations of `from` on `symbol` in insertion order.
    fn next_states(&self, from: StateId, symbol: impl Into<Symbol>) -> Vec<StateId> {
        self.core().graph().transitions(from, symbol.into())
    }

    fn has_transition(&self, from: StateId, symbol: impl Into<Symbol>) -> bool {
        self.core().graph().has_transition(from, symbol.into())
    }

    fn add_symbol_to_alphabet(&mut self, symbol: char) {
        self.core_mut().add_symbol(symbol);
    }

    fn clear_states(&mut self) {
        self.core_mut().clear_states();
    }

    fn clear_alphabet(&mut self) {
        self.core_mut().clear_alphabet();
    }

    /// Creates one state in `target` per state of `self`, keeping names and
    /// accepting flags. The hook runs once per pair of original and copy,
    /// right after the copy was created. The start state is not copied.
    fn copy_states_into<T: Automaton>(
        &self,
        target: &mut T,
        mut hook: impl FnMut(&mut T, StateId, StateId),
    ) -> StateMap {
        let mut state_map = StateMap::new(self.state_count());

        for original in self.iter_states() {
            let copy = target.core_mut().add_state(self.state(original).clone());
            state_map.insert(original, Some(copy));
            hook(target, original, copy);
        }

        state_map
    }

    /// Replays every transition of `self` in `target` through `state_map` and
    /// extends the target alphabet by the source alphabet.
    ///
    /// Transitions the target rejects are skipped, the target already logged
    /// why.
    fn copy_transitions_into<T: Automaton>(&self, target: &mut T, state_map: &StateMap) {
        for &symbol in self.alphabet() {
            target.add_symbol_to_alphabet(symbol);
        }

        for (from, symbol, to) in self.iter_transitions() {
            let (Some(from), Some(to)) = (state_map[from], state_map[to]) else {
                continue;
            };

            target.add_transition(from, symbol, to).ok();
        }
    }

    /// The DOT representation of this automaton.
    fn to_graphviz(&self) -> String {
        self.core().to_graphviz()
    }

    /// A human readable, multi-line description of every state.
    fn describe(&self) -> String {
        self.core().to_string()
    }

    fn save<W: Write>(&self, writer: W) -> Result<(), SerializationError> {
        BinarySerializer::serialize(self, writer)
    }

    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), SerializationError> {
        let file = File::create(path)?;
        self.save(BufWriter::new(file))
    }

    /// Replaces this automaton by the one read from `reader`. On error `self`
    /// is left untouched.
    fn load<R: Read>(&mut self, reader: R) -> Result<(), SerializationError> {
        *self = BinarySerializer::deserialize(reader)?;
        Ok(())
    }

    fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), SerializationError> {
        let file = File::open(path)?;
        self.load(BufReader::new(file))
    }
}
