//! Persistence of automata.
//!
//! Two formats are supported: a compact little endian binary format, used by
//! [Automaton::save](crate::automaton::Automaton::save) and friends, and a
//! JSON document that is easy to inspect and edit by hand. Both carry the
//! same information, see [AutomatonDocument].
//!
//! # Example
//!
//! ```
//! use finite_automata::automaton::{Automaton, Language, dfa::DFA};
//! use finite_automata::serialization::{AutomatonSerializer, JsonSerializer};
//!
//! let mut dfa = DFA::new();
//! let q0 = dfa.add_state("q0", true);
//! dfa.set_start(Some(q0));
//! dfa.add_transition(q0, 'a', q0).unwrap();
//!
//! let mut buffer: Vec<u8> = vec![];
//! JsonSerializer::serialize(&dfa, &mut buffer).unwrap();
//!
//! let loaded: DFA = JsonSerializer::deserialize(buffer.as_slice()).unwrap();
//! assert!(loaded.accepts("aaa"));
//! ```

use std::io::{Read, Write};

use crate::{automaton::Automaton, error::SerializationError};

pub mod binary;
mod document;
mod json;

pub use self::{
    binary::BinarySerializer,
    document::{AutomatonDocument, TransitionRecord},
    json::JsonSerializer,
};

/// A format automata can be written to and read from.
pub trait AutomatonSerializer {
    /// Writes `automaton` to `writer`.
    fn serialize<A, W>(automaton: &A, writer: W) -> Result<(), SerializationError>
    where
        A: Automaton,
        W: Write;

    /// Reads a fresh automaton from `reader`.
    ///
    /// Transitions the automaton type rejects (e.g. epsilon transitions when
    /// reading into a DFA) are skipped with a warning.
    fn deserialize<A, R>(reader: R) -> Result<A, SerializationError>
    where
        A: Automaton,
        R: Read;
}
