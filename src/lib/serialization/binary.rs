//! The binary automaton format.
//!
//! All integers are little endian, there is no padding:
//!
//! 1. alphabet size (`u64`), then one `u32` scalar value per symbol
//! 2. state count (`u64`), then per state the name as `u64` byte length
//!    followed by UTF-8 bytes, and the final flag as `u8` (0 or 1)
//! 3. start state index (`u64`, [NO_START] if there is none)
//! 4. transition count (`u64`), then per transition the source index
//!    (`u64`), the symbol (`u32`, `'@'` for epsilon) and the destination
//!    index (`u64`)

use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::{
    automaton::{Automaton, State},
    error::SerializationError,
    serialization::{AutomatonDocument, AutomatonSerializer, TransitionRecord},
};

/// Start index written for automata without a start state.
pub const NO_START: u64 = u64::MAX;

pub struct BinarySerializer;

impl AutomatonSerializer for BinarySerializer {
    fn serialize<A, W>(automaton: &A, mut writer: W) -> Result<(), SerializationError>
    where
        A: Automaton,
        W: Write,
    {
        let document = AutomatonDocument::from_automaton(automaton);
        write_document(&document, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    fn deserialize<A, R>(mut reader: R) -> Result<A, SerializationError>
    where
        A: Automaton,
        R: Read,
    {
        read_document(&mut reader)?.into_automaton()
    }
}

fn write_document<W: Write>(document: &AutomatonDocument, writer: &mut W) -> io::Result<()> {
    writer.write_u64::<LittleEndian>(document.alphabet.len() as u64)?;
    for &symbol in &document.alphabet {
        writer.write_u32::<LittleEndian>(symbol as u32)?;
    }

    writer.write_u64::<LittleEndian>(document.states.len() as u64)?;
    for state in &document.states {
        writer.write_u64::<LittleEndian>(state.name.len() as u64)?;
        writer.write_all(state.name.as_bytes())?;
        writer.write_u8(state.accepting as u8)?;
    }

    let start = document.start.map_or(NO_START, |index| index as u64);
    writer.write_u64::<LittleEndian>(start)?;

    writer.write_u64::<LittleEndian>(document.transitions.len() as u64)?;
    for transition in &document.transitions {
        writer.write_u64::<LittleEndian>(transition.from as u64)?;
        writer.write_u32::<LittleEndian>(transition.symbol as u32)?;
        writer.write_u64::<LittleEndian>(transition.to as u64)?;
    }

    Ok(())
}

fn read_symbol<R: Read>(reader: &mut R) -> Result<char, SerializationError> {
    let code = reader.read_u32::<LittleEndian>()?;
    char::from_u32(code).ok_or(SerializationError::InvalidSymbol(code))
}

fn read_name<R: Read>(reader: &mut R) -> Result<String, SerializationError> {
    let len = reader.read_u64::<LittleEndian>()?;

    // the length is untrusted, read what is there instead of allocating it
    let mut bytes: Vec<u8> = vec![];
    reader.by_ref().take(len).read_to_end(&mut bytes)?;
    if (bytes.len() as u64) < len {
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
    }

    Ok(String::from_utf8(bytes)?)
}

/// Reads a state index. Values that do not fit into `usize` are mapped to
/// `usize::MAX`, which is rejected as out of range later on.
fn read_index<R: Read>(reader: &mut R) -> io::Result<usize> {
    let index = reader.read_u64::<LittleEndian>()?;
    Ok(usize::try_from(index).unwrap_or(usize::MAX))
}

fn read_document<R: Read>(reader: &mut R) -> Result<AutomatonDocument, SerializationError> {
    let alphabet_len = reader.read_u64::<LittleEndian>()?;
    let mut alphabet = vec![];
    for _ in 0..alphabet_len {
        alphabet.push(read_symbol(reader)?);
    }

    let state_count = reader.read_u64::<LittleEndian>()?;
    let mut states = vec![];
    for _ in 0..state_count {
        let name = read_name(reader)?;
        let accepting = reader.read_u8()? != 0;
        states.push(State::new(name, accepting));
    }

    let start = match reader.read_u64::<LittleEndian>()? {
        NO_START => None,
        index => Some(usize::try_from(index).unwrap_or(usize::MAX)),
    };

    let transition_count = reader.read_u64::<LittleEndian>()?;
    let mut transitions = vec![];
    for _ in 0..transition_count {
        let from = read_index(reader)?;
        let symbol = read_symbol(reader)?;
        let to = read_index(reader)?;
        transitions.push(TransitionRecord { from, symbol, to });
    }

    Ok(AutomatonDocument {
        alphabet,
        states,
        start,
        transitions,
    })
}
