use std::io::{Read, Write};

use crate::{
    automaton::Automaton,
    error::SerializationError,
    serialization::{AutomatonDocument, AutomatonSerializer},
};

/// Human readable JSON format, one [AutomatonDocument] per file.
pub struct JsonSerializer;

impl AutomatonSerializer for JsonSerializer {
    fn serialize<A, W>(automaton: &A, mut writer: W) -> Result<(), SerializationError>
    where
        A: Automaton,
        W: Write,
    {
        let document = AutomatonDocument::from_automaton(automaton);
        serde_json::to_writer_pretty(&mut writer, &document)?;
        writer.flush()?;
        Ok(())
    }

    fn deserialize<A, R>(reader: R) -> Result<A, SerializationError>
    where
        A: Automaton,
        R: Read,
    {
        let document: AutomatonDocument = serde_json::from_reader(reader)?;
        document.into_automaton()
    }
}
