use serde::{Deserialize, Serialize};

/// A state of an automaton.
/// It carries a display name and a boolean flag indicating whether the state
/// is accepting. Names are only meant for humans, they do not have to be
/// unique and no algorithm relies on them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State {
    pub name: String,
    pub accepting: bool,
}

impl State {
    pub fn new(name: impl Into<String>, accepting: bool) -> Self {
        State {
            name: name.into(),
            accepting,
        }
    }

    pub fn accepting(name: impl Into<String>) -> Self {
        State::new(name, true)
    }

    pub fn non_accepting(name: impl Into<String>) -> Self {
        State::new(name, false)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn invert(&self) -> Self {
        State::new(self.name.clone(), !self.accepting)
    }

    pub fn invert_mut(&mut self) {
        self.accepting = !self.accepting;
    }

    pub fn push_suffix(&mut self, suffix: &str) {
        self.name.push_str(suffix);
    }

    /// The state of a product automaton pairing `self` with `other`.
    /// It is accepting iff both components are accepting.
    pub fn join(&self, other: &State) -> State {
        State::new(
            format!("{}_{}", self.name, other.name),
            self.accepting && other.accepting,
        )
    }
}
