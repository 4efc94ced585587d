use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The character reserved for epsilon moves, in regular expressions, in the
/// persisted format and in rendered graphs.
pub const EPSILON: char = '@';

/// The label of a transition. Either a single character or an epsilon move
/// that is taken without consuming input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Symbol {
    Letter(char),
    Epsilon,
}

impl Symbol {
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    /// The consumed character, [None] for epsilon moves.
    pub fn letter(&self) -> Option<char> {
        match self {
            Symbol::Letter(c) => Some(*c),
            Symbol::Epsilon => None,
        }
    }

    /// The character representation, epsilon is written as [EPSILON].
    pub fn as_char(&self) -> char {
        match self {
            Symbol::Letter(c) => *c,
            Symbol::Epsilon => EPSILON,
        }
    }
}

impl From<char> for Symbol {
    fn from(value: char) -> Self {
        if value == EPSILON {
            Symbol::Epsilon
        } else {
            Symbol::Letter(value)
        }
    }
}

impl From<Option<char>> for Symbol {
    fn from(value: Option<char>) -> Self {
        match value {
            Some(c) => Symbol::from(c),
            None => Symbol::Epsilon,
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_character_is_epsilon() {
        assert_eq!(Symbol::from('@'), Symbol::Epsilon);
        assert_eq!(Symbol::from(None), Symbol::Epsilon);
        assert_eq!(Symbol::from('a'), Symbol::Letter('a'));
        assert_eq!(Symbol::Epsilon.as_char(), EPSILON);
        assert_eq!(Symbol::Letter('x').letter(), Some('x'));
        assert_eq!(Symbol::Epsilon.letter(), None);
    }
}
