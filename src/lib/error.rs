//! Error types of the automaton library.

use thiserror::Error;

/// Why a transition was not added to an automaton.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("epsilon transitions are not allowed in a DFA (from state {from:?})")]
    EpsilonInDfa { from: String },
    #[error("cannot add transition {from}--{symbol}-->{to}, {from} already has a transition on {symbol}")]
    Nondeterministic {
        from: String,
        symbol: char,
        to: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomatonError {
    #[error("automaton has no start state")]
    MissingStart,
}

/// Errors produced while compiling a regular expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegexError {
    #[error("empty regular expression")]
    Empty,
    #[error("unbalanced parenthesis at position {position}")]
    UnbalancedParenthesis { position: usize },
    #[error("operator '{operator}' is missing an operand")]
    MissingOperand { operator: char },
    #[error("{count} operands are left without an operator, concatenation must be written with '.'")]
    DanglingOperands { count: usize },
}

#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("state name is not valid utf-8: {0}")]
    InvalidName(#[from] std::string::FromUtf8Error),
    #[error("invalid symbol code point {0:#x}")]
    InvalidSymbol(u32),
    #[error("state index {index} out of range, automaton has {count} states")]
    InvalidStateIndex { index: u64, count: usize },
    #[error("symbol '@' (epsilon) cannot be part of the alphabet")]
    EpsilonInAlphabet,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to run renderer: {0}")]
    Io(#[from] std::io::Error),
    #[error("renderer `{command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
}
