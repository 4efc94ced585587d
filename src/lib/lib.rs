pub mod automaton;
pub mod config;
pub mod error;
pub mod logger;
pub mod regex;
pub mod render;
pub mod serialization;
pub mod validation;
