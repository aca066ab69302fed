// src/error.rs
//! Error types for regex compilation, DFA tables and lexer construction.

use thiserror::Error;

use crate::automata::StateId;

/// Malformed regex text. Positions are 0-based character offsets into the
/// regex as written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegexError {
    #[error("unmatched '(' at position {pos}")]
    UnmatchedOpen { pos: usize },

    #[error("unmatched ')' at position {pos}")]
    UnmatchedClose { pos: usize },

    #[error("unexpected character {ch:?} at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("operator '{op}' at position {pos} is missing an operand")]
    MissingOperand { op: char, pos: usize },

    #[error("missing operator before position {pos} (concatenation must be written as '.')")]
    MissingOperator { pos: usize },

    #[error("empty group at position {pos}")]
    EmptyGroup { pos: usize },
}

impl RegexError {
    /// Position of the offending character.
    pub fn pos(&self) -> usize {
        match *self {
            RegexError::UnmatchedOpen { pos }
            | RegexError::UnmatchedClose { pos }
            | RegexError::UnexpectedChar { pos, .. }
            | RegexError::MissingOperand { pos, .. }
            | RegexError::MissingOperator { pos }
            | RegexError::EmptyGroup { pos } => pos,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DfaError {
    #[error(
        "conflicting transition from state {state} on {symbol:?}: already goes to {existing}, refusing {requested}"
    )]
    ConflictingTransition {
        state: StateId,
        symbol: char,
        existing: StateId,
        requested: StateId,
    },

    #[error("state {state} is out of range (automaton has {num_states} states)")]
    StateOutOfRange { state: StateId, num_states: StateId },
}

/// Failure to build a lexer from token definitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexerError {
    #[error("syntax error in token {name}: {source}")]
    Syntax {
        name: String,
        #[source]
        source: RegexError,
    },

    /// Every pattern whose language contains the empty string, in
    /// declaration order.
    #[error("EPSILON IS NOT A TOKEN {}", .names.join(" "))]
    AcceptsEmpty { names: Vec<String> },
}
