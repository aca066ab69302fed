// src/lib.rs
//! Regex token definitions compiled to DFAs (shunting-yard postfix, Thompson
//! NFA, subset construction) and a longest-match lexer on top of them.

pub mod automata;
pub mod dev;
pub mod error;
pub mod lexer;
pub mod logging;
pub mod regex;

pub use error::{DfaError, LexerError, RegexError};
