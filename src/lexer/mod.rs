// src/lexer/mod.rs
pub mod defs;
pub mod scanner;
pub mod tokens;

pub use defs::{TokenDef, parse_definitions, strip_quotes};
pub use scanner::{Lexer, Pattern, PatternTable, longest_match};
pub use tokens::{EOS, INVALID, Token, TokenKind};
