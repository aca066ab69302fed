// src/lexer/tokens.rs
use std::fmt;

/// Name of the end-of-stream sentinel. Never printed.
pub const EOS: &str = "EOS";
/// Name of the single-character token emitted where no pattern matches.
pub const INVALID: &str = "INVALID";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Matched the named pattern.
    Pattern(String),
    Invalid,
    Eos,
}

impl TokenKind {
    pub fn name(&self) -> &str {
        match self {
            TokenKind::Pattern(name) => name,
            TokenKind::Invalid => INVALID,
            TokenKind::Eos => EOS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    /// Byte offset of the lexeme in the scanned input.
    pub start: usize,
}

impl Token {
    pub fn pattern(name: impl Into<String>, lexeme: impl Into<String>, start: usize) -> Self {
        Self {
            kind: TokenKind::Pattern(name.into()),
            lexeme: lexeme.into(),
            start,
        }
    }

    pub fn invalid(c: char, start: usize) -> Self {
        Self {
            kind: TokenKind::Invalid,
            lexeme: c.to_string(),
            start,
        }
    }

    pub fn eos(start: usize) -> Self {
        Self {
            kind: TokenKind::Eos,
            lexeme: String::new(),
            start,
        }
    }

    pub fn name(&self) -> &str {
        self.kind.name()
    }

    pub fn is_eos(&self) -> bool {
        self.kind == TokenKind::Eos
    }
}

/// `<name> , "<lexeme>"`
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} , \"{}\"", self.name(), self.lexeme)
    }
}
