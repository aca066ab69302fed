// src/lexer/scanner.rs
// Multi-pattern longest-match scanner over compiled pattern DFAs.

use rayon::prelude::*;

use crate::{
    automata::{Dfa, DfaStatus, StoredPattern, is_space},
    error::LexerError,
    lexer::{
        defs::{TokenDef, parse_definitions},
        tokens::Token,
    },
    regex::compile,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub name: String,
    pub regex: String,
    pub dfa: Dfa,
}

/// Patterns in declaration order. Earlier patterns win equal-length ties.
#[derive(Debug, Clone, Default)]
pub struct PatternTable {
    patterns: Vec<Pattern>,
}

impl PatternTable {
    /// Compile every definition.
    ///
    /// A malformed regex fails with the first offending pattern in declaration
    /// order. Otherwise, if any pattern accepts the empty string, all such
    /// patterns are reported together and none of the table is kept.
    pub fn compile(defs: &[TokenDef]) -> Result<Self, LexerError> {
        // patterns are independent; collect() keeps declaration order
        let compiled: Vec<_> = defs.par_iter().map(|d| compile(&d.regex)).collect();

        let patterns = defs
            .iter()
            .zip(compiled)
            .map(|(def, dfa)| -> Result<Pattern, LexerError> {
                let dfa = dfa.map_err(|source| LexerError::Syntax {
                    name: def.name.clone(),
                    source,
                })?;
                log::debug!(
                    "[lexer] pattern {} = {:?}: {} DFA states",
                    def.name,
                    def.regex,
                    dfa.num_states()
                );
                Ok(Pattern {
                    name: def.name.clone(),
                    regex: def.regex.clone(),
                    dfa,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_patterns(patterns)
    }

    /// Compile a whole definition line.
    pub fn parse(line: &str) -> Result<Self, LexerError> {
        Self::compile(&parse_definitions(line))
    }

    /// Build from already compiled DFAs (e.g. loaded tables), applying the
    /// same empty-string check as [`PatternTable::compile`].
    pub fn from_patterns(patterns: Vec<Pattern>) -> Result<Self, LexerError> {
        let names: Vec<String> = patterns
            .iter()
            .filter(|p| p.dfa.accepts_empty())
            .map(|p| p.name.clone())
            .collect();
        if !names.is_empty() {
            log::warn!("[lexer] patterns accepting the empty string: {names:?}");
            return Err(LexerError::AcceptsEmpty { names });
        }
        Ok(Self { patterns })
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn to_stored(&self) -> Vec<StoredPattern> {
        self.patterns
            .iter()
            .map(|p| StoredPattern {
                name: p.name.clone(),
                regex: p.regex.clone(),
                dfa: p.dfa.clone(),
            })
            .collect()
    }

    pub fn from_stored(stored: Vec<StoredPattern>) -> Result<Self, LexerError> {
        Self::from_patterns(
            stored
                .into_iter()
                .map(|s| Pattern {
                    name: s.name,
                    regex: s.regex,
                    dfa: s.dfa,
                })
                .collect(),
        )
    }
}

/// Feed `input` to a fresh run of `dfa` until it fails. Returns the byte length
/// of the longest accepted prefix and its lexeme, or `None` if no non-empty
/// prefix was accepted.
pub fn longest_match(dfa: &Dfa, input: &str) -> Option<(usize, String)> {
    let mut run = dfa.start();
    let mut accepted_len = 0;

    for (i, c) in input.char_indices() {
        match run.step(c) {
            DfaStatus::Fail => break,
            DfaStatus::Accept => accepted_len = i + c.len_utf8(),
            DfaStatus::Potential | DfaStatus::Start => {}
        }
    }

    (accepted_len > 0).then(|| (accepted_len, run.accepted_lexeme().to_string()))
}

/// Scans one input string. Only the position changes between calls.
#[derive(Debug, Clone)]
pub struct Lexer {
    table: PatternTable,
    input: String,
    pos: usize,
}

impl Lexer {
    pub fn new(table: PatternTable, input: impl Into<String>) -> Self {
        Self {
            table,
            input: input.into(),
            pos: 0,
        }
    }

    /// Compile `definitions` (one definition line) and scan `input`.
    pub fn from_definitions(definitions: &str, input: impl Into<String>) -> Result<Self, LexerError> {
        Ok(Self::new(PatternTable::parse(definitions)?, input))
    }

    /// Byte offset of the next unread character.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Next token, or the EOS sentinel once only whitespace remains.
    pub fn next_token(&mut self) -> Token {
        let rest = self.input[self.pos..].trim_start_matches(is_space);
        self.pos = self.input.len() - rest.len();
        let Some(first) = rest.chars().next() else {
            return Token::eos(self.pos);
        };

        let mut best: Option<(&Pattern, usize, String)> = None;
        for pattern in &self.table.patterns {
            let Some((len, lexeme)) = longest_match(&pattern.dfa, rest) else {
                continue;
            };
            // strict > keeps the earlier pattern on ties
            if best.as_ref().is_none_or(|(_, best_len, _)| len > *best_len) {
                best = Some((pattern, len, lexeme));
            }
        }

        let start = self.pos;
        match best {
            Some((pattern, len, lexeme)) => {
                self.pos += len;
                Token::pattern(pattern.name.as_str(), lexeme, start)
            }
            None => {
                self.pos += first.len_utf8();
                log::debug!("[lexer] no pattern matches {first:?} at {start}");
                Token::invalid(first, start)
            }
        }
    }

    /// All remaining tokens, sentinel excluded.
    pub fn tokenize(&mut self) -> Vec<Token> {
        self.by_ref().collect()
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let tok = self.next_token();
        (!tok.is_eos()).then_some(tok)
    }
}
