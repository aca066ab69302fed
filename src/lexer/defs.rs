// src/lexer/defs.rs
//! The one-line token definition format:
//!
//! ```text
//! name1 regex1 , name2 regex2 , ... , nameK regexK #
//! ```

use crate::automata::is_space;

/// A named pattern as written by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDef {
    pub name: String,
    pub regex: String,
}

impl TokenDef {
    pub fn new(name: impl Into<String>, regex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            regex: regex.into(),
        }
    }
}

const END_MARK: char = '#';


/// Split a definition line into `(name, regex)` pairs, in order.
///
/// Segments are comma separated and trimmed. The first word is the name and
/// the rest of the segment is the regex. A lone `#` segment (or a `#` ending
/// the last segment) stops the list; empty segments are skipped. A name with
/// no regex gets the empty regex, which later fails as an empty-string token.
pub fn parse_definitions(line: &str) -> Vec<TokenDef> {
    let mut defs = Vec::new();

    for segment in line.split(',') {
        let mut seg = segment.trim_matches(is_space);
        if seg.is_empty() {
            continue;
        }
        if seg == "#" {
            break;
        }
        let last = seg.ends_with(END_MARK);
        if last {
            seg = seg[..seg.len() - END_MARK.len_utf8()].trim_end_matches(is_space);
        }

        let (name, regex) = match seg.find(is_space) {
            Some(i) => (&seg[..i], seg[i..].trim_start_matches(is_space)),
            None => (seg, ""),
        };
        defs.push(TokenDef::new(name, regex));
        if last {
            break;
        }
    }

    if defs.is_empty() {
        log::warn!("[defs] no token definitions found in {line:?}");
    }
    defs
}

/// Drop one pair of surrounding double quotes, if both are present.
pub fn strip_quotes(line: &str) -> &str {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.len() >= 2 && line.starts_with('"') && line.ends_with('"') {
        &line[1..line.len() - 1]
    } else {
        line
    }
}
