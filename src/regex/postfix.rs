// src/regex/postfix.rs
//! Infix regex -> postfix, by operator-precedence shunting.
//!
//! Grammar: ASCII letters as operands, `|` (alternation), `.` (explicit
//! concatenation), postfix `*`, and parentheses. Spaces and tabs are skipped.

use std::{fmt, str::FromStr};

use crate::{
    automata::state::{is_operand, is_space},
    error::RegexError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegexOp {
    Star,
    Concat,
    Union,
}

impl RegexOp {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '*' => Some(RegexOp::Star),
            '.' => Some(RegexOp::Concat),
            '|' => Some(RegexOp::Union),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            RegexOp::Star => '*',
            RegexOp::Concat => '.',
            RegexOp::Union => '|',
        }
    }

    /// Higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            RegexOp::Star => 3,
            RegexOp::Concat => 2,
            RegexOp::Union => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostfixToken {
    Literal(char),
    Op(RegexOp),
}

/// A postfix token and the position it came from in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostfixItem {
    pub token: PostfixToken,
    pub pos: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Postfix {
    items: Vec<PostfixItem>,
}

impl Postfix {
    pub fn items(&self) -> &[PostfixItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            let c = match item.token {
                PostfixToken::Literal(c) => c,
                PostfixToken::Op(op) => op.as_char(),
            };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// Reads text that is already in postfix order (e.g. `ab.c|`). Only the
/// characters are checked here; arity is checked when building the NFA.
impl FromStr for Postfix {
    type Err = RegexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut items = Vec::with_capacity(s.len());
        for (pos, c) in s.chars().enumerate() {
            if is_space(c) {
                continue;
            }
            let token = if is_operand(c) {
                PostfixToken::Literal(c)
            } else if let Some(op) = RegexOp::from_char(c) {
                PostfixToken::Op(op)
            } else {
                return Err(RegexError::UnexpectedChar { ch: c, pos });
            };
            items.push(PostfixItem { token, pos });
        }
        Ok(Postfix { items })
    }
}

enum Pending {
    Open(usize),
    Op(RegexOp, usize),
}

/// Convert an infix regex to postfix.
///
/// Besides reordering, this validates the expression: every operator needs
/// its operands, parentheses must balance and groups must be non-empty.
/// Juxtaposition is not concatenation; `ab` is an error, `a.b` is not.
pub fn to_postfix(infix: &str) -> Result<Postfix, RegexError> {
    let mut out: Vec<PostfixItem> = Vec::with_capacity(infix.len());
    let mut ops: Vec<Pending> = Vec::new();

    // true at the start, after '(' and after a binary operator
    let mut expect_operand = true;
    // binary operator still waiting for its right operand
    let mut dangling: Option<(RegexOp, usize)> = None;
    // position of a '(' that nothing has followed yet
    let mut just_opened: Option<usize> = None;

    for (pos, c) in infix.chars().enumerate() {
        if is_space(c) {
            continue;
        }
        let opened = just_opened.take();

        if is_operand(c) {
            if !expect_operand {
                return Err(RegexError::MissingOperator { pos });
            }
            out.push(PostfixItem {
                token: PostfixToken::Literal(c),
                pos,
            });
            expect_operand = false;
            dangling = None;
            continue;
        }

        match c {
            '(' => {
                if !expect_operand {
                    return Err(RegexError::MissingOperator { pos });
                }
                ops.push(Pending::Open(pos));
                just_opened = Some(pos);
            }
            ')' => {
                if let Some(open) = opened {
                    return Err(RegexError::EmptyGroup { pos: open });
                }
                if let Some((op, op_pos)) = dangling {
                    return Err(RegexError::MissingOperand {
                        op: op.as_char(),
                        pos: op_pos,
                    });
                }
                loop {
                    match ops.pop() {
                        Some(Pending::Open(_)) => break,
                        Some(Pending::Op(op, op_pos)) => out.push(PostfixItem {
                            token: PostfixToken::Op(op),
                            pos: op_pos,
                        }),
                        None => return Err(RegexError::UnmatchedClose { pos }),
                    }
                }
                expect_operand = false;
            }
            _ => {
                let Some(op) = RegexOp::from_char(c) else {
                    return Err(RegexError::UnexpectedChar { ch: c, pos });
                };
                if expect_operand {
                    return Err(RegexError::MissingOperand { op: c, pos });
                }
                if op == RegexOp::Star {
                    ops.push(Pending::Op(op, pos));
                    continue;
                }
                while let Some(Pending::Op(top, top_pos)) = ops.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    out.push(PostfixItem {
                        token: PostfixToken::Op(*top),
                        pos: *top_pos,
                    });
                    ops.pop();
                }
                ops.push(Pending::Op(op, pos));
                expect_operand = true;
                dangling = Some((op, pos));
            }
        }
    }

    if let Some((op, pos)) = dangling {
        return Err(RegexError::MissingOperand {
            op: op.as_char(),
            pos,
        });
    }
    // report the outermost unclosed group
    if let Some(pos) = ops.iter().find_map(|p| match p {
        Pending::Open(pos) => Some(*pos),
        Pending::Op(..) => None,
    }) {
        return Err(RegexError::UnmatchedOpen { pos });
    }
    while let Some(p) = ops.pop() {
        if let Pending::Op(op, pos) = p {
            out.push(PostfixItem {
                token: PostfixToken::Op(op),
                pos,
            });
        }
    }

    Ok(Postfix { items: out })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pf(s: &str) -> String {
        to_postfix(s).unwrap().to_string()
    }

    #[test]
    fn precedence_and_associativity() {
        assert_eq!(pf("a"), "a");
        assert_eq!(pf("a|b"), "ab|");
        assert_eq!(pf("a.b"), "ab.");
        assert_eq!(pf("a.b|c"), "ab.c|");
        assert_eq!(pf("a|b.c"), "abc.|");
        assert_eq!(pf("a.b*"), "ab*.");
        assert_eq!(pf("a*.b"), "a*b.");
        assert_eq!(pf("a|b|c"), "ab|c|");
        assert_eq!(pf("a.b.c"), "ab.c.");
        assert_eq!(pf("a**"), "a**");
    }

    #[test]
    fn groups() {
        assert_eq!(pf("(a|b)*"), "ab|*");
        assert_eq!(pf("(a|b)*.c*.c"), "ab|*c*.c.");
        assert_eq!(pf("a.(b|c)"), "abc|.");
        assert_eq!(pf("((a))"), "a");
    }

    #[test]
    fn blanks_are_skipped_and_positions_kept() {
        let p = to_postfix("a | b").unwrap();
        assert_eq!(p.to_string(), "ab|");
        let positions: Vec<_> = p.items().iter().map(|i| i.pos).collect();
        assert_eq!(positions, vec![0, 4, 2]);
    }

    #[test]
    fn empty_regex_is_empty_postfix() {
        assert!(to_postfix("").unwrap().is_empty());
        assert!(to_postfix(" \t").unwrap().is_empty());
    }

    #[test]
    fn unbalanced_parentheses() {
        assert_eq!(to_postfix("(a|b"), Err(RegexError::UnmatchedOpen { pos: 0 }));
        assert_eq!(
            to_postfix("a.((b)"),
            Err(RegexError::UnmatchedOpen { pos: 2 })
        );
        assert_eq!(to_postfix("a|b)"), Err(RegexError::UnmatchedClose { pos: 3 }));
        assert_eq!(to_postfix(")"), Err(RegexError::UnmatchedClose { pos: 0 }));
    }

    #[test]
    fn unknown_characters() {
        assert_eq!(
            to_postfix("a+b"),
            Err(RegexError::UnexpectedChar { ch: '+', pos: 1 })
        );
        assert_eq!(
            to_postfix("a.1"),
            Err(RegexError::UnexpectedChar { ch: '1', pos: 2 })
        );
    }

    #[test]
    fn missing_operands() {
        assert_eq!(
            to_postfix("|a"),
            Err(RegexError::MissingOperand { op: '|', pos: 0 })
        );
        assert_eq!(
            to_postfix("a|"),
            Err(RegexError::MissingOperand { op: '|', pos: 1 })
        );
        assert_eq!(
            to_postfix("a.|b"),
            Err(RegexError::MissingOperand { op: '|', pos: 2 })
        );
        assert_eq!(
            to_postfix("*a"),
            Err(RegexError::MissingOperand { op: '*', pos: 0 })
        );
        assert_eq!(
            to_postfix("(a.)"),
            Err(RegexError::MissingOperand { op: '.', pos: 2 })
        );
    }

    #[test]
    fn juxtaposition_needs_an_operator() {
        assert_eq!(to_postfix("ab"), Err(RegexError::MissingOperator { pos: 1 }));
        assert_eq!(to_postfix("a(b)"), Err(RegexError::MissingOperator { pos: 1 }));
        assert_eq!(to_postfix("a*b"), Err(RegexError::MissingOperator { pos: 2 }));
    }

    #[test]
    fn empty_group() {
        assert_eq!(to_postfix("a.()"), Err(RegexError::EmptyGroup { pos: 2 }));
    }

    #[test]
    fn postfix_text_parses_back() {
        let p: Postfix = "ab|*c.".parse().unwrap();
        assert_eq!(p.to_string(), "ab|*c.");
        assert_eq!(p.len(), 6);
        assert_eq!(
            "ab#".parse::<Postfix>(),
            Err(RegexError::UnexpectedChar { ch: '#', pos: 2 })
        );
    }
}
