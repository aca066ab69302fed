// src/regex/thompson.rs
//! Thompson construction: postfix tokens -> epsilon-NFA.

use super::postfix::{Postfix, PostfixToken, RegexOp};
use crate::{automata::Nfa, error::RegexError};

/// A fragment on the work stack, with the leftmost source position it covers
/// so leftover fragments can be reported where they start.
struct Fragment {
    nfa: Nfa,
    pos: usize,
}

/// Evaluate `postfix` on a stack of fragments.
///
/// Each fragment keeps exactly one initial and one final state. An empty
/// postfix yields the one-state automaton for the empty string.
pub fn postfix_to_nfa(postfix: &Postfix) -> Result<Nfa, RegexError> {
    let mut stack: Vec<Fragment> = Vec::new();

    for item in postfix.items() {
        match item.token {
            PostfixToken::Literal(c) => stack.push(Fragment {
                nfa: Nfa::literal(c),
                pos: item.pos,
            }),
            PostfixToken::Op(RegexOp::Star) => {
                let x = stack.last_mut().ok_or(RegexError::MissingOperand {
                    op: '*',
                    pos: item.pos,
                })?;
                x.nfa.kleene();
            }
            PostfixToken::Op(op) => {
                let missing = RegexError::MissingOperand {
                    op: op.as_char(),
                    pos: item.pos,
                };
                // right operand is on top
                let b = stack.pop().ok_or(missing.clone())?;
                let a = stack.last_mut().ok_or(missing)?;
                match op {
                    RegexOp::Concat => a.nfa.concat(&b.nfa),
                    RegexOp::Union => a.nfa.union(&b.nfa),
                    RegexOp::Star => unreachable!("handled above"),
                }
                a.pos = a.pos.min(b.pos);
            }
        }
    }

    match stack.len() {
        0 => Ok(Nfa::empty_string()),
        1 => Ok(stack.remove(0).nfa),
        _ => Err(RegexError::MissingOperator { pos: stack[1].pos }),
    }
}
