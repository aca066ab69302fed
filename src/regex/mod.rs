// src/regex/mod.rs
//! Regex text -> postfix -> NFA -> DFA.

pub mod postfix;
pub mod thompson;

pub use postfix::{Postfix, PostfixItem, PostfixToken, RegexOp, to_postfix};
pub use thompson::postfix_to_nfa;

use crate::{
    automata::{Dfa, Nfa},
    error::RegexError,
};

/// Parse and build the Thompson NFA for `regex`.
pub fn compile_nfa(regex: &str) -> Result<Nfa, RegexError> {
    let postfix = to_postfix(regex)?;
    log::debug!("[regex] {regex:?} -> postfix {postfix}");
    let nfa = postfix_to_nfa(&postfix)?;
    log::debug!(
        "[regex] {regex:?} -> NFA with {} states, {} edges",
        nfa.num_states(),
        nfa.transitions().len()
    );
    Ok(nfa)
}

/// Full pipeline: regex -> DFA.
pub fn compile(regex: &str) -> Result<Dfa, RegexError> {
    Ok(compile_nfa(regex)?.to_dfa())
}
