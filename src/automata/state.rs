// src/automata/state.rs
//! State and symbol types shared by the NFA and DFA.

use std::collections::BTreeSet;

/// Dense state id, numbered from 0 within one automaton.
pub type StateId = u32;

/// Ordered so that a set can be used directly as a subset-construction key
/// and iterates deterministically.
pub type StateSet = BTreeSet<StateId>;

/// Input symbols are single characters.
pub type Symbol = char;

/// Reserved symbol labelling epsilon edges. Regex operands are ASCII letters,
/// so this never collides with a real input symbol.
pub const EPSILON: Symbol = '\0';

#[inline]
pub fn is_epsilon(symbol: Symbol) -> bool {
    symbol == EPSILON
}

/// Regex operands: single ASCII letters.
#[inline]
pub fn is_operand(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Blanks between tokens and inside definitions: the C `isspace` set
/// (space, `\t`, `\n`, `\v`, `\f`, `\r`).
#[inline]
pub fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}
