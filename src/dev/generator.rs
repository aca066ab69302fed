// src/dev/generator.rs
// Random regexes and inputs over a small alphabet, shared by fuzz_lex and the
// randomized tests.

use rand::Rng;

pub const ALPHABET: &[char] = &['a', 'b', 'c'];

fn pick_symbol<R: Rng>(rng: &mut R) -> char {
    ALPHABET[rng.random_range(0..ALPHABET.len())]
}

/// A well-formed infix regex with explicit concatenation, nested at most
/// `depth` levels.
pub fn gen_regex<R: Rng>(rng: &mut R, depth: u32) -> String {
    if depth == 0 {
        return pick_symbol(rng).to_string();
    }
    match rng.random_range(0u32..100) {
        0..=29 => pick_symbol(rng).to_string(),
        30..=54 => format!(
            "{}.{}",
            gen_operand(rng, depth - 1),
            gen_operand(rng, depth - 1)
        ),
        55..=79 => format!(
            "{}|{}",
            gen_operand(rng, depth - 1),
            gen_operand(rng, depth - 1)
        ),
        80..=99 => format!("{}*", gen_atom(rng, depth - 1)),
        _ => unreachable!(),
    }
}

// parenthesize compound sub-expressions so the generated text means what the
// tree says regardless of precedence
fn gen_operand<R: Rng>(rng: &mut R, depth: u32) -> String {
    let inner = gen_regex(rng, depth);
    if inner.len() == 1 {
        inner
    } else {
        format!("({inner})")
    }
}

fn gen_atom<R: Rng>(rng: &mut R, depth: u32) -> String {
    let inner = gen_regex(rng, depth);
    if inner.len() == 1 || (inner.ends_with('*') && !inner.contains(['.', '|'])) {
        inner
    } else {
        format!("({inner})")
    }
}

/// A string of `0..=max_len` symbols from [`ALPHABET`].
pub fn gen_input<R: Rng>(rng: &mut R, max_len: usize) -> String {
    let len = rng.random_range(0..=max_len);
    (0..len).map(|_| pick_symbol(rng)).collect()
}

/// Every string over [`ALPHABET`] of length `0..=max_len`, shortest first.
pub fn all_inputs(max_len: usize) -> Vec<String> {
    let mut out = vec![String::new()];
    let mut frontier = vec![String::new()];
    for _ in 0..max_len {
        let mut next = Vec::with_capacity(frontier.len() * ALPHABET.len());
        for s in &frontier {
            for &c in ALPHABET {
                let mut t = s.clone();
                t.push(c);
                next.push(t);
            }
        }
        out.extend(next.iter().cloned());
        frontier = next;
    }
    out
}
