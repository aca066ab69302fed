// src/bin/fuzz_lex.rs
// Generate random regexes and inputs, compare the compiled DFA against direct
// NFA simulation.
// Env:
//   FUZZ_SEED=<u64>      rng seed (default 42)
//   FUZZ_ITERS=<n>       number of regexes (default 2000)
//   FUZZ_DEPTH=<n>       max regex nesting (default 4)
//   FUZZ_MAX_LEN=<n>     max input length (default 10)
//   FUZZ_DIR=<dir>       where failing cases are saved (default "fuzz-cases")

use std::{fs, path::Path, process, time::Instant};

use munchlex::{
    automata::{Dfa, Nfa},
    dev::generator::{gen_input, gen_regex},
    logging,
    regex::compile_nfa,
};
use rand::{SeedableRng, rngs::StdRng};

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(default)
}

fn save_case(dir: &str, seed: u64, iter: usize, regex: &str, input: &str, why: &str) -> String {
    let _ = fs::create_dir_all(dir);
    let path = Path::new(dir).join(format!("case_seed{seed}_iter{iter}.json"));
    let meta = serde_json::json!({
        "seed": seed,
        "iter": iter,
        "regex": regex,
        "input": input,
        "why": why,
    });
    match serde_json::to_string_pretty(&meta) {
        Ok(s) => {
            fs::write(&path, s).ok();
        }
        Err(e) => eprintln!("[fuzz] could not encode case: {e}"),
    }
    path.display().to_string()
}

/// Returns a description of the first disagreement, if any.
fn check_one(nfa: &Nfa, dfa: &Dfa, input: &str) -> Option<String> {
    let want = nfa.accepts(input);
    let got = dfa.accepts(input);
    if want != got {
        return Some(format!("NFA says {want}, DFA says {got}"));
    }
    if got && !input.is_empty() {
        let mut run = dfa.start();
        if !run.run(input) || run.accepted_lexeme() != input {
            return Some(format!(
                "accepted but run captured {:?}",
                run.accepted_lexeme()
            ));
        }
    }
    None
}

fn main() {
    logging::init();
    let seed = env_u64("FUZZ_SEED", 42);
    let iters = env_usize("FUZZ_ITERS", 2000);
    let depth = env_u64("FUZZ_DEPTH", 4) as u32;
    let max_len = env_usize("FUZZ_MAX_LEN", 10);
    let dir = std::env::var("FUZZ_DIR").unwrap_or_else(|_| "fuzz-cases".to_string());

    let mut rng = StdRng::seed_from_u64(seed);
    let t0 = Instant::now();
    let mut checked = 0usize;
    let mut failures = 0usize;

    for iter in 0..iters {
        let regex = gen_regex(&mut rng, depth);
        let nfa = match compile_nfa(&regex) {
            Ok(n) => n,
            Err(e) => {
                eprintln!("[fuzz] generator produced bad regex {regex:?}: {e}");
                failures += 1;
                continue;
            }
        };
        let dfa = nfa.to_dfa();

        let again = compile_nfa(&regex).map(|n| n.to_dfa());
        if again.as_ref() != Ok(&dfa) {
            let saved = save_case(&dir, seed, iter, &regex, "", "non-deterministic DFA");
            eprintln!("❌ [{iter}] {regex:?}: rebuilding gave a different DFA\n  saved: {saved}");
            failures += 1;
            continue;
        }

        if dfa.accepts_empty() != nfa.accepts("") {
            let saved = save_case(&dir, seed, iter, &regex, "", "accepts_empty mismatch");
            eprintln!("❌ [{iter}] {regex:?}: accepts_empty disagrees\n  saved: {saved}");
            failures += 1;
            continue;
        }

        for _ in 0..32 {
            let input = gen_input(&mut rng, max_len);
            checked += 1;
            if let Some(why) = check_one(&nfa, &dfa, &input) {
                let saved = save_case(&dir, seed, iter, &regex, &input, &why);
                eprintln!("❌ [{iter}] {regex:?} on {input:?}: {why}\n  saved: {saved}");
                failures += 1;
                break;
            }
        }
    }

    println!(
        "[fuzz] seed={seed} regexes={iters} inputs={checked} failures={failures} in {} ms",
        t0.elapsed().as_millis()
    );
    if failures > 0 {
        process::exit(1);
    }
}
