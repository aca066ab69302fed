// src/bin/gen_tables.rs
// Compile a token-definition line and write every pattern's DFA to JSON.
// Usage:
//   cargo run --bin gen_tables -- defs.txt                 # writes tables/lexer_tables.json
//   cargo run --bin gen_tables -- defs.txt /path/out.json
//   cargo run --bin gen_tables -- --check /path/out.json   # load and validate

use std::{env, fs, path::Path};

use anyhow::{Context, Result, anyhow, bail};
use munchlex::{
    automata::{load_tables_json_bytes, save_tables_json},
    lexer::PatternTable,
    logging,
};

fn check(path: &Path) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let stored = load_tables_json_bytes(&bytes).map_err(|e| anyhow!(e))?;
    let table = PatternTable::from_stored(stored)?;
    for p in table.patterns() {
        println!(
            "[gen_tables] {:<12} {:<24} states={} edges={}",
            p.name,
            p.regex,
            p.dfa.num_states(),
            p.dfa.transitions().len()
        );
    }
    println!("[gen_tables] {} ok", path.display());
    Ok(())
}

fn main() -> Result<()> {
    logging::init();
    let args: Vec<String> = env::args().skip(1).collect();

    if args.first().map(String::as_str) == Some("--check") {
        let path = args.get(1).ok_or_else(|| anyhow!("--check needs a path"))?;
        return check(Path::new(path));
    }

    let Some(defs_path) = args.first() else {
        bail!("usage: gen_tables <definitions file> [out.json]");
    };
    let out = args
        .get(1)
        .cloned()
        .unwrap_or_else(|| "tables/lexer_tables.json".to_string());
    let out_path = Path::new(&out);

    let text = fs::read_to_string(defs_path).with_context(|| format!("read {defs_path}"))?;
    let line = text.lines().next().unwrap_or_default();

    println!("[gen_tables] compiling token definitions…");
    let table = PatternTable::parse(line)?;
    if table.is_empty() {
        bail!("{defs_path}: no token definitions on the first line");
    }
    let states: u64 = table
        .patterns()
        .iter()
        .map(|p| p.dfa.num_states() as u64)
        .sum();
    println!(
        "[gen_tables] {} patterns, {} DFA states total",
        table.len(),
        states
    );

    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    save_tables_json(out_path, &table.to_stored())
        .with_context(|| format!("write {}", out_path.display()))?;
    println!("[gen_tables] wrote {}", out_path.display());
    Ok(())
}
