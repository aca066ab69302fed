// src/main.rs
// Reads two lines (stdin, or the file named by the first argument):
//   t1_name t1_regex , t2_name t2_regex , ... , tk_name tk_regex #
//   "string"
// and prints one `<name> , "<lexeme>"` line per token.
//
// Flags:
//   --dump   print each pattern's postfix form and DFA to stderr

use std::{
    env, fs,
    io::{self, BufWriter, Read, Write},
    process,
};

use anyhow::{Context, Result};
use munchlex::{
    LexerError,
    lexer::{Lexer, PatternTable, parse_definitions, strip_quotes},
    logging,
    regex::to_postfix,
};

fn read_source(path: Option<&str>) -> Result<String> {
    match path {
        Some(p) => fs::read_to_string(p).with_context(|| format!("failed to read {p}")),
        None => {
            let mut s = String::new();
            io::stdin()
                .read_to_string(&mut s)
                .context("failed to read stdin")?;
            Ok(s)
        }
    }
}

// echo the regex with a caret under the offending character
fn report_position(regex: &str, pos: usize) {
    let pad: String = regex
        .chars()
        .take(pos)
        .map(|c| if c == '\t' { '\t' } else { ' ' })
        .collect();
    eprintln!("  {regex}");
    eprintln!("  {pad}^");
}

fn dump_table(table: &PatternTable) {
    for p in table.patterns() {
        let postfix = to_postfix(&p.regex)
            .map(|pf| pf.to_string())
            .unwrap_or_default();
        eprintln!("== {} : {}  (postfix {})", p.name, p.regex, postfix);
        eprint!("{}", p.dfa);
    }
}

fn run() -> Result<i32> {
    let mut dump = false;
    let mut path: Option<String> = None;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--dump" => dump = true,
            _ => path = Some(arg),
        }
    }

    let text = read_source(path.as_deref())?;
    let mut lines = text.lines();
    let definitions = lines.next().unwrap_or_default();
    let input = strip_quotes(lines.next().unwrap_or_default());

    let defs = parse_definitions(definitions);
    let table = match PatternTable::compile(&defs) {
        Ok(t) => t,
        Err(e @ LexerError::AcceptsEmpty { .. }) => {
            println!("{e}");
            return Ok(1);
        }
        Err(LexerError::Syntax { name, source }) => {
            eprintln!("error: syntax error in token {name}: {source}");
            if let Some(def) = defs.iter().find(|d| d.name == name) {
                report_position(&def.regex, source.pos());
            }
            return Ok(1);
        }
    };
    log::info!("compiled {} token patterns", table.len());
    if dump {
        dump_table(&table);
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for tok in Lexer::new(table, input) {
        writeln!(out, "{tok}")?;
    }
    out.flush()?;
    Ok(0)
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(2);
        }
    }
}
