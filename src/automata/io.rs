// src/automata/io.rs
//! JSON (de)serialization of compiled pattern tables.

use std::{
    collections::{BTreeMap, BTreeSet},
    io::{BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use super::{
    dfa::Dfa,
    state::{StateId, Symbol},
};

#[serde_as]
#[derive(Debug, Serialize, Deserialize)]
struct DfaDisk {
    alphabet: BTreeSet<Symbol>,
    num_states: StateId,
    initial: StateId,
    finals: Vec<StateId>,
    // JSON object keys must be strings, so (state, symbol) pairs go out as a list
    #[serde_as(as = "Vec<(_, _)>")]
    transitions: BTreeMap<(StateId, Symbol), StateId>,
}

impl From<&Dfa> for DfaDisk {
    fn from(dfa: &Dfa) -> Self {
        Self {
            alphabet: dfa.alphabet().clone(),
            num_states: dfa.num_states(),
            initial: dfa.initial(),
            finals: dfa.finals().iter().copied().collect(),
            transitions: dfa
                .transitions()
                .into_iter()
                .map(|(src, sym, dst)| ((src, sym), dst))
                .collect(),
        }
    }
}

impl DfaDisk {
    fn into_dfa(self) -> Result<Dfa, String> {
        let edges = self
            .transitions
            .into_iter()
            .map(|((src, sym), dst)| (src, sym, dst));
        let mut dfa = Dfa::from_parts(self.num_states, self.initial, self.finals, edges)
            .map_err(|e| format!("invalid DFA table: {e}"))?;
        for sym in self.alphabet {
            dfa.add_symbol(sym);
        }
        Ok(dfa)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PatternDisk {
    name: String,
    regex: String,
    dfa: DfaDisk,
}

#[derive(Debug, Serialize, Deserialize)]
struct TablesDisk {
    patterns: Vec<PatternDisk>,
}

/// One compiled pattern as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPattern {
    pub name: String,
    pub regex: String,
    pub dfa: Dfa,
}

pub fn save_tables_json(path: &Path, patterns: &[StoredPattern]) -> std::io::Result<()> {
    let f = std::fs::File::create(path)?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, &to_disk(patterns))?;
    w.flush()
}

pub fn tables_to_json(patterns: &[StoredPattern]) -> Result<String, String> {
    serde_json::to_string_pretty(&to_disk(patterns))
        .map_err(|e| format!("Failed to serialize tables JSON: {e}"))
}

pub fn load_tables_json_bytes(data: &[u8]) -> Result<Vec<StoredPattern>, String> {
    let disk = serde_json::from_slice::<TablesDisk>(data)
        .map_err(|e| format!("Failed to parse tables JSON: {e}"))?;
    disk.patterns
        .into_iter()
        .map(|p| {
            let name = p.name;
            let dfa = p.dfa.into_dfa().map_err(|e| format!("pattern {name}: {e}"))?;
            Ok(StoredPattern {
                name,
                regex: p.regex,
                dfa,
            })
        })
        .collect()
}

fn to_disk(patterns: &[StoredPattern]) -> TablesDisk {
    TablesDisk {
        patterns: patterns
            .iter()
            .map(|p| PatternDisk {
                name: p.name.clone(),
                regex: p.regex.clone(),
                dfa: DfaDisk::from(&p.dfa),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regex::compile;

    #[test]
    fn tables_survive_json() {
        let patterns: Vec<StoredPattern> = [("ab", "a.b*"), ("alt", "(a|b)*.c")]
            .into_iter()
            .map(|(name, regex)| StoredPattern {
                name: name.to_string(),
                regex: regex.to_string(),
                dfa: compile(regex).unwrap(),
            })
            .collect();

        let json = tables_to_json(&patterns).unwrap();
        let loaded = load_tables_json_bytes(json.as_bytes()).unwrap();
        assert_eq!(loaded, patterns);
        assert!(loaded[1].dfa.accepts("abac"));
    }

    #[test]
    fn dangling_state_is_rejected() {
        let json = r#"{"patterns":[{"name":"x","regex":"a","dfa":{
            "alphabet":["a"],"num_states":2,"initial":0,"finals":[1],
            "transitions":[[[0,"a"],5]]}}]}"#;
        let err = load_tables_json_bytes(json.as_bytes()).unwrap_err();
        assert!(err.contains("pattern x"), "{err}");
        assert!(err.contains("out of range"), "{err}");
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let err = load_tables_json_bytes(b"{not json").unwrap_err();
        assert!(err.starts_with("Failed to parse tables JSON"), "{err}");
    }
}
