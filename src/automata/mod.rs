// src/automata/mod.rs
pub mod dfa;
pub mod io;
pub mod nfa;
pub mod state;
pub mod subset;

pub use dfa::{Dfa, DfaRun, DfaStatus};
pub use io::{StoredPattern, load_tables_json_bytes, save_tables_json, tables_to_json};
pub use nfa::Nfa;
pub use state::{EPSILON, StateId, StateSet, Symbol, is_space};
pub use subset::subset_construction;
