//! Exported tables reload into a scanner that tokenizes the same way.

use munchlex::{
    LexerError,
    automata::{load_tables_json_bytes, tables_to_json},
    lexer::{Lexer, PatternTable},
};

const DEFS: &str = "kw_if i.f , id (i|f|x).(i|f|x)* , ws_a a.a* #";

#[test]
fn reloaded_table_scans_the_same() {
    let table = PatternTable::parse(DEFS).unwrap();
    let json = tables_to_json(&table.to_stored()).unwrap();
    let reloaded = PatternTable::from_stored(load_tables_json_bytes(json.as_bytes()).unwrap()).unwrap();

    let input = "if ifx aa b xi";
    let a: Vec<_> = Lexer::new(table, input).collect();
    let b: Vec<_> = Lexer::new(reloaded, input).collect();
    assert_eq!(a, b);
    assert_eq!(a.len(), 5);
}

#[test]
fn reloading_still_rejects_empty_string_patterns() {
    let bad = munchlex::regex::compile("a*").unwrap();
    let stored = vec![munchlex::automata::StoredPattern {
        name: "star".into(),
        regex: "a*".into(),
        dfa: bad,
    }];
    let json = tables_to_json(&stored).unwrap();
    let err = PatternTable::from_stored(load_tables_json_bytes(json.as_bytes()).unwrap()).unwrap_err();
    assert_eq!(
        err,
        LexerError::AcceptsEmpty {
            names: vec!["star".into()]
        }
    );
}
