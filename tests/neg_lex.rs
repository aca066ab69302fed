//! Negative tests: definition lines that must be rejected before any scanning.

use munchlex::{LexerError, RegexError, lexer::PatternTable};

fn empty_names(line: &str) -> Vec<String> {
    match PatternTable::parse(line) {
        Err(LexerError::AcceptsEmpty { names }) => names,
        other => panic!("expected AcceptsEmpty for {line:?}, got {other:?}"),
    }
}

#[test]
fn star_only_pattern_is_rejected() {
    assert_eq!(empty_names("e a* #"), vec!["e"]);
}

#[test]
fn every_empty_accepting_pattern_is_named() {
    let names = empty_names("a a , e a* , g a.b , f b* #");
    assert_eq!(names, vec!["e", "f"]);
}

#[test]
fn accepts_empty_message_lists_names() {
    let err = PatternTable::parse("x (a|b)* , y a , z b*.c* #").unwrap_err();
    assert_eq!(err.to_string(), "EPSILON IS NOT A TOKEN x z");
}

#[test]
fn name_without_regex_is_an_empty_token() {
    assert_eq!(empty_names("lonely , a a #"), vec!["lonely"]);
}

#[test]
fn unmatched_open_reports_name_and_position() {
    let err = PatternTable::parse("ok a , bad a.(b #").unwrap_err();
    assert_eq!(
        err,
        LexerError::Syntax {
            name: "bad".into(),
            source: RegexError::UnmatchedOpen { pos: 2 },
        }
    );
}

#[test]
fn unmatched_close() {
    let err = PatternTable::parse("bad a.b) #").unwrap_err();
    assert!(
        matches!(
            err,
            LexerError::Syntax {
                source: RegexError::UnmatchedClose { pos: 3 },
                ..
            }
        ),
        "{err:?}"
    );
}

#[test]
fn unknown_operator_character() {
    let err = PatternTable::parse("bad a+b #").unwrap_err();
    assert!(
        matches!(
            err,
            LexerError::Syntax {
                source: RegexError::UnexpectedChar { ch: '+', pos: 1 },
                ..
            }
        ),
        "{err:?}"
    );
}

#[test]
fn juxtaposition_needs_explicit_concat() {
    let err = PatternTable::parse("bad ab #").unwrap_err();
    assert!(
        matches!(
            err,
            LexerError::Syntax {
                source: RegexError::MissingOperator { pos: 1 },
                ..
            }
        ),
        "{err:?}"
    );
}

#[test]
fn dangling_binary_operator() {
    let err = PatternTable::parse("bad a| #").unwrap_err();
    assert!(
        matches!(
            err,
            LexerError::Syntax {
                source: RegexError::MissingOperand { op: '|', pos: 1 },
                ..
            }
        ),
        "{err:?}"
    );
}

#[test]
fn syntax_error_beats_empty_string_batch() {
    // e accepts the empty string, but the malformed pattern is reported
    let err = PatternTable::parse("e a* , bad (a #").unwrap_err();
    assert!(matches!(err, LexerError::Syntax { ref name, .. } if name == "bad"), "{err:?}");
}

#[test]
fn first_syntax_error_in_declaration_order_wins() {
    let err = PatternTable::parse("one a.(b , two a|| #").unwrap_err();
    assert!(matches!(err, LexerError::Syntax { ref name, .. } if name == "one"), "{err:?}");
}
