use logos::Logos;

use super::lexer::{Label, lex_indices};
use super::codec::SelectionError;

fn labels(text: &str) -> Vec<Label> {
    Label::lexer(text).map(|token| token.unwrap()).collect()
}

#[test]
fn doubled_letters_take_precedence() {
    assert_eq!(labels("AAB"), [Label::DoubledRow(26), Label::Row(1)]);
    assert_eq!(labels("AB"), [Label::Row(0), Label::Row(1)]);
    assert_eq!(labels("VV"), [Label::DoubledRow(47)]);
}

#[test]
fn letters_past_v_never_double() {
    assert_eq!(lex_indices("WW").unwrap(), [22, 22]);
    assert_eq!(lex_indices("Z").unwrap(), [25]);
}

#[test]
fn columns_transpose_onto_rows() {
    assert_eq!(labels("12 3"), [Label::Column(12), Label::Column(3)]);
    assert_eq!(lex_indices("1 27 48").unwrap(), [0, 26, 47]);
}

#[test]
fn separators_are_optional() {
    assert_eq!(lex_indices("A,B; C\tD\n").unwrap(), [0, 1, 2, 3]);
    assert_eq!(lex_indices("").unwrap(), Vec::<u8>::new());
    assert_eq!(lex_indices("   ").unwrap(), Vec::<u8>::new());
}

#[test]
fn column_range() {
    assert_eq!(lex_indices("0"), Err(SelectionError::ColumnOutOfRange(0)));
    assert_eq!(lex_indices("1 49"), Err(SelectionError::ColumnOutOfRange(49)));
}

#[test]
fn invalid_label_reports_offset() {
    let err = lex_indices("A?B").unwrap_err();
    assert!(matches!(err, SelectionError::InvalidLabel { offset: 1, .. }), "{err:?}");

    let err = lex_indices("ab").unwrap_err();
    assert!(matches!(err, SelectionError::InvalidLabel { offset: 0, .. }), "{err:?}");
}
