//! Tokenizer for well label text.

use logos::Logos;

use super::codec::{MAX_BITS, SelectionError};

/// One well label.
///
/// Letters address rows: `A`-`Z` are rows 0-25 and the doubled letters
/// `AA`-`VV` rows 26-47. Numbers address columns, 1-based. Whitespace, commas
/// and semicolons separate labels but are never required.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n,;]+")]
pub enum Label {
    #[regex(
        "AA|BB|CC|DD|EE|FF|GG|HH|II|JJ|KK|LL|MM|NN|OO|PP|QQ|RR|SS|TT|UU|VV",
        |lex| 26 + (lex.slice().as_bytes()[0] - b'A')
    )]
    DoubledRow(u8),

    #[regex("[A-Z]", |lex| lex.slice().as_bytes()[0] - b'A')]
    Row(u8),

    #[regex("[0-9]+", |lex| lex.slice().parse::<u32>().ok())]
    Column(u32),
}

impl Label {
    /// Zero-based physical index, or the offending column number.
    pub fn index(self) -> Result<u8, SelectionError> {
        match self {
            Self::Row(index) | Self::DoubledRow(index) => Ok(index),
            Self::Column(n) if (1..=MAX_BITS).contains(&n) => Ok((n - 1) as u8),
            Self::Column(n) => Err(SelectionError::ColumnOutOfRange(n)),
        }
    }
}

/// Tokenize label text into zero-based physical indices, in text order.
///
/// Column numbers are transposed onto the row index space (column 1 is row
/// `A`, column 27 is row `AA`), so callers handle both orientations alike.
pub fn lex_indices(text: &str) -> Result<Vec<u8>, SelectionError> {
    let mut lexer = Label::lexer(text);
    let mut indices = Vec::new();
    while let Some(token) = lexer.next() {
        match token {
            Ok(label) => indices.push(label.index()?),
            Err(()) => {
                return Err(SelectionError::InvalidLabel {
                    label: lexer.slice().to_string(),
                    offset: lexer.span().start,
                });
            }
        }
    }
    Ok(indices)
}
