//! Selection codec: well label text ⇄ selection bit mask.
//!
//! Row-mode programs spell selections as row letters (`"ABCD"`), column-mode
//! programs as column numbers (`"1 2 3"`). Both map onto a bit mask where bit
//! `n` selects one encoder step of the dispense head. Current-generation
//! devices move two physical rows per step on 384 and 1536 plates, so one bit
//! covers a pair of labels there.

mod codec;
mod lexer;

#[cfg(test)]
mod lexer_tests;

pub use codec::{MAX_BITS, SelectionCodec, SelectionError, SelectionMask, row_label};
pub use lexer::{Label, lex_indices};
