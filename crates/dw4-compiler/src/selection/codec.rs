//! Mask encoding and decoding for one plate format on one device generation.

use std::fmt;

use dw4_core::PlateFormat;

use super::lexer::lex_indices;
use crate::profile::DeviceGeneration;

/// Physical labels the codec can spell: rows `A`-`VV`, columns 1-48.
pub const MAX_BITS: u32 = 48;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("invalid well label `{label}` at offset {offset}")]
    InvalidLabel { label: String, offset: usize },

    #[error("column {0} is outside 1..={MAX_BITS}")]
    ColumnOutOfRange(u32),

    #[error("selection bit {0} has no label on this plate")]
    BitOutOfRange(u32),
}

/// Selection bit mask. Bit `n` selects encoder step `n`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SelectionMask(pub u64);

impl SelectionMask {
    pub const EMPTY: Self = Self(0);

    /// Mask as stored in a record or a row-select slot pair.
    pub fn from_halves(low: u16, high: u16) -> Self {
        Self((high as u64) << 16 | low as u64)
    }

    /// The mask as a record field, if no bit above 31 is set.
    pub fn to_u32(self) -> Option<u32> {
        u32::try_from(self.0).ok()
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, bit: u32) -> bool {
        bit < 64 && self.0 & (1 << bit) != 0
    }

    /// Set bits, lowest first.
    pub fn bits(self) -> impl Iterator<Item = u32> {
        (0..64).filter(move |&bit| self.contains(bit))
    }
}

impl fmt::Display for SelectionMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#014x}", self.0)
    }
}

/// Row label for a zero-based physical index: `A`-`Z`, then `AA`-`VV`.
///
/// Indices past 47 have no label on any plate.
pub fn row_label(index: u8) -> String {
    let letter = (b'A' + index % 26) as char;
    if index < 26 {
        letter.to_string()
    } else {
        [letter, letter].iter().collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionCodec {
    generation: DeviceGeneration,
    format: PlateFormat,
}

impl SelectionCodec {
    pub fn new(generation: DeviceGeneration, format: PlateFormat) -> Self {
        Self { generation, format }
    }

    /// Physical rows (or columns) covered by one mask bit.
    pub fn step_factor(&self) -> u32 {
        self.generation.step_factor(self.format.density)
    }

    /// Decode label text into a mask.
    ///
    /// Labels are taken in groups of [`step_factor`](Self::step_factor); the
    /// first label of each group picks the bit. Row letters and column numbers
    /// are both accepted whatever the orientation.
    pub fn parse(&self, text: &str) -> Result<SelectionMask, SelectionError> {
        let step = self.step_factor() as usize;
        let indices = lex_indices(text)?;
        let mut mask = 0u64;
        for group in indices.chunks(step) {
            let bit = group[0] as usize / step;
            mask |= 1 << bit;
        }
        Ok(SelectionMask(mask))
    }

    /// Encode a mask as canonical label text: row letters run together
    /// (`"ABCD"`) in row mode, space-separated column numbers (`"1 2 3"`) in
    /// column mode.
    pub fn format(&self, mask: SelectionMask) -> Result<String, SelectionError> {
        let indices = self.physical_indices(mask)?;
        let text = if self.format.is_row_mode() {
            indices.into_iter().map(row_label).collect()
        } else {
            indices
                .into_iter()
                .map(|index| (index as u32 + 1).to_string())
                .collect::<Vec<_>>()
                .join(" ")
        };
        Ok(text)
    }

    /// Well ranges covered by a mask in the program's orientation, e.g.
    /// `"A1:D12; F1:H12"` for rows `A`-`D` and `F`-`H` of a 96-well plate.
    /// Empty masks describe as `""`.
    pub fn describe(&self, mask: SelectionMask) -> Result<String, SelectionError> {
        if self.format.is_row_mode() {
            self.display_rows(mask)
        } else {
            self.display_columns(mask)
        }
    }

    /// Runs of selected rows, each spanning every column of the plate.
    pub fn display_rows(&self, mask: SelectionMask) -> Result<String, SelectionError> {
        let columns = self.format.density.columns();
        let ranges: Vec<String> = runs(&self.physical_indices(mask)?)
            .into_iter()
            .map(|(first, last)| format!("{}1:{}{}", row_label(first), row_label(last), columns))
            .collect();
        Ok(ranges.join("; "))
    }

    /// Runs of selected columns, each spanning every row of the plate.
    pub fn display_columns(&self, mask: SelectionMask) -> Result<String, SelectionError> {
        let last_row = row_label(self.format.density.rows() - 1);
        let ranges: Vec<String> = runs(&self.physical_indices(mask)?)
            .into_iter()
            .map(|(first, last)| format!("A{}:{}{}", first + 1, last_row, last + 1))
            .collect();
        Ok(ranges.join("; "))
    }

    /// Zero-based physical indices selected by `mask`, ascending.
    fn physical_indices(&self, mask: SelectionMask) -> Result<Vec<u8>, SelectionError> {
        let step = self.step_factor();
        let mut indices = Vec::new();
        for bit in mask.bits() {
            if (bit + 1) * step > MAX_BITS {
                return Err(SelectionError::BitOutOfRange(bit));
            }
            indices.extend((bit * step..(bit + 1) * step).map(|index| index as u8));
        }
        Ok(indices)
    }
}

/// Collapse ascending indices into inclusive runs.
fn runs(indices: &[u8]) -> Vec<(u8, u8)> {
    let mut runs: Vec<(u8, u8)> = Vec::new();
    for &index in indices {
        match runs.last_mut() {
            Some((_, last)) if *last + 1 == index => *last = index,
            _ => runs.push((index, index)),
        }
    }
    runs
}
