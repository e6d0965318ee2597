//! Plate formats and well geometry enums.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Well density of a plate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Density {
    #[serde(rename = "96")]
    W96,
    #[serde(rename = "384")]
    W384,
    #[serde(rename = "1536")]
    W1536,
}

impl Density {
    /// Format code of the row-mode variant (1-3).
    pub fn base_code(self) -> u8 {
        match self {
            Self::W96 => 1,
            Self::W384 => 2,
            Self::W1536 => 3,
        }
    }

    pub fn from_base_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::W96),
            2 => Some(Self::W384),
            3 => Some(Self::W1536),
            _ => None,
        }
    }

    pub fn rows(self) -> u8 {
        match self {
            Self::W96 => 8,
            Self::W384 => 16,
            Self::W1536 => 32,
        }
    }

    pub fn columns(self) -> u8 {
        match self {
            Self::W96 => 12,
            Self::W384 => 24,
            Self::W1536 => 48,
        }
    }

    pub fn wells(self) -> u16 {
        self.rows() as u16 * self.columns() as u16
    }
}

/// Whether selection masks address plate rows or plate columns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Rows,
    Columns,
}

impl Orientation {
    /// Value of the record's column flag.
    pub fn flag(self) -> u8 {
        match self {
            Self::Rows => 0,
            Self::Columns => 1,
        }
    }

    pub fn from_flag(flag: u8) -> Option<Self> {
        match flag {
            0 => Some(Self::Rows),
            1 => Some(Self::Columns),
            _ => None,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::Rows => Self::Columns,
            Self::Columns => Self::Rows,
        }
    }
}

/// Plate format: density, orientation and the extended-rim ("lobase") variant.
///
/// The editor numbers formats 1-6: 1-3 select rows on 96/384/1536 plates,
/// 4-6 select columns on the same densities. Lobase plates add 10.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlateFormat {
    pub density: Density,
    pub orientation: Orientation,
    pub lobase: bool,
}

impl PlateFormat {
    pub const LOBASE: u8 = 10;

    pub fn new(density: Density, orientation: Orientation) -> Self {
        Self {
            density,
            orientation,
            lobase: false,
        }
    }

    pub fn with_lobase(mut self, lobase: bool) -> Self {
        self.lobase = lobase;
        self
    }

    /// Editor format code: 1-6, plus 10 for lobase plates.
    pub fn code(self) -> u8 {
        let orientation = match self.orientation {
            Orientation::Rows => 0,
            Orientation::Columns => 3,
        };
        self.density.base_code() + orientation + self.lobase_bias()
    }

    pub fn from_code(code: u8) -> Option<Self> {
        let (code, lobase) = match code {
            11..=16 => (code - Self::LOBASE, true),
            _ => (code, false),
        };
        let (base, orientation) = match code {
            1..=3 => (code, Orientation::Rows),
            4..=6 => (code - 3, Orientation::Columns),
            _ => return None,
        };
        let density = Density::from_base_code(base)?;
        Some(Self {
            density,
            orientation,
            lobase,
        })
    }

    /// Format byte as stored in a program record: the density code with the
    /// lobase bias, orientation carried separately in the column flag.
    pub fn record_code(self) -> u8 {
        self.density.base_code() + self.lobase_bias()
    }

    pub fn from_record(record_code: u8, column_flag: u8) -> Option<Self> {
        let (base, lobase) = match record_code {
            11..=13 => (record_code - Self::LOBASE, true),
            _ => (record_code, false),
        };
        Some(Self {
            density: Density::from_base_code(base)?,
            orientation: Orientation::from_flag(column_flag)?,
            lobase,
        })
    }

    pub fn is_row_mode(self) -> bool {
        self.orientation == Orientation::Rows
    }

    fn lobase_bias(self) -> u8 {
        if self.lobase { Self::LOBASE } else { 0 }
    }
}

impl TryFrom<u8> for PlateFormat {
    type Error = ModelError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(ModelError::FormatCode(code))
    }
}

impl From<PlateFormat> for u8 {
    fn from(format: PlateFormat) -> Self {
        format.code()
    }
}

impl fmt::Display for PlateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let orientation = match self.orientation {
            Orientation::Rows => "rows",
            Orientation::Columns => "columns",
        };
        write!(f, "{}-well {}", self.density.wells(), orientation)?;
        if self.lobase {
            f.write_str(" lobase")?;
        }
        Ok(())
    }
}

/// Well bottom shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WellShape {
    #[default]
    Flat,
    U,
    V,
}

impl WellShape {
    pub fn code(self) -> u8 {
        match self {
            Self::Flat => 0,
            Self::U => 1,
            Self::V => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Flat),
            1 => Some(Self::U),
            2 => Some(Self::V),
            _ => None,
        }
    }
}
