//! Program steps.
//!
//! A program is a plate card followed by an ordered list of [`Step`]s. The
//! plate card is not a `Step` variant: it is always present and always first,
//! so [`Program`](crate::Program) holds it in a field of its own.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ModelError;
use crate::plate::{PlateFormat, WellShape};
use crate::units::{
    AspOffset, AspirateTime, LiquidFactor, PlateDimension, Pressure, ProbeHeight, SoakTime,
    Volume, WellSpacing,
};

/// Selected rows (or columns) as the editor spells them.
///
/// Row-mode text is a run of row letters (`"ABCD"`, doubled letters for rows
/// past `Z`), column-mode text is whitespace-separated column numbers
/// (`"1 2 3"`). The selection codec turns it into a bit mask.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WellSelection(pub String);

impl WellSelection {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for WellSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Plate geometry and the initial well selection of a program.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlateCard {
    /// Plate type name as listed in the plate library.
    pub name: String,
    pub format: PlateFormat,
    pub height: PlateDimension,
    pub depth: PlateDimension,
    pub row_offset: PlateDimension,
    pub column_offset: PlateDimension,
    pub row_spacing: WellSpacing,
    pub column_spacing: WellSpacing,
    pub max_volume: Volume,
    /// Program-wide default ASP-offset.
    pub asp_offset: AspOffset,
    pub selection: WellSelection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter: Option<PlateDimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<WellShape>,
}

impl PlateCard {
    /// Plate card with zeroed geometry and an empty selection.
    pub fn new(name: impl Into<String>, format: PlateFormat) -> Self {
        Self {
            name: name.into(),
            format,
            height: PlateDimension(0),
            depth: PlateDimension(0),
            row_offset: PlateDimension(0),
            column_offset: PlateDimension(0),
            row_spacing: WellSpacing(0),
            column_spacing: WellSpacing(0),
            max_volume: Volume(0),
            asp_offset: AspOffset::ZERO,
            selection: WellSelection::default(),
            diameter: None,
            shape: None,
        }
    }

    /// Offset used by the program's orientation.
    pub fn active_offset(&self) -> PlateDimension {
        if self.format.is_row_mode() {
            self.row_offset
        } else {
            self.column_offset
        }
    }

    /// Well spacing used by the program's orientation.
    pub fn active_spacing(&self) -> WellSpacing {
        if self.format.is_row_mode() {
            self.row_spacing
        } else {
            self.column_spacing
        }
    }
}

/// Aspirate probe velocity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Velocity {
    #[default]
    Low,
    Medium,
    High,
}

impl Velocity {
    pub fn code(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Low),
            1 => Some(Self::Medium),
            2 => Some(Self::High),
            _ => None,
        }
    }
}

/// Dispense inlet, 1-4.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Inlet(u8);

impl Inlet {
    pub const COUNT: usize = 4;

    pub fn new(number: u8) -> Option<Self> {
        (1..=Self::COUNT as u8).contains(&number).then_some(Self(number))
    }

    /// Inlet number, 1-4.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based index into per-inlet record fields.
    pub fn index(self) -> usize {
        self.0 as usize - 1
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (1..=Self::COUNT as u8).map(Self)
    }
}

impl TryFrom<u8> for Inlet {
    type Error = ModelError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::new(number).ok_or(ModelError::Inlet(number))
    }
}

impl From<Inlet> for u8 {
    fn from(inlet: Inlet) -> Self {
        inlet.0
    }
}

/// Re-select rows (or columns) mid-program.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowOnly {
    pub selection: WellSelection,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aspirate {
    pub velocity: Velocity,
    #[serde(default)]
    pub sweep: bool,
    pub time: AspirateTime,
    pub height: ProbeHeight,
    pub asp_offset: AspOffset,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dispense {
    pub inlet: Inlet,
    pub volume: Volume,
    #[serde(default)]
    pub liquid_factor: LiquidFactor,
    #[serde(default)]
    pub pressure: Pressure,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Soak {
    pub time: SoakTime,
}

/// One editor card after the plate card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    RowOnly(RowOnly),
    Aspirate(Aspirate),
    Dispense(Dispense),
    Soak(Soak),
}

impl Step {
    pub fn is_row_only(&self) -> bool {
        matches!(self, Self::RowOnly(_))
    }
}

impl From<RowOnly> for Step {
    fn from(step: RowOnly) -> Self {
        Self::RowOnly(step)
    }
}

impl From<Aspirate> for Step {
    fn from(step: Aspirate) -> Self {
        Self::Aspirate(step)
    }
}

impl From<Dispense> for Step {
    fn from(step: Dispense) -> Self {
        Self::Dispense(step)
    }
}

impl From<Soak> for Step {
    fn from(step: Soak) -> Self {
        Self::Soak(step)
    }
}
