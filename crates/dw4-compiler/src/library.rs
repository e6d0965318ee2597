//! Plate geometry lookup for the disassembler.
//!
//! Program records keep only the offset and spacing of the program's own
//! orientation and no well diameter or shape at all. Decoding fills those in
//! from a [`PlateLibrary`]: a previous version of the same program file, a
//! catalog of plate types, or both.

use std::path::Path;

use dw4_core::{PlateCard, PlateDimension, ProgramFile, WellShape, WellSpacing};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::profile::ConfigError;

/// Geometry a record does not carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlateGeometry {
    pub row_offset: PlateDimension,
    pub column_offset: PlateDimension,
    pub row_spacing: WellSpacing,
    pub column_spacing: WellSpacing,
    pub diameter: PlateDimension,
    #[serde(default)]
    pub shape: WellShape,
}

impl PlateGeometry {
    /// Geometry of a plate card, if it knows its well diameter.
    pub fn from_card(card: &PlateCard) -> Option<Self> {
        Some(Self {
            row_offset: card.row_offset,
            column_offset: card.column_offset,
            row_spacing: card.row_spacing,
            column_spacing: card.column_spacing,
            diameter: card.diameter?,
            shape: card.shape.unwrap_or_default(),
        })
    }
}

/// Source of plate geometry, keyed by plate name.
///
/// `program_index` is the zero-based position of the program being decoded;
/// program-file libraries only match the program at the same position.
pub trait PlateLibrary {
    fn lookup(&self, plate_name: &str, program_index: usize) -> Option<PlateGeometry>;
}

/// No library: records decode with the geometry they carry.
impl PlateLibrary for () {
    fn lookup(&self, _plate_name: &str, _program_index: usize) -> Option<PlateGeometry> {
        None
    }
}

impl<L: PlateLibrary + ?Sized> PlateLibrary for &L {
    fn lookup(&self, plate_name: &str, program_index: usize) -> Option<PlateGeometry> {
        (**self).lookup(plate_name, program_index)
    }
}

/// First library that knows the plate wins.
impl<A: PlateLibrary, B: PlateLibrary> PlateLibrary for (A, B) {
    fn lookup(&self, plate_name: &str, program_index: usize) -> Option<PlateGeometry> {
        self.0
            .lookup(plate_name, program_index)
            .or_else(|| self.1.lookup(plate_name, program_index))
    }
}

impl<L: PlateLibrary> PlateLibrary for Option<L> {
    fn lookup(&self, plate_name: &str, program_index: usize) -> Option<PlateGeometry> {
        self.as_ref()?.lookup(plate_name, program_index)
    }
}

/// A program file used as library: the program at the same position, if it
/// uses a plate of the same name.
impl PlateLibrary for ProgramFile {
    fn lookup(&self, plate_name: &str, program_index: usize) -> Option<PlateGeometry> {
        let plate = &self.programs.get(program_index)?.plate;
        if plate.name != plate_name {
            return None;
        }
        PlateGeometry::from_card(plate)
    }
}

/// Named plate types, in file order.
///
/// ```json
/// {
///   "Greiner 1536 PS": {
///     "row_offset": 7.86, "column_offset": 11.0,
///     "row_spacing": 2.25, "column_spacing": 2.25,
///     "diameter": 1.7, "shape": "flat"
///   }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlateCatalog {
    plates: IndexMap<String, PlateGeometry>,
}

impl PlateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        Self::from_json(&ConfigError::read(path)?)
    }

    pub fn insert(&mut self, name: impl Into<String>, geometry: PlateGeometry) {
        self.plates.insert(name.into(), geometry);
    }

    pub fn get(&self, name: &str) -> Option<&PlateGeometry> {
        self.plates.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.plates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.plates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plates.is_empty()
    }
}

impl PlateLibrary for PlateCatalog {
    fn lookup(&self, plate_name: &str, _program_index: usize) -> Option<PlateGeometry> {
        self.get(plate_name).copied()
    }
}
