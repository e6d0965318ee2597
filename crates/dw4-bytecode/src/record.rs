//! Header and program records (256 bytes each).
//!
//! Program record layout:
//! - 0: program number (1-99)
//! - 1-33: program name, NUL padded
//! - 34: local-edit flag, 35: column flag
//! - 36-68: plate name, NUL padded
//! - 69: plate format (+10 lobase)
//! - 70-79: height, depth, offset, max volume, spacing (u16 each)
//! - 80-83: selection mask (low half, high half)
//! - 84-85: default ASP-offset (i16)
//! - 86-93: liquid factors, 94-101: pressures (4 × u16 each)
//! - 102-105: unused
//! - 106-155: command bytes, 156-255: slot values (50 × u16)
//!
//! Header record: number 0, file name at 1-33, `ddMMyyyy` date at 34-42.

use chrono::NaiveDate;
use dw4_core::{AspOffset, Inlet, LiquidFactor, PlateDimension, Pressure, Volume, WellSpacing};
use log::warn;

use crate::command::Slot;
use crate::constants::*;

/// Malformed record bytes or unencodable record text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("record is {0} bytes, expected {RECORD_SIZE}")]
    Length(usize),

    #[error("{field} `{text}` is longer than {NAME_LEN} characters")]
    TextTooLong { field: &'static str, text: String },

    #[error("{field} `{text}` contains characters the device cannot store")]
    TextEncoding { field: &'static str, text: String },
}

/// First record of a program file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderRecord {
    pub file_name: String,
    pub created: Option<NaiveDate>,
}

impl HeaderRecord {
    const DATE_FORMAT: &'static str = "%d%m%Y";

    pub fn new(file_name: impl Into<String>, created: Option<NaiveDate>) -> Self {
        Self {
            file_name: file_name.into(),
            created,
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RecordError> {
        check_length(bytes)?;
        let date = &bytes[DATE..DATE + DATE_LEN];
        let created = if date.iter().all(|&b| b == 0) {
            None
        } else {
            let text = read_text(date);
            let parsed = NaiveDate::parse_from_str(&text, Self::DATE_FORMAT);
            if parsed.is_err() {
                warn!("header date `{text}` is not ddMMyyyy, ignoring it");
            }
            parsed.ok()
        };
        Ok(Self {
            file_name: read_text(&bytes[NAME..NAME + NAME_LEN]),
            created,
        })
    }

    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let mut bytes = [0u8; RECORD_SIZE];
        write_text(&mut bytes[NAME..NAME + NAME_LEN], &self.file_name);
        if let Some(date) = self.created {
            let text = date.format(Self::DATE_FORMAT).to_string();
            write_text(&mut bytes[DATE..DATE + DATE_LEN], &text);
        }
        bytes
    }

    pub fn validate(&self) -> Result<(), RecordError> {
        check_text("file name", &self.file_name)
    }
}

/// One program: plate geometry, per-inlet settings and the slot table.
///
/// Plate geometry is stored only for the program's orientation: `offset` and
/// `spacing` are the row values for row-mode programs and the column values
/// otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramRecord {
    pub number: u8,
    pub name: String,
    pub local_edit: u8,
    pub column_flag: u8,
    pub plate_name: String,
    /// Density code 1-3, plus 10 for lobase plates.
    pub format: u8,
    pub height: PlateDimension,
    pub depth: PlateDimension,
    pub offset: PlateDimension,
    pub max_volume: Volume,
    pub spacing: WellSpacing,
    pub mask: u32,
    pub asp_offset: AspOffset,
    pub liquid_factors: [LiquidFactor; Inlet::COUNT],
    pub pressures: [Pressure; Inlet::COUNT],
    pub slots: [Slot; SLOT_COUNT],
}

impl ProgramRecord {
    /// All-zero record with the given program number.
    pub fn new(number: u8) -> Self {
        Self {
            number,
            name: String::new(),
            local_edit: 0,
            column_flag: 0,
            plate_name: String::new(),
            format: 0,
            height: PlateDimension(0),
            depth: PlateDimension(0),
            offset: PlateDimension(0),
            max_volume: Volume(0),
            spacing: WellSpacing(0),
            mask: 0,
            asp_offset: AspOffset::ZERO,
            liquid_factors: [LiquidFactor(0); Inlet::COUNT],
            pressures: [Pressure(0); Inlet::COUNT],
            slots: [Slot::END; SLOT_COUNT],
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RecordError> {
        check_length(bytes)?;

        if bytes[UNUSED..COMMANDS].iter().any(|&b| b != 0) {
            warn!("program record {} has data in its unused bytes", bytes[NUMBER]);
        }

        let mut liquid_factors = [LiquidFactor(0); Inlet::COUNT];
        let mut pressures = [Pressure(0); Inlet::COUNT];
        for i in 0..Inlet::COUNT {
            liquid_factors[i] = LiquidFactor(read_u16_le(bytes, LIQUID_FACTORS + i * 2));
            pressures[i] = Pressure(read_u16_le(bytes, PRESSURES + i * 2));
        }

        let mut slots = [Slot::END; SLOT_COUNT];
        for (i, slot) in slots.iter_mut().enumerate() {
            *slot = Slot {
                command: bytes[COMMANDS + i],
                value: read_u16_le(bytes, VALUES + i * 2),
            };
        }

        let mask_low = read_u16_le(bytes, MASK_LOW) as u32;
        let mask_high = read_u16_le(bytes, MASK_HIGH) as u32;

        Ok(Self {
            number: bytes[NUMBER],
            name: read_text(&bytes[NAME..NAME + NAME_LEN]),
            local_edit: bytes[LOCAL_EDIT],
            column_flag: bytes[COLUMN_FLAG],
            plate_name: read_text(&bytes[PLATE_NAME..PLATE_NAME + NAME_LEN]),
            format: bytes[FORMAT],
            height: PlateDimension(read_u16_le(bytes, HEIGHT)),
            depth: PlateDimension(read_u16_le(bytes, DEPTH)),
            offset: PlateDimension(read_u16_le(bytes, OFFSET)),
            max_volume: Volume(read_u16_le(bytes, MAX_VOLUME)),
            spacing: WellSpacing(read_u16_le(bytes, SPACING)),
            mask: mask_high << 16 | mask_low,
            asp_offset: AspOffset(read_u16_le(bytes, ASP_OFFSET) as i16),
            liquid_factors,
            pressures,
            slots,
        })
    }

    /// Encode to 256 bytes. Names must have passed [`validate`](Self::validate);
    /// longer names are cut at 32 characters.
    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let mut bytes = [0u8; RECORD_SIZE];
        bytes[NUMBER] = self.number;
        write_text(&mut bytes[NAME..NAME + NAME_LEN], &self.name);
        bytes[LOCAL_EDIT] = self.local_edit;
        bytes[COLUMN_FLAG] = self.column_flag;
        write_text(&mut bytes[PLATE_NAME..PLATE_NAME + NAME_LEN], &self.plate_name);
        bytes[FORMAT] = self.format;
        write_u16_le(&mut bytes, HEIGHT, self.height.raw());
        write_u16_le(&mut bytes, DEPTH, self.depth.raw());
        write_u16_le(&mut bytes, OFFSET, self.offset.raw());
        write_u16_le(&mut bytes, MAX_VOLUME, self.max_volume.raw());
        write_u16_le(&mut bytes, SPACING, self.spacing.raw());
        write_u16_le(&mut bytes, MASK_LOW, self.mask as u16);
        write_u16_le(&mut bytes, MASK_HIGH, (self.mask >> 16) as u16);
        write_u16_le(&mut bytes, ASP_OFFSET, self.asp_offset.raw() as u16);
        for i in 0..Inlet::COUNT {
            write_u16_le(&mut bytes, LIQUID_FACTORS + i * 2, self.liquid_factors[i].raw());
            write_u16_le(&mut bytes, PRESSURES + i * 2, self.pressures[i].raw());
        }
        for (i, slot) in self.slots.iter().enumerate() {
            bytes[COMMANDS + i] = slot.command;
            write_u16_le(&mut bytes, VALUES + i * 2, slot.value);
        }
        bytes
    }

    pub fn validate(&self) -> Result<(), RecordError> {
        check_text("program name", &self.name)?;
        check_text("plate name", &self.plate_name)
    }

    /// Slots up to (not including) the first end command.
    pub fn used_slots(&self) -> &[Slot] {
        let end = self
            .slots
            .iter()
            .position(|slot| slot.is_end())
            .unwrap_or(SLOT_COUNT);
        &self.slots[..end]
    }

    /// Whether this record marks the end of the program list: either it has
    /// no program number, or it has neither a name nor any instruction.
    ///
    /// An empty instruction table alone does not end the list. A program that
    /// only sets up its plate is stored with a name and no slots, and still
    /// decodes as a program. The assembler refuses to write a record that
    /// would match here.
    pub fn is_terminator(&self) -> bool {
        self.number == 0 || (self.name.is_empty() && self.slots[0].is_end())
    }
}

/// Check that `text` fits a 32-byte name field.
///
/// Names are stored one byte per character (Latin-1); NUL is the padding byte.
pub fn check_text(field: &'static str, text: &str) -> Result<(), RecordError> {
    if text.chars().any(|c| c == '\0' || c as u32 > 0xFF) {
        return Err(RecordError::TextEncoding {
            field,
            text: text.to_string(),
        });
    }
    if text.chars().count() > NAME_LEN {
        return Err(RecordError::TextTooLong {
            field,
            text: text.to_string(),
        });
    }
    Ok(())
}

fn check_length(bytes: &[u8]) -> Result<(), RecordError> {
    if bytes.len() != RECORD_SIZE {
        return Err(RecordError::Length(bytes.len()));
    }
    Ok(())
}

fn read_text(field: &[u8]) -> String {
    field
        .iter()
        .take_while(|&&b| b != 0)
        .map(|&b| b as char)
        .collect()
}

fn write_text(field: &mut [u8], text: &str) {
    for (dst, c) in field.iter_mut().zip(text.chars()) {
        *dst = c as u32 as u8;
    }
}

fn read_u16_le(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn write_u16_le(bytes: &mut [u8], offset: usize, value: u16) {
    bytes[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}
