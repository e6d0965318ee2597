#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Binary program file format of the DW4/BNX1536 liquid handler.
//!
//! A program file is a matrix of 256-byte records: one header record followed
//! by up to 99 program records. Each program record carries the plate
//! geometry, per-inlet liquid settings, and a 50-slot instruction table of
//! (command byte, 16-bit value) pairs.
//!
//! This crate contains:
//! - Record layout constants ([`constants`])
//! - Command bytes and slots ([`Command`], [`Slot`])
//! - Header and program records ([`HeaderRecord`], [`ProgramRecord`])
//! - The whole-file matrix ([`FileImage`])
//! - A human-readable [`dump`]

pub mod command;
pub mod constants;
pub mod dump;
pub mod image;
pub mod record;

#[cfg(test)]
mod dump_tests;
#[cfg(test)]
mod record_tests;

pub use command::{Command, Slot};
pub use constants::{MAX_PROGRAMS, NAME_LEN, RECORD_SIZE, SLOT_COUNT};
pub use dump::dump;
pub use image::{FileImage, ImageError, Record};
pub use record::{HeaderRecord, ProgramRecord, RecordError};
