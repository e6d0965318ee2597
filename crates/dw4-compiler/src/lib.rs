#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Assembler and disassembler for DW4/BNX1536 program files.
//!
//! [`assemble`] lowers one [`Program`](dw4_core::Program) into a 256-byte
//! [`ProgramRecord`](dw4_bytecode::ProgramRecord); [`disassemble`] reverses
//! it, filling geometry the record does not carry from a [`PlateLibrary`].
//! [`encode_file`] and [`decode_file`] do the same for whole files, and
//! [`link`] moves the result to and from an instrument.

pub mod assemble;
pub mod disassemble;
pub mod file;
pub mod library;
pub mod link;
pub mod profile;
pub mod selection;

#[cfg(test)]
mod link_tests;
#[cfg(test)]
mod test_utils;

pub use assemble::{CapacityError, assemble, logical_steps};
pub use disassemble::disassemble;
pub use file::{decode_file, decode_records, encode_file, encode_records};
pub use library::{PlateCatalog, PlateGeometry, PlateLibrary};
pub use link::{DeviceLink, LinkError, MemoryLink, download, upload};
pub use profile::{ConfigError, DeviceGeneration, DeviceModel, DeviceProfile};
pub use selection::{SelectionCodec, SelectionError, SelectionMask};

use dw4_bytecode::ImageError;

/// Errors from encoding, decoding and transferring program files.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("capacity exceeded: {0}")]
    CapacityExceeded(#[from] CapacityError),

    /// A step (1-based; 0 is the plate card) that cannot be expressed in the
    /// binary format, or a slot table that does not decode to steps.
    #[error("step {step}: {reason}")]
    MalformedStep { step: usize, reason: String },

    #[error(
        "{model} (device code {code:#04x}) does not match the device profile (support_columns = {support_columns})"
    )]
    UnsupportedDeviceGeneration {
        code: u8,
        model: &'static str,
        support_columns: bool,
    },

    #[error("invalid selection: {0}")]
    SelectionDecode(#[from] SelectionError),

    #[error("device link: {0}")]
    LinkFailure(#[from] LinkError),

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Any of the above, raised while handling one program of a file.
    #[error("program {number} `{name}`: {source}")]
    Program {
        number: usize,
        name: String,
        source: Box<Error>,
    },
}

impl Error {
    pub(crate) fn malformed(step: usize, reason: impl Into<String>) -> Self {
        Self::MalformedStep {
            step,
            reason: reason.into(),
        }
    }

    pub(crate) fn in_program(self, number: usize, name: &str) -> Self {
        Self::Program {
            number,
            name: name.to_string(),
            source: Box::new(self),
        }
    }

    /// The error without its program context.
    pub fn root(&self) -> &Error {
        match self {
            Self::Program { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result type for compiler operations.
pub type Result<T> = std::result::Result<T, Error>;
