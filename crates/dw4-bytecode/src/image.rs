//! Whole program files as a matrix of records.

use std::io;
use std::path::Path;

use log::debug;

use crate::constants::{MAX_PROGRAMS, RECORD_SIZE};
use crate::record::{HeaderRecord, ProgramRecord, RecordError};

/// One row of the record matrix exchanged with the device.
pub type Record = [u8; RECORD_SIZE];

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("program file is empty")]
    Empty,

    #[error("program file is {0} bytes, not a multiple of {RECORD_SIZE}")]
    Length(usize),

    #[error("{0} programs exceed the limit of {MAX_PROGRAMS} per file")]
    TooManyPrograms(usize),

    #[error("record {index}: {source}")]
    Record {
        index: usize,
        #[source]
        source: RecordError,
    },

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Header plus program records, in file order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileImage {
    pub header: HeaderRecord,
    pub programs: Vec<ProgramRecord>,
}

impl FileImage {
    pub fn new(header: HeaderRecord) -> Self {
        Self {
            header,
            programs: Vec::new(),
        }
    }

    /// Parse a record matrix.
    ///
    /// Program records are read until the first terminator record (see
    /// [`ProgramRecord::is_terminator`]); anything after it is padding.
    pub fn from_records(records: &[Record]) -> Result<Self, ImageError> {
        let (first, rest) = records.split_first().ok_or(ImageError::Empty)?;
        let header = HeaderRecord::from_bytes(first).map_err(|source| ImageError::Record {
            index: 0,
            source,
        })?;

        let mut programs = Vec::new();
        for (i, bytes) in rest.iter().enumerate() {
            let record = ProgramRecord::from_bytes(bytes).map_err(|source| ImageError::Record {
                index: i + 1,
                source,
            })?;
            if record.is_terminator() {
                debug!("program list ends at record {}", i + 1);
                break;
            }
            programs.push(record);
        }
        if programs.len() > MAX_PROGRAMS {
            return Err(ImageError::TooManyPrograms(programs.len()));
        }

        Ok(Self { header, programs })
    }

    /// Parse a flat byte buffer (records back to back).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ImageError> {
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }
        if bytes.len() % RECORD_SIZE != 0 {
            return Err(ImageError::Length(bytes.len()));
        }
        let records: Vec<Record> = bytes
            .chunks_exact(RECORD_SIZE)
            .map(|chunk| {
                let mut record = [0u8; RECORD_SIZE];
                record.copy_from_slice(chunk);
                record
            })
            .collect();
        Self::from_records(&records)
    }

    /// Encode as a record matrix: the header, then one record per program.
    pub fn to_records(&self) -> Result<Vec<Record>, ImageError> {
        if self.programs.len() > MAX_PROGRAMS {
            return Err(ImageError::TooManyPrograms(self.programs.len()));
        }
        self.header
            .validate()
            .map_err(|source| ImageError::Record { index: 0, source })?;

        let mut records = Vec::with_capacity(self.programs.len() + 1);
        records.push(self.header.to_bytes());
        for (i, program) in self.programs.iter().enumerate() {
            program.validate().map_err(|source| ImageError::Record {
                index: i + 1,
                source,
            })?;
            records.push(program.to_bytes());
        }
        Ok(records)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ImageError> {
        Ok(self.to_records()?.concat())
    }

    pub fn load(path: &Path) -> Result<Self, ImageError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn save(&self, path: &Path) -> Result<(), ImageError> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}
