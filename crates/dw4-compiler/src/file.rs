//! Whole program files: header plus one record per program.

use chrono::Local;
use dw4_bytecode::{FileImage, HeaderRecord, ImageError, MAX_PROGRAMS, Record};
use dw4_core::ProgramFile;
use log::{debug, info};

use crate::assemble::{CapacityError, assemble};
use crate::disassemble::disassemble;
use crate::library::PlateLibrary;
use crate::profile::DeviceProfile;
use crate::{Error, Result};

/// Assemble every program of `file`. Files without a creation date are
/// stamped with today's.
pub fn encode_file(file: &ProgramFile, profile: &DeviceProfile) -> Result<FileImage> {
    if file.programs.len() > MAX_PROGRAMS {
        return Err(CapacityError::Programs(file.programs.len()).into());
    }

    let created = file.created.unwrap_or_else(|| Local::now().date_naive());
    let header = HeaderRecord::new(file.name.clone(), Some(created));
    header
        .validate()
        .map_err(|source| ImageError::Record { index: 0, source })?;

    let mut image = FileImage::new(header);
    for (i, program) in file.programs.iter().enumerate() {
        let number = i + 1;
        let record = assemble(program, number as u8, profile)
            .map_err(|e| e.in_program(number, &program.name))?;
        image.programs.push(record);
    }
    info!("encoded `{}`: {} programs", file.name, image.programs.len());
    Ok(image)
}

/// Disassemble every program of `image`.
pub fn decode_file(
    image: &FileImage,
    profile: &DeviceProfile,
    library: &impl PlateLibrary,
) -> Result<ProgramFile> {
    let mut file = ProgramFile::new(image.header.file_name.clone());
    file.created = image.header.created;
    for (i, record) in image.programs.iter().enumerate() {
        if record.number as usize != i + 1 {
            debug!("record {} carries program number {}", i + 1, record.number);
        }
        let program = disassemble(record, i, profile, library)
            .map_err(|e| e.in_program(i + 1, &record.name))?;
        file.programs.push(program);
    }
    info!("decoded `{}`: {} programs", file.name, file.programs.len());
    Ok(file)
}

/// [`encode_file`] straight to the record matrix sent to a device.
pub fn encode_records(file: &ProgramFile, profile: &DeviceProfile) -> Result<Vec<Record>> {
    Ok(encode_file(file, profile)?.to_records()?)
}

/// [`decode_file`] straight from a record matrix read from a device.
pub fn decode_records(
    records: &[Record],
    profile: &DeviceProfile,
    library: &impl PlateLibrary,
) -> Result<ProgramFile> {
    decode_file(&FileImage::from_records(records)?, profile, library)
}
