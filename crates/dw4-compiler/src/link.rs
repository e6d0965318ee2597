//! Transfer of program files to and from an instrument.
//!
//! The serial protocol itself lives outside this crate; [`DeviceLink`] is the
//! seam. Transfers check the device generation against the profile before
//! any data moves, and encode the whole file before anything is sent.

use dw4_bytecode::Record;
use dw4_core::ProgramFile;
use log::info;

use crate::file::{decode_records, encode_records};
use crate::library::PlateLibrary;
use crate::profile::{DeviceModel, DeviceProfile};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    #[error("no device on port {0}")]
    NotConnected(u8),

    #[error("transfer failed: {0}")]
    Transfer(String),
}

/// Connection to an instrument.
pub trait DeviceLink {
    fn is_machine_connected(&mut self, port: u8) -> bool;

    /// Model code the device reports.
    fn device_code(&mut self, port: u8) -> std::result::Result<u8, LinkError>;

    /// Read the record matrix stored on the device.
    fn get_file(&mut self) -> std::result::Result<Vec<Record>, LinkError>;

    /// Replace the device's record matrix.
    fn put_file(&mut self, records: &[Record]) -> std::result::Result<(), LinkError>;
}

/// Encode `file` and send it to the device on `port`.
pub fn upload(
    link: &mut impl DeviceLink,
    port: u8,
    profile: &DeviceProfile,
    file: &ProgramFile,
) -> Result<DeviceModel> {
    let model = connect(link, port, profile)?;
    let records = encode_records(file, profile)?;
    link.put_file(&records)?;
    info!("sent {} records to {} on port {}", records.len(), model.name(), port);
    Ok(model)
}

/// Read the device's program file and decode it.
pub fn download(
    link: &mut impl DeviceLink,
    port: u8,
    profile: &DeviceProfile,
    library: &impl PlateLibrary,
) -> Result<ProgramFile> {
    let model = connect(link, port, profile)?;
    let records = link.get_file()?;
    info!("read {} records from {} on port {}", records.len(), model.name(), port);
    decode_records(&records, profile, library)
}

fn connect(link: &mut impl DeviceLink, port: u8, profile: &DeviceProfile) -> Result<DeviceModel> {
    if !link.is_machine_connected(port) {
        return Err(LinkError::NotConnected(port).into());
    }
    let code = link.device_code(port)?;
    profile.check_device(code)
}

/// In-memory device, for tests and dry runs.
#[derive(Clone, Debug, Default)]
pub struct MemoryLink {
    port: Option<u8>,
    device_code: u8,
    records: Vec<Record>,
}

impl MemoryLink {
    pub fn new(port: u8, device_code: u8) -> Self {
        Self {
            port: Some(port),
            device_code,
            records: Vec::new(),
        }
    }

    /// A link with nothing plugged in.
    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn with_records(mut self, records: Vec<Record>) -> Self {
        self.records = records;
        self
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

impl DeviceLink for MemoryLink {
    fn is_machine_connected(&mut self, port: u8) -> bool {
        self.port == Some(port)
    }

    fn device_code(&mut self, port: u8) -> std::result::Result<u8, LinkError> {
        if self.port != Some(port) {
            return Err(LinkError::NotConnected(port));
        }
        Ok(self.device_code)
    }

    fn get_file(&mut self) -> std::result::Result<Vec<Record>, LinkError> {
        if self.records.is_empty() {
            return Err(LinkError::Transfer("device holds no program file".to_string()));
        }
        Ok(self.records.clone())
    }

    fn put_file(&mut self, records: &[Record]) -> std::result::Result<(), LinkError> {
        self.records = records.to_vec();
        Ok(())
    }
}
