//! File loading shared by the commands. Errors are user-facing messages.

use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

use dw4_bytecode::FileImage;
use dw4_compiler::{DeviceProfile, PlateCatalog};
use dw4_core::ProgramFile;

/// Where the device profile comes from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ProfileSource {
    #[default]
    Default,
    Legacy,
    File(PathBuf),
}

impl ProfileSource {
    pub fn load(&self) -> Result<DeviceProfile, String> {
        match self {
            Self::Default => Ok(DeviceProfile::default()),
            Self::Legacy => Ok(DeviceProfile::legacy()),
            Self::File(path) => DeviceProfile::from_path(path)
                .map_err(|e| format!("invalid device profile '{}': {}", path.display(), e)),
        }
    }
}

pub fn load_programs(path: &Path) -> Result<ProgramFile, String> {
    let json = fs::read_to_string(path)
        .map_err(|e| format!("failed to read '{}': {}", path.display(), e))?;
    ProgramFile::from_json(&json)
        .map_err(|e| format!("invalid program file '{}': {}", path.display(), e))
}

pub fn load_image(path: &Path) -> Result<FileImage, String> {
    FileImage::load(path).map_err(|e| format!("failed to load '{}': {}", path.display(), e))
}

pub fn load_catalog(path: Option<&Path>) -> Result<Option<PlateCatalog>, String> {
    path.map(|path| {
        PlateCatalog::from_path(path)
            .map_err(|e| format!("invalid plate catalog '{}': {}", path.display(), e))
    })
    .transpose()
}

pub fn load_library(path: Option<&Path>) -> Result<Option<ProgramFile>, String> {
    path.map(load_programs).transpose()
}

/// Write to `path`, or to stdout without one.
pub fn write_output(path: Option<&Path>, text: &str) -> Result<(), String> {
    match path {
        Some(path) => fs::write(path, text)
            .map_err(|e| format!("failed to write '{}': {}", path.display(), e)),
        None => {
            print!("{}", text);
            Ok(())
        }
    }
}

/// Report `msg` and exit with status 1.
pub fn fail(msg: impl Display) -> ! {
    eprintln!("error: {}", msg);
    std::process::exit(1);
}
