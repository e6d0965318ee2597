use chrono::NaiveDate;
use dw4_core::ProgramFile;

use crate::link::{LinkError, MemoryLink, download, upload};
use crate::profile::{DeviceModel, DeviceProfile};
use crate::test_utils::{aspirate, dispense, program, soak};
use crate::Error;

fn file() -> ProgramFile {
    let mut file = ProgramFile::new("Plate wash");
    file.created = NaiveDate::from_ymd_opt(2025, 1, 31);
    file.programs.push(program([aspirate(0), dispense(1, 50), soak(30)]));
    file
}

#[test]
fn upload_then_download() {
    let mut link = MemoryLink::new(1, 0x13);
    let profile = DeviceProfile::default();

    let model = upload(&mut link, 1, &profile, &file()).unwrap();
    assert_eq!(model, DeviceModel(0x13));
    assert_eq!(link.records().len(), 2);

    let back = download(&mut link, 1, &profile, &()).unwrap();
    assert_eq!(back, file());
}

#[test]
fn wrong_port() {
    let mut link = MemoryLink::new(1, 0x13);
    let err = upload(&mut link, 2, &DeviceProfile::default(), &file()).unwrap_err();
    assert!(matches!(err, Error::LinkFailure(LinkError::NotConnected(2))), "{err}");

    let mut link = MemoryLink::disconnected();
    let err = download(&mut link, 1, &DeviceProfile::default(), &()).unwrap_err();
    assert!(matches!(err, Error::LinkFailure(LinkError::NotConnected(1))), "{err}");
}

#[test]
fn generation_mismatch_sends_nothing() {
    let mut link = MemoryLink::new(1, 0x12);
    let err = upload(&mut link, 1, &DeviceProfile::default(), &file()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedDeviceGeneration { code: 0x12, .. }), "{err}");
    assert!(link.records().is_empty());

    let err = upload(&mut MemoryLink::new(1, 0x20), 1, &DeviceProfile::legacy(), &file()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedDeviceGeneration { code: 0x20, .. }), "{err}");
}

#[test]
fn encode_failure_sends_nothing() {
    let mut bad = file();
    bad.programs[0].push(soak(0));
    let mut link = MemoryLink::new(1, 0x13);
    let err = upload(&mut link, 1, &DeviceProfile::default(), &bad).unwrap_err();
    assert!(matches!(err.root(), Error::MalformedStep { .. }), "{err}");
    assert!(link.records().is_empty());
}

#[test]
fn empty_device() {
    let mut link = MemoryLink::new(1, 0x13);
    let err = download(&mut link, 1, &DeviceProfile::default(), &()).unwrap_err();
    assert!(matches!(err, Error::LinkFailure(LinkError::Transfer(_))), "{err}");
}

#[test]
fn legacy_device_roundtrip() {
    let records = crate::encode_records(&file(), &DeviceProfile::legacy()).unwrap();
    let mut link = MemoryLink::new(3, 0x11).with_records(records);
    let back = download(&mut link, 3, &DeviceProfile::legacy(), &()).unwrap();
    assert_eq!(back, file());
}
