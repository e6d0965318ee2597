use chrono::NaiveDate;
use dw4_core::{AspOffset, LiquidFactor, PlateDimension, Pressure, Volume, WellSpacing};

use crate::command::Slot;
use crate::constants::*;
use crate::record::{HeaderRecord, ProgramRecord, RecordError, check_text};

fn sample() -> ProgramRecord {
    let mut r = ProgramRecord::new(7);
    r.name = "Wash 1536".into();
    r.column_flag = 1;
    r.plate_name = "Greiner".into();
    r.format = 13;
    r.height = PlateDimension(1040);
    r.depth = PlateDimension(0x0102);
    r.offset = PlateDimension(125);
    r.max_volume = Volume(120);
    r.spacing = WellSpacing(1125);
    r.mask = 0x8001_0003;
    r.asp_offset = AspOffset(-15);
    r.liquid_factors = [LiquidFactor(100), LiquidFactor(0), LiquidFactor(85), LiquidFactor(0)];
    r.pressures = [Pressure(550), Pressure(0), Pressure(600), Pressure(0)];
    r.slots[0] = Slot { command: 1, value: 0x140A };
    r.slots[1] = Slot { command: 52, value: 50 };
    r
}

#[test]
fn program_record_layout() {
    let bytes = sample().to_bytes();

    assert_eq!(bytes[NUMBER], 7);
    assert_eq!(&bytes[1..10], b"Wash 1536");
    assert_eq!(bytes[10], 0);
    assert_eq!(bytes[33], 0);
    assert_eq!(bytes[34], 0);
    assert_eq!(bytes[35], 1);
    assert_eq!(&bytes[36..43], b"Greiner");
    assert_eq!(bytes[68], 0);
    assert_eq!(bytes[69], 13);
    assert_eq!(&bytes[70..72], &1040u16.to_le_bytes());
    assert_eq!(&bytes[72..74], &[0x02, 0x01]);
    assert_eq!(&bytes[74..76], &125u16.to_le_bytes());
    assert_eq!(&bytes[76..78], &120u16.to_le_bytes());
    assert_eq!(&bytes[78..80], &1125u16.to_le_bytes());
    assert_eq!(&bytes[80..84], &[0x03, 0x00, 0x01, 0x80]);
    assert_eq!(&bytes[84..86], &(-15i16).to_le_bytes());
    assert_eq!(&bytes[86..94], &[100, 0, 0, 0, 85, 0, 0, 0]);
    assert_eq!(&bytes[94..102], &[0x26, 0x02, 0, 0, 0x58, 0x02, 0, 0]);
    assert_eq!(&bytes[102..106], &[0, 0, 0, 0]);
    assert_eq!(&bytes[106..109], &[1, 52, 0]);
    // aspirate value: probe height in the low byte, time in the high byte
    assert_eq!(&bytes[156..158], &[0x0A, 0x14]);
    assert_eq!(&bytes[158..160], &[50, 0]);
    assert!(bytes[160..].iter().all(|&b| b == 0));
}

#[test]
fn program_record_roundtrip() {
    let record = sample();
    let back = ProgramRecord::from_bytes(&record.to_bytes()).unwrap();
    assert_eq!(back, record);
}

#[test]
fn record_length_is_checked() {
    assert_eq!(
        ProgramRecord::from_bytes(&[0u8; 255]),
        Err(RecordError::Length(255))
    );
    assert_eq!(
        HeaderRecord::from_bytes(&[0u8; 257]),
        Err(RecordError::Length(257))
    );
}

#[test]
fn used_slots_stop_at_end() {
    let record = sample();
    assert_eq!(record.used_slots().len(), 2);

    let mut full = ProgramRecord::new(1);
    full.slots = [Slot { command: 30, value: 1 }; SLOT_COUNT];
    assert_eq!(full.used_slots().len(), SLOT_COUNT);
}

#[test]
fn terminator_records() {
    assert!(ProgramRecord::new(0).is_terminator());
    assert!(ProgramRecord::new(3).is_terminator());

    let mut named = ProgramRecord::new(3);
    named.name = "Plate only".into();
    assert!(!named.is_terminator());

    let mut unnamed = ProgramRecord::new(3);
    unnamed.slots[0] = Slot { command: 30, value: 5 };
    assert!(!unnamed.is_terminator());
}

#[test]
fn header_layout() {
    let header = HeaderRecord::new("PLATES", NaiveDate::from_ymd_opt(2024, 1, 31));
    let bytes = header.to_bytes();
    assert_eq!(bytes[0], 0);
    assert_eq!(&bytes[1..7], b"PLATES");
    assert_eq!(bytes[33], 0);
    assert_eq!(&bytes[34..42], b"31012024");
    assert_eq!(bytes[42], 0);
    assert!(bytes[43..].iter().all(|&b| b == 0));

    assert_eq!(HeaderRecord::from_bytes(&bytes).unwrap(), header);
}

#[test]
fn header_without_date() {
    let header = HeaderRecord::new("X", None);
    let bytes = header.to_bytes();
    assert!(bytes[34..43].iter().all(|&b| b == 0));
    assert_eq!(HeaderRecord::from_bytes(&bytes).unwrap(), header);
}

#[test]
fn header_with_garbled_date_decodes_without_it() {
    let mut bytes = HeaderRecord::new("X", None).to_bytes();
    bytes[34..42].copy_from_slice(b"99999999");
    let header = HeaderRecord::from_bytes(&bytes).unwrap();
    assert_eq!(header.file_name, "X");
    assert_eq!(header.created, None);
}

#[test]
fn names_are_latin1() {
    let mut record = ProgramRecord::new(1);
    record.name = "Tvätt".into();
    let bytes = record.to_bytes();
    assert_eq!(bytes[3], 0xE4);
    assert_eq!(ProgramRecord::from_bytes(&bytes).unwrap().name, "Tvätt");
}

#[test]
fn text_checks() {
    assert!(check_text("name", &"x".repeat(32)).is_ok());
    assert_eq!(
        check_text("name", &"x".repeat(33)),
        Err(RecordError::TextTooLong {
            field: "name",
            text: "x".repeat(33)
        })
    );
    assert!(matches!(
        check_text("name", "wash \u{2192} rinse"),
        Err(RecordError::TextEncoding { .. })
    ));
    assert!(matches!(
        check_text("name", "a\0b"),
        Err(RecordError::TextEncoding { .. })
    ));

    let mut record = ProgramRecord::new(1);
    record.plate_name = "y".repeat(40);
    assert!(matches!(
        record.validate(),
        Err(RecordError::TextTooLong { field: "plate name", .. })
    ));
}
