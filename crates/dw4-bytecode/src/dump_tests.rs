use chrono::NaiveDate;
use dw4_core::{
    AspOffset, Colors, LiquidFactor, PlateDimension, Pressure, Volume, WellSpacing,
};

use crate::command::Slot;
use crate::dump::dump;
use crate::image::FileImage;
use crate::record::{HeaderRecord, ProgramRecord};

fn sample_image() -> FileImage {
    let mut program = ProgramRecord::new(1);
    program.name = "Wash".into();
    program.plate_name = "Greiner".into();
    program.format = 1;
    program.height = PlateDimension(1040);
    program.depth = PlateDimension(500);
    program.offset = PlateDimension(125);
    program.max_volume = Volume(120);
    program.spacing = WellSpacing(2250);
    program.mask = 0xF;
    program.asp_offset = AspOffset::ZERO;
    program.liquid_factors[0] = LiquidFactor(100);
    program.pressures[0] = Pressure(550);
    program.slots[0] = Slot { command: 10, value: (-10i16) as u16 };
    program.slots[1] = Slot { command: 1, value: 0x140A };
    program.slots[2] = Slot { command: 20, value: 50 };
    program.slots[3] = Slot { command: 30, value: 30 };

    FileImage {
        header: HeaderRecord::new("DEMO", NaiveDate::from_ymd_opt(2024, 1, 31)),
        programs: vec![program],
    }
}

#[test]
fn dump_program_file() {
    insta::assert_snapshot!(dump(&sample_image(), Colors::OFF), @r"
[header]
file        DEMO
created     2024-01-31

[program 1] Wash
plate       Greiner
format      1 (96-well rows)
height      10.40
depth       5.00
offset      1.25
max-volume  12.0
spacing     2.250
mask        0x0000000f
asp-offset  0.0
inlets      1.00/550 0.00/0 0.00/0 0.00/0
[slots]
 1  offset      10  -1.0
 2  asp          1  v=0 t=2.0 h=1.0
 3  disp        20  5.0
 4  soak        30  30
 5  end          0
");
}

#[test]
fn dump_marks_unknown_commands_and_formats() {
    let mut image = sample_image();
    image.header.created = None;
    image.programs[0].format = 9;
    image.programs[0].slots[3] = Slot { command: 99, value: 7 };

    let out = dump(&image, Colors::OFF);
    assert!(out.contains("created     -\n"));
    assert!(out.contains("format      9 (unknown, column flag 0)\n"));
    assert!(out.contains(" 4  ?           99  0x0007\n"));
    assert!(out.contains(" 5  end          0"));
}

#[test]
fn dump_repeat_and_rows() {
    let mut image = sample_image();
    let slots = &mut image.programs[0].slots;
    slots[4] = Slot { command: 60, value: 0x00F0 };
    slots[5] = Slot { command: 61, value: 0x0001 };
    slots[6] = Slot { command: 42, value: 3 };

    let out = dump(&image, Colors::OFF);
    assert!(out.contains(" 5  rows.lo     60  0x00f0\n"));
    assert!(out.contains(" 6  rows.hi     61  0x0001\n"));
    assert!(out.contains(" 7  repeat      42  x3 from slot 3\n"));
    assert!(out.contains(" 8  end          0"));
}

#[test]
fn dump_with_colors() {
    let out = dump(&sample_image(), Colors::ON);
    assert!(out.starts_with("\x1b[34m[header]\x1b[0m\n"));
    assert!(out.contains("\x1b[33moffset    \x1b[0m"));
}
