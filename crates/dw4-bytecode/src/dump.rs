//! Human-readable dump of a program file.

use std::fmt::Write as _;

use dw4_core::{
    AspOffset, AspirateTime, Colors, Inlet, PlateFormat, ProbeHeight, Volume,
};

use crate::command::{Command, Slot};
use crate::image::FileImage;
use crate::record::{HeaderRecord, ProgramRecord};

/// Render the header and every program record.
pub fn dump(image: &FileImage, colors: Colors) -> String {
    let mut out = String::new();
    dump_header(&mut out, &image.header, &colors);
    for program in &image.programs {
        out.push('\n');
        dump_program(&mut out, program, &colors);
    }
    out
}

fn dump_header(out: &mut String, header: &HeaderRecord, c: &Colors) {
    writeln!(out, "{}[header]{}", c.blue, c.reset).unwrap();
    field(out, c, "file", &header.file_name);
    let created = match header.created {
        Some(date) => date.to_string(),
        None => "-".to_string(),
    };
    field(out, c, "created", &created);
}

fn dump_program(out: &mut String, p: &ProgramRecord, c: &Colors) {
    writeln!(out, "{}[program {}]{} {}", c.blue, p.number, c.reset, p.name).unwrap();

    let format = match PlateFormat::from_record(p.format, p.column_flag) {
        Some(format) => format!("{} ({})", p.format, format),
        None => format!("{} (unknown, column flag {})", p.format, p.column_flag),
    };
    field(out, c, "plate", &p.plate_name);
    field(out, c, "format", &format);
    field(out, c, "height", &p.height.to_string());
    field(out, c, "depth", &p.depth.to_string());
    field(out, c, "offset", &p.offset.to_string());
    field(out, c, "max-volume", &p.max_volume.to_string());
    field(out, c, "spacing", &p.spacing.to_string());
    field(out, c, "mask", &format!("{:#010x}", p.mask));
    field(out, c, "asp-offset", &p.asp_offset.to_string());

    let inlets: Vec<String> = Inlet::all()
        .map(|inlet| {
            format!(
                "{}/{}",
                p.liquid_factors[inlet.index()],
                p.pressures[inlet.index()]
            )
        })
        .collect();
    field(out, c, "inlets", &inlets.join(" "));

    writeln!(out, "{}[slots]{}", c.blue, c.reset).unwrap();
    for (i, slot) in p.slots.iter().enumerate() {
        dump_slot(out, i + 1, *slot, c);
        if slot.is_end() {
            break;
        }
    }
}

fn dump_slot(out: &mut String, number: usize, slot: Slot, c: &Colors) {
    let (mnemonic, operand) = match slot.decode() {
        Some(cmd) => (cmd.mnemonic(), describe_operand(cmd, slot)),
        None => ("?", format!("{:#06x}", slot.value)),
    };
    let line = format!(
        "{}{:>2}{}  {}{:<10}{} {:>3}  {}",
        c.dim, number, c.reset, c.yellow, mnemonic, c.reset, slot.command, operand
    );
    writeln!(out, "{}", line.trim_end()).unwrap();
}

fn describe_operand(cmd: Command, slot: Slot) -> String {
    let v = slot.value;
    match cmd {
        Command::End => String::new(),
        Command::OffsetChange => AspOffset(slot.signed_value()).to_string(),
        Command::Aspirate { velocity, .. } => format!(
            "v={} t={} h={}",
            velocity.code(),
            AspirateTime((v >> 8) as u8),
            ProbeHeight(v as u8)
        ),
        Command::Dispense { .. } => Volume(v).to_string(),
        Command::Soak => v.to_string(),
        Command::Repeat { repeats } => format!("x{} from slot {}", repeats, v),
        Command::RowsLow | Command::RowsHigh => format!("{:#06x}", v),
    }
}

fn field(out: &mut String, c: &Colors, name: &str, value: &str) {
    let line = format!("{}{:<11}{} {}", c.blue, name, c.reset, value);
    writeln!(out, "{}", line.trim_end()).unwrap();
}
