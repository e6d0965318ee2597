//! Single forward scan of the slot table.

use dw4_bytecode::{Command, ProgramRecord, SLOT_COUNT};
use dw4_core::{
    AspOffset, Aspirate, AspirateTime, Dispense, LoopSpan, Orientation, PlateCard,
    PlateDimension, PlateFormat, ProbeHeight, Program, RowOnly, Soak, SoakTime, Volume,
    WellSelection, WellShape,
};
use log::warn;

use crate::library::PlateLibrary;
use crate::profile::DeviceProfile;
use crate::selection::{SelectionCodec, SelectionMask};
use crate::{Error, Result};

/// Well diameter implied by the largest ASP-offset magnitude a program uses:
/// the probe must stay inside the well, plus 0.8 mm of clearance.
pub fn control_diameter(max_offset: PlateDimension) -> PlateDimension {
    PlateDimension(max_offset.raw().saturating_mul(2).saturating_add(80))
}

/// Decode record `index` (zero-based position in its file).
///
/// Geometry the record does not carry comes from `library`; see
/// [`PlateLibrary`].
pub fn disassemble(
    record: &ProgramRecord,
    index: usize,
    profile: &DeviceProfile,
    library: &impl PlateLibrary,
) -> Result<Program> {
    let format = PlateFormat::from_record(record.format, record.column_flag).ok_or_else(|| {
        Error::malformed(
            0,
            format!(
                "unknown plate format {} with column flag {}",
                record.format, record.column_flag
            ),
        )
    })?;
    let codec = SelectionCodec::new(profile.generation(), format);

    let mut plate = PlateCard::new(record.plate_name.clone(), format);
    plate.height = record.height;
    plate.depth = record.depth;
    plate.max_volume = record.max_volume;
    plate.asp_offset = record.asp_offset;
    match format.orientation {
        Orientation::Rows => {
            plate.row_offset = record.offset;
            plate.row_spacing = record.spacing;
        }
        Orientation::Columns => {
            plate.column_offset = record.offset;
            plate.column_spacing = record.spacing;
        }
    }
    plate.selection = WellSelection::new(codec.format(SelectionMask(record.mask as u64))?);

    let mut program = Program::new(record.name.clone(), plate);
    let mut scan = Scan::new(record.asp_offset);

    for (i, slot) in record.slots.iter().enumerate() {
        let slot_number = i + 1;
        scan.bookkeeping_before.push(scan.bookkeeping);
        let step = program.len() + 1;

        let Some(command) = slot.decode() else {
            return Err(Error::malformed(
                step,
                format!("unknown command {} in slot {}", slot.command, slot_number),
            ));
        };
        if scan.rows_low.is_some() && command != Command::RowsHigh {
            return Err(Error::malformed(
                step,
                format!("row select in slot {} is missing its high half", slot_number - 1),
            ));
        }

        match command {
            Command::End => break,
            Command::OffsetChange => {
                scan.pending_offset = Some(AspOffset(slot.signed_value()));
            }
            Command::Aspirate { velocity, sweep } => {
                let asp_offset = scan.pending_offset.take().unwrap_or(scan.offset);
                scan.offset = asp_offset;
                scan.max_offset = scan.max_offset.max(asp_offset.magnitude());
                program.push(Aspirate {
                    velocity,
                    sweep,
                    time: AspirateTime((slot.value >> 8) as u8),
                    height: ProbeHeight(slot.value as u8),
                    asp_offset,
                });
            }
            Command::Dispense {
                inlet,
                default_pressure,
            } => {
                let mut pressure = record.pressures[inlet.index()];
                if default_pressure && pressure.raw() == 0 {
                    pressure = profile.default_pressure;
                }
                program.push(Dispense {
                    inlet,
                    volume: Volume(slot.value),
                    liquid_factor: record.liquid_factors[inlet.index()],
                    pressure,
                });
            }
            Command::Soak => {
                program.push(Soak {
                    time: SoakTime(slot.value),
                });
            }
            Command::Repeat { repeats } => {
                let span = scan.loop_span(slot.value as usize, slot_number, program.len(), repeats)?;
                scan.spans.push(span);
            }
            Command::RowsLow => scan.rows_low = Some(slot.value),
            Command::RowsHigh => {
                let Some(low) = scan.rows_low.take() else {
                    return Err(Error::malformed(
                        step,
                        format!("slot {} holds a row select high half without its low half", slot_number),
                    ));
                };
                let mask = SelectionMask::from_halves(low, slot.value);
                program.push(RowOnly {
                    selection: WellSelection::new(codec.format(mask)?),
                });
            }
        }

        if command.is_bookkeeping() {
            scan.bookkeeping += 1;
        }
    }

    if scan.rows_low.is_some() {
        return Err(Error::malformed(
            program.len() + 1,
            "slot table ends inside a row select",
        ));
    }
    if scan.pending_offset.is_some() {
        warn!(
            "program {} `{}`: ASP-offset change with no aspirate after it",
            record.number, record.name
        );
    }

    for span in scan.spans {
        program
            .add_loop_at(span.to, span.from, span.repeats)
            .map_err(|e| Error::malformed(span.from, e.to_string()))?;
    }

    fill_geometry(&mut program.plate, scan.max_offset, index, library);
    Ok(program)
}

/// State carried across slots.
struct Scan {
    /// ASP-offset of the last aspirate, initially the program default.
    offset: AspOffset,
    pending_offset: Option<AspOffset>,
    max_offset: PlateDimension,
    rows_low: Option<u16>,
    bookkeeping: usize,
    /// Bookkeeping slots among the first `k` slots, indexed by `k`.
    bookkeeping_before: Vec<usize>,
    spans: Vec<LoopSpan>,
}

impl Scan {
    fn new(default_offset: AspOffset) -> Self {
        Self {
            offset: default_offset,
            pending_offset: None,
            max_offset: default_offset.magnitude(),
            rows_low: None,
            bookkeeping: 0,
            bookkeeping_before: Vec::with_capacity(SLOT_COUNT),
            spans: Vec::new(),
        }
    }

    /// Loop closed by the repeat slot `slot_number`, jumping to slot `target`
    /// after `steps` decoded steps.
    fn loop_span(&self, target: usize, slot_number: usize, steps: usize, repeats: u8) -> Result<LoopSpan> {
        if target == 0 || target >= slot_number {
            return Err(Error::malformed(
                steps + 1,
                format!("repeat in slot {slot_number} jumps to slot {target}"),
            ));
        }
        let to = target - self.bookkeeping_before[target - 1];
        if to == 0 || to > steps {
            return Err(Error::malformed(
                steps + 1,
                format!("repeat in slot {slot_number} does not start at a step"),
            ));
        }
        Ok(LoopSpan::new(to, steps, repeats))
    }
}

/// Fill in the geometry records do not carry: the offset and spacing of the
/// other orientation, well diameter and shape.
fn fill_geometry(
    plate: &mut PlateCard,
    max_offset: PlateDimension,
    index: usize,
    library: &impl PlateLibrary,
) {
    let control = control_diameter(max_offset);
    match library.lookup(&plate.name, index) {
        Some(geometry) => {
            match plate.format.orientation {
                Orientation::Rows => {
                    plate.column_offset = geometry.column_offset;
                    plate.column_spacing = geometry.column_spacing;
                }
                Orientation::Columns => {
                    plate.row_offset = geometry.row_offset;
                    plate.row_spacing = geometry.row_spacing;
                }
            }
            plate.diameter = Some(geometry.diameter.max(control));
            plate.shape = Some(geometry.shape);
        }
        None if max_offset.raw() > 0 => {
            warn!(
                "plate `{}` not in library, diameter {} from ASP-offsets",
                plate.name, control
            );
            plate.diameter = Some(control);
            plate.shape = Some(WellShape::Flat);
        }
        None => {}
    }
}
