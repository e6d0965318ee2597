//! Lowering of program steps to instruction slots.
//!
//! Each step becomes one slot, or two for row selects and for aspirates that
//! change the ASP-offset. Repeat loops add one slot after their body whose
//! value is the 1-based slot number the device jumps back to.

use dw4_bytecode::{Command, ProgramRecord, SLOT_COUNT, Slot};
use dw4_core::{
    AspOffset, Inlet, LiquidFactor, Pressure, Program, SoakTime, Step, WellSelection,
};
use log::debug;

use super::capacity::Budget;
use crate::profile::DeviceProfile;
use crate::selection::SelectionCodec;
use crate::{Error, Result};

/// Assemble `program` as record `number` (1-99) for the given device.
pub fn assemble(program: &Program, number: u8, profile: &DeviceProfile) -> Result<ProgramRecord> {
    Assembler::new(program, profile).assemble(number)
}

/// Logical steps `program` occupies, or the first step that does not fit.
pub fn logical_steps(program: &Program, profile: &DeviceProfile) -> Result<u32> {
    let (_, budget) = Assembler::new(program, profile).lower()?;
    Ok(budget.used())
}

pub struct Assembler<'a> {
    program: &'a Program,
    profile: &'a DeviceProfile,
    codec: SelectionCodec,
}

impl<'a> Assembler<'a> {
    pub fn new(program: &'a Program, profile: &'a DeviceProfile) -> Self {
        let codec = SelectionCodec::new(profile.generation(), program.plate.format);
        Self {
            program,
            profile,
            codec,
        }
    }

    pub fn assemble(&self, number: u8) -> Result<ProgramRecord> {
        let (lowered, budget) = self.lower()?;

        let mut record = self.plate_fields(number)?;
        self.inlet_fields(&mut record)?;
        record
            .validate()
            .map_err(|e| Error::malformed(0, e.to_string()))?;

        let table = self.lay_out(lowered);
        debug!(
            "program {} `{}`: {} steps, {} logical, {} slots",
            number,
            self.program.name,
            self.program.len(),
            budget.used(),
            table.len()
        );
        record.slots[..table.len()].copy_from_slice(&table);
        if record.is_terminator() {
            return Err(Error::malformed(
                0,
                "a program without a name needs at least one step",
            ));
        }
        Ok(record)
    }

    /// Slots of each step, in program order, checked against the step budget.
    fn lower(&self) -> Result<(Vec<Vec<Slot>>, Budget)> {
        let mut budget = Budget::new(self.program.loops().len());
        let mut last_offset = self.program.plate.asp_offset;
        let mut lowered = Vec::with_capacity(self.program.len());

        for (i, (_, step)) in self.program.steps().enumerate() {
            let position = i + 1;
            let slots = match step {
                Step::RowOnly(row) => {
                    let mask = self.pack_mask(position, &row.selection)?;
                    vec![
                        Slot::new(Command::RowsLow, mask as u16),
                        Slot::new(Command::RowsHigh, (mask >> 16) as u16),
                    ]
                }
                Step::Aspirate(asp) => {
                    let mut slots = Vec::with_capacity(2);
                    if asp.asp_offset != last_offset {
                        slots.push(offset_change(asp.asp_offset));
                        last_offset = asp.asp_offset;
                    }
                    let command = Command::Aspirate {
                        velocity: asp.velocity,
                        sweep: asp.sweep,
                    };
                    let value = (asp.time.raw() as u16) << 8 | asp.height.raw() as u16;
                    slots.push(Slot::new(command, value));
                    slots
                }
                Step::Dispense(disp) => {
                    let command = Command::Dispense {
                        inlet: disp.inlet,
                        default_pressure: disp.pressure == self.profile.default_pressure,
                    };
                    vec![Slot::new(command, disp.volume.raw())]
                }
                Step::Soak(soak) => {
                    if !(SoakTime::MIN..=SoakTime::MAX).contains(&soak.time) {
                        return Err(Error::malformed(
                            position,
                            format!(
                                "soak time {} is outside {}..={}",
                                soak.time,
                                SoakTime::MIN,
                                SoakTime::MAX
                            ),
                        ));
                    }
                    vec![Slot::new(Command::Soak, soak.time.raw())]
                }
            };
            budget.admit(position, slots.len() as u32, step.is_row_only())?;
            lowered.push(slots);
        }

        Ok((lowered, budget))
    }

    /// Record fields taken from the plate card.
    fn plate_fields(&self, number: u8) -> Result<ProgramRecord> {
        let plate = &self.program.plate;
        let mut record = ProgramRecord::new(number);
        record.name = self.program.name.clone();
        record.column_flag = plate.format.orientation.flag();
        record.plate_name = plate.name.clone();
        record.format = plate.format.record_code();
        record.height = plate.height;
        record.depth = plate.depth;
        record.offset = plate.active_offset();
        record.max_volume = plate.max_volume;
        record.spacing = plate.active_spacing();
        record.mask = self.pack_mask(0, &plate.selection)?;
        record.asp_offset = plate.asp_offset;
        Ok(record)
    }

    /// Liquid factor and pressure per inlet. Every dispense through an inlet
    /// must agree on both; inlets no step uses stay zero.
    fn inlet_fields(&self, record: &mut ProgramRecord) -> Result<()> {
        let mut seen: [Option<(LiquidFactor, Pressure, usize)>; Inlet::COUNT] =
            [None; Inlet::COUNT];

        for (i, (_, step)) in self.program.steps().enumerate() {
            let Step::Dispense(disp) = step else {
                continue;
            };
            let position = i + 1;
            match seen[disp.inlet.index()] {
                None => {
                    seen[disp.inlet.index()] = Some((disp.liquid_factor, disp.pressure, position))
                }
                Some((factor, pressure, first)) => {
                    if factor != disp.liquid_factor || pressure != disp.pressure {
                        return Err(Error::malformed(
                            position,
                            format!(
                                "inlet {} dispenses at factor {} / {} mbar, but step {} uses factor {} / {} mbar",
                                disp.inlet.get(),
                                disp.liquid_factor,
                                disp.pressure,
                                first,
                                factor,
                                pressure
                            ),
                        ));
                    }
                }
            }
        }

        for (i, settings) in seen.into_iter().enumerate() {
            if let Some((factor, pressure, _)) = settings {
                record.liquid_factors[i] = factor;
                record.pressures[i] = pressure;
            }
        }
        Ok(())
    }

    /// Flatten lowered steps into the slot table and insert repeat slots.
    fn lay_out(&self, lowered: Vec<Vec<Slot>>) -> Vec<Slot> {
        let mut table = Vec::with_capacity(SLOT_COUNT);
        // ends[i]: slot index just past step i + 1
        let mut ends = Vec::with_capacity(lowered.len());
        for slots in lowered {
            table.extend(slots);
            ends.push(table.len());
        }

        // Last loop first, so earlier insertion points stay valid.
        let mut spans = self.program.loop_spans();
        spans.sort_by(|a, b| b.to.cmp(&a.to));
        for span in &spans {
            let repeat = Slot::new(
                Command::Repeat {
                    repeats: span.repeats,
                },
                span.body_len() as u16,
            );
            table.insert(ends[span.from - 1], repeat);
        }

        resolve_jumps(&mut table);
        table
    }

    fn pack_mask(&self, step: usize, selection: &WellSelection) -> Result<u32> {
        let mask = self.codec.parse(selection.as_str())?;
        mask.to_u32().ok_or_else(|| {
            Error::malformed(
                step,
                format!("selection `{selection}` needs more than 32 mask bits"),
            )
        })
    }
}

fn offset_change(offset: AspOffset) -> Slot {
    Slot::new(Command::OffsetChange, offset.raw() as u16)
}

/// Replace each repeat slot's body length (in steps) by the 1-based slot
/// number of the body's first slot.
///
/// Counting backward from the repeat slot, a slot whose predecessor opens a
/// pair (offset change, low row-select half) belongs to that predecessor and
/// is not counted on its own.
fn resolve_jumps(table: &mut [Slot]) {
    for i in 0..table.len() {
        if !matches!(table[i].decode(), Some(Command::Repeat { .. })) {
            continue;
        }
        let mut remaining = table[i].value;
        let mut target = i;
        let mut j = i;
        while remaining > 0 && j > 0 {
            j -= 1;
            if j > 0 && opens_pair(table[j - 1]) {
                continue;
            }
            remaining -= 1;
            target = j;
        }
        table[i].value = target as u16 + 1;
    }
}

fn opens_pair(slot: Slot) -> bool {
    slot.decode().is_some_and(Command::opens_pair)
}
