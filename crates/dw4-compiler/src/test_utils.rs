//! Program fixtures shared by the compiler tests.

use dw4_core::{
    AspOffset, Aspirate, AspirateTime, Density, Dispense, Inlet, LiquidFactor, Orientation,
    PlateCard, PlateDimension, PlateFormat, Pressure, ProbeHeight, Program, RowOnly, Soak,
    SoakTime, Step, Velocity, Volume, WellSelection, WellSpacing,
};

/// A 1536-well row-mode plate selecting the first two encoder steps.
pub fn plate() -> PlateCard {
    plate_with(PlateFormat::new(Density::W1536, Orientation::Rows), "ABCD")
}

pub fn plate_with(format: PlateFormat, selection: &str) -> PlateCard {
    let mut plate = PlateCard::new("Greiner 1536", format);
    plate.height = PlateDimension(1040);
    plate.depth = PlateDimension(500);
    plate.row_offset = PlateDimension(786);
    plate.row_spacing = WellSpacing(2250);
    plate.max_volume = Volume(120);
    plate.selection = WellSelection::new(selection);
    plate
}

pub fn program(steps: impl IntoIterator<Item = Step>) -> Program {
    let mut program = Program::new("Wash", plate());
    for step in steps {
        program.push(step);
    }
    program
}

pub fn aspirate(offset: i16) -> Step {
    Aspirate {
        velocity: Velocity::Low,
        sweep: false,
        time: AspirateTime(20),
        height: ProbeHeight(10),
        asp_offset: AspOffset(offset),
    }
    .into()
}

pub fn dispense(inlet: u8, volume: u16) -> Step {
    Dispense {
        inlet: Inlet::new(inlet).unwrap(),
        volume: Volume(volume),
        liquid_factor: LiquidFactor::UNITY,
        pressure: Pressure::DEFAULT,
    }
    .into()
}

pub fn soak(seconds: u16) -> Step {
    Soak {
        time: SoakTime(seconds),
    }
    .into()
}

pub fn rows(selection: &str) -> Step {
    RowOnly {
        selection: WellSelection::new(selection),
    }
    .into()
}
