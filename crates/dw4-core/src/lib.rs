#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Program model for the DW4/BNX1536 1536-well liquid handler.
//!
//! A [`ProgramFile`] holds up to 99 [`Program`]s. Each program starts with a
//! [`PlateCard`] and continues with [`Step`]s (row selection, aspirate,
//! dispense, soak) plus [`RepeatLoop`]s laid over them. Physical quantities use
//! the fixed-point types in [`units`].
//!
//! This crate knows nothing about the binary format; see `dw4-bytecode` and
//! `dw4-compiler` for that.

pub mod colors;
pub mod plate;
pub mod program;
pub mod step;
pub mod units;

#[cfg(test)]
mod program_tests;

pub use colors::Colors;
pub use plate::{Density, Orientation, PlateFormat, WellShape};
pub use program::{LoopSpan, Program, ProgramFile, RepeatLoop, StepId};
pub use step::{Aspirate, Dispense, Inlet, PlateCard, RowOnly, Soak, Step, Velocity, WellSelection};
pub use units::{
    AspOffset, AspirateTime, LiquidFactor, PlateDimension, Pressure, ProbeHeight, SoakTime,
    Volume, WellSpacing,
};

/// Invalid edits and conversions on the program model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("unknown plate format code {0}")]
    FormatCode(u8),

    #[error("inlet {0} is outside 1..=4")]
    Inlet(u8),

    #[error("no step at position {0}")]
    StepPosition(usize),

    #[error("step {0} is not part of this program")]
    UnknownStep(StepId),

    #[error("loop starts at step {to} but ends earlier, at step {from}")]
    LoopOrder { to: usize, from: usize },

    #[error("loop over steps {to}..={from} overlaps another loop")]
    LoopOverlap { to: usize, from: usize },

    #[error("repeat count {0} is outside 1..=10")]
    RepeatCount(u8),
}
