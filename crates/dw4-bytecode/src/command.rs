//! Command bytes and instruction slots.
//!
//! Command byte map:
//!
//! | Byte    | Command                                   | Value                       |
//! |---------|-------------------------------------------|-----------------------------|
//! | 0       | end of program                            | 0                           |
//! | 1-3     | aspirate, velocity 0-2                    | time << 8 \| probe height   |
//! | 10      | ASP-offset change                         | signed offset (0.1 mm)      |
//! | 11-13   | aspirate with sweep, velocity 0-2         | time << 8 \| probe height   |
//! | 20-23   | dispense at default pressure, inlet 1-4   | volume (0.1 µl)             |
//! | 30      | soak                                      | seconds                     |
//! | 40-49   | repeat 1-10 times                         | 1-based slot of loop start  |
//! | 50-53   | dispense at inlet pressure, inlet 1-4     | volume (0.1 µl)             |
//! | 60      | row select, mask bits 0-15                | mask low half               |
//! | 61      | row select, mask bits 16-31               | mask high half              |

use std::fmt;

use dw4_core::{Inlet, Velocity};

/// Decoded command byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    End,
    OffsetChange,
    Aspirate { velocity: Velocity, sweep: bool },
    /// `default_pressure` selects the short form (20-23) over the long form (50-53).
    Dispense { inlet: Inlet, default_pressure: bool },
    Soak,
    Repeat { repeats: u8 },
    RowsLow,
    RowsHigh,
}

impl Command {
    pub fn from_byte(byte: u8) -> Option<Self> {
        let cmd = match byte {
            0 => Self::End,
            1..=3 | 11..=13 => Self::Aspirate {
                velocity: Velocity::from_code((byte % 10) - 1)?,
                sweep: byte > 10,
            },
            10 => Self::OffsetChange,
            20..=23 => Self::Dispense {
                inlet: Inlet::new(byte - 19)?,
                default_pressure: true,
            },
            30 => Self::Soak,
            40..=49 => Self::Repeat { repeats: byte - 39 },
            50..=53 => Self::Dispense {
                inlet: Inlet::new(byte - 49)?,
                default_pressure: false,
            },
            60 => Self::RowsLow,
            61 => Self::RowsHigh,
            _ => return None,
        };
        Some(cmd)
    }

    pub fn byte(self) -> u8 {
        match self {
            Self::End => 0,
            Self::Aspirate { velocity, sweep } => {
                let base = if sweep { 11 } else { 1 };
                base + velocity.code()
            }
            Self::OffsetChange => 10,
            Self::Dispense {
                inlet,
                default_pressure: true,
            } => 19 + inlet.get(),
            Self::Dispense {
                inlet,
                default_pressure: false,
            } => 49 + inlet.get(),
            Self::Soak => 30,
            Self::Repeat { repeats } => 39 + repeats,
            Self::RowsLow => 60,
            Self::RowsHigh => 61,
        }
    }

    /// Short name used in dumps.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::End => "end",
            Self::OffsetChange => "offset",
            Self::Aspirate { sweep: false, .. } => "asp",
            Self::Aspirate { sweep: true, .. } => "asp.sweep",
            Self::Dispense {
                default_pressure: true,
                ..
            } => "disp",
            Self::Dispense {
                default_pressure: false,
                ..
            } => "disp.p",
            Self::Soak => "soak",
            Self::Repeat { .. } => "repeat",
            Self::RowsLow => "rows.lo",
            Self::RowsHigh => "rows.hi",
        }
    }

    /// Slots that do not start a step of their own: offset changes, repeats,
    /// and the low half of a row select. Repeat operands are adjusted by the
    /// number of these that precede the loop start.
    pub fn is_bookkeeping(self) -> bool {
        matches!(self, Self::OffsetChange | Self::Repeat { .. } | Self::RowsLow)
    }

    /// Slots that open a two-slot pair with the slot after them.
    pub fn opens_pair(self) -> bool {
        matches!(self, Self::OffsetChange | Self::RowsLow)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// One entry of the instruction table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Slot {
    pub command: u8,
    pub value: u16,
}

impl Slot {
    pub const END: Self = Self {
        command: 0,
        value: 0,
    };

    pub fn new(command: Command, value: u16) -> Self {
        Self {
            command: command.byte(),
            value,
        }
    }

    pub fn decode(self) -> Option<Command> {
        Command::from_byte(self.command)
    }

    pub fn is_end(self) -> bool {
        self.command == 0
    }

    /// Value reinterpreted as a signed 16-bit quantity (offset changes).
    pub fn signed_value(self) -> i16 {
        self.value as i16
    }
}
