//! Slot table capacity.
//!
//! The device executes at most 49 logical steps per program. Every emitted
//! slot counts, and so does every repeat loop; a row select needs one more
//! slot of headroom because it occupies two.

use dw4_bytecode::MAX_PROGRAMS;

pub const MAX_LOGICAL_STEPS: u32 = 49;
pub const MAX_ROW_SELECT_STEPS: u32 = 48;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CapacityError {
    #[error("step {step} brings the program to {used} logical steps, the limit is {limit}")]
    Steps { step: usize, used: u32, limit: u32 },

    #[error("{0} programs exceed the limit of {MAX_PROGRAMS} per file")]
    Programs(usize),
}

/// Running logical-step count of one program.
#[derive(Debug)]
pub(crate) struct Budget {
    used: u32,
}

impl Budget {
    /// Loops are charged up front.
    pub(crate) fn new(loops: usize) -> Self {
        Self { used: loops as u32 }
    }

    /// Charge `weight` slots for step `step`.
    pub(crate) fn admit(&mut self, step: usize, weight: u32, row_select: bool) -> Result<(), CapacityError> {
        let used = self.used + weight;
        let limit = if row_select {
            MAX_ROW_SELECT_STEPS
        } else {
            MAX_LOGICAL_STEPS
        };
        if used > limit {
            return Err(CapacityError::Steps { step, used, limit });
        }
        self.used = used;
        Ok(())
    }

    pub(crate) fn used(&self) -> u32 {
        self.used
    }
}
