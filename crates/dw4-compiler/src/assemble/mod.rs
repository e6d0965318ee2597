//! Program → program record.

mod assembler;
mod capacity;

#[cfg(test)]
mod capacity_tests;

pub use assembler::{Assembler, assemble, logical_steps};
pub use capacity::{CapacityError, MAX_LOGICAL_STEPS, MAX_ROW_SELECT_STEPS};
