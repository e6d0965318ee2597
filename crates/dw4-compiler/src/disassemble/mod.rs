//! Program record → program.

mod disassembler;


pub use disassembler::{control_diameter, disassemble};
