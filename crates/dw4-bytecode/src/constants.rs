//! Record layout constants.
//!
//! Offsets are byte positions within one 256-byte record. Multi-byte fields
//! are little-endian.

/// Size of every record in a program file.
pub const RECORD_SIZE: usize = 256;

/// Instruction slots per program record.
pub const SLOT_COUNT: usize = 50;

/// Program records per file (the header record is extra).
pub const MAX_PROGRAMS: usize = 99;

/// Maximum length of a program, plate, or file name.
pub const NAME_LEN: usize = 32;

/// Length of the `ddMMyyyy` creation date in the header record.
pub const DATE_LEN: usize = 8;

// Shared by header and program records
pub const NUMBER: usize = 0;
pub const NAME: usize = 1;

// Header record
pub const DATE: usize = 34;

// Program record
pub const LOCAL_EDIT: usize = 34;
pub const COLUMN_FLAG: usize = 35;
pub const PLATE_NAME: usize = 36;
pub const FORMAT: usize = 69;
pub const HEIGHT: usize = 70;
pub const DEPTH: usize = 72;
pub const OFFSET: usize = 74;
pub const MAX_VOLUME: usize = 76;
pub const SPACING: usize = 78;
pub const MASK_LOW: usize = 80;
pub const MASK_HIGH: usize = 82;
pub const ASP_OFFSET: usize = 84;
pub const LIQUID_FACTORS: usize = 86;
pub const PRESSURES: usize = 94;
pub const UNUSED: usize = 102;
pub const COMMANDS: usize = 106;
pub const VALUES: usize = 156;

const _: () = assert!(COMMANDS + SLOT_COUNT == VALUES);
const _: () = assert!(VALUES + SLOT_COUNT * 2 == RECORD_SIZE);
const _: () = assert!(PLATE_NAME + NAME_LEN < FORMAT);
