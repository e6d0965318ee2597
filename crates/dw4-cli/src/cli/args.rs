//! Shared argument builders for CLI commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Program file in JSON (positional).
pub fn programs_path_arg() -> Arg {
    Arg::new("programs_path")
        .value_name("PROGRAMS")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Program file (JSON)")
}

/// Binary program file (positional).
pub fn image_path_arg() -> Arg {
    Arg::new("image_path")
        .value_name("IMAGE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Binary program file")
}

/// Output file (-o/--output).
pub fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write to FILE instead of stdout")
}

/// Device profile (--profile).
pub fn profile_arg() -> Arg {
    Arg::new("profile")
        .long("profile")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Device profile (JSON)")
}

/// Row-only device shortcut (--legacy).
pub fn legacy_arg() -> Arg {
    Arg::new("legacy")
        .long("legacy")
        .action(ArgAction::SetTrue)
        .conflicts_with("profile")
        .help("Target a row-only device (same as support_columns = false)")
}

/// Plate catalog (--plates).
pub fn plates_arg() -> Arg {
    Arg::new("plates")
        .long("plates")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Plate catalog (JSON) for geometry the records do not carry")
}

/// Previous version of the program file (--library).
pub fn library_arg() -> Arg {
    Arg::new("library")
        .long("library")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Program file (JSON) to take plate geometry from, by program position")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Selection text (positional).
pub fn labels_text_arg() -> Arg {
    Arg::new("text")
        .value_name("TEXT")
        .required(true)
        .allow_hyphen_values(true)
        .help("Row letters (\"ABCD\") or column numbers (\"1 2 3\")")
}

/// Plate format code (-f/--format).
pub fn format_arg() -> Arg {
    Arg::new("format")
        .short('f')
        .long("format")
        .value_name("CODE")
        .required(true)
        .value_parser(value_parser!(u8).range(1..=16))
        .help("Plate format: 1-3 rows, 4-6 columns (96/384/1536 wells), +10 lobase")
}
