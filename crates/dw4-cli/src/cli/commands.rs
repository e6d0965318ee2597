//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Add the device profile args every command takes.
fn with_profile_args(cmd: Command) -> Command {
    cmd.arg(profile_arg()).arg(legacy_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("dw4")
        .about("Compile, decompile and inspect DW4/BNX1536 program files")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(check_command())
        .subcommand(compile_command())
        .subcommand(decompile_command())
        .subcommand(dump_command())
        .subcommand(labels_command())
}

/// Validate programs against the device limits.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Validate a program file without writing anything")
        .after_help(
            r#"EXAMPLES:
  dw4 check wash.json
  dw4 check wash.json --legacy"#,
        )
        .arg(programs_path_arg());
    with_profile_args(cmd)
}

/// Assemble a JSON program file into a binary image.
pub fn compile_command() -> Command {
    let cmd = Command::new("compile")
        .about("Assemble a program file into the device's binary format")
        .after_help(
            r#"EXAMPLES:
  dw4 compile wash.json -o WASH.DW4
  dw4 compile wash.json -o WASH.DW4 --profile dw4c.json"#,
        )
        .arg(programs_path_arg())
        .arg(output_arg().required(true));
    with_profile_args(cmd)
}

/// Disassemble a binary image into JSON.
pub fn decompile_command() -> Command {
    let cmd = Command::new("decompile")
        .about("Disassemble a binary program file into JSON")
        .after_help(
            r#"EXAMPLES:
  dw4 decompile WASH.DW4
  dw4 decompile WASH.DW4 --plates plates.json --library wash.json -o wash.json"#,
        )
        .arg(image_path_arg())
        .arg(plates_arg())
        .arg(library_arg())
        .arg(output_arg());
    with_profile_args(cmd)
}

/// Print a binary image record by record.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Show the records of a binary program file")
        .arg(image_path_arg())
        .arg(color_arg())
}

/// Encode selection text as a mask.
pub fn labels_command() -> Command {
    let cmd = Command::new("labels")
        .about("Show the mask and wells a selection addresses")
        .after_help(
            r#"EXAMPLES:
  dw4 labels ABCD -f 3
  dw4 labels '1 2 3 4' -f 5
  dw4 labels ACE -f 2 --legacy"#,
        )
        .arg(labels_text_arg())
        .arg(format_arg());
    with_profile_args(cmd)
}
