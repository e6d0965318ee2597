use std::path::PathBuf;

use dw4_compiler::{encode_file, logical_steps};
use log::info;

use super::io::{ProfileSource, fail, load_programs};

pub struct CheckArgs {
    pub programs_path: PathBuf,
    pub profile: ProfileSource,
}

pub fn run(args: CheckArgs) {
    let profile = args.profile.load().unwrap_or_else(|msg| fail(msg));
    let file = load_programs(&args.programs_path).unwrap_or_else(|msg| fail(msg));

    if let Err(e) = encode_file(&file, &profile) {
        fail(e);
    }
    for program in &file.programs {
        if let Ok(used) = logical_steps(program, &profile) {
            info!("`{}`: {} logical steps", program.name, used);
        }
    }

    // Silent on success (like cargo check)
}
