use std::path::PathBuf;

use dw4_compiler::encode_file;

use super::io::{ProfileSource, fail, load_programs};

pub struct CompileArgs {
    pub programs_path: PathBuf,
    pub output: PathBuf,
    pub profile: ProfileSource,
}

pub fn run(args: CompileArgs) {
    let profile = args.profile.load().unwrap_or_else(|msg| fail(msg));
    let file = load_programs(&args.programs_path).unwrap_or_else(|msg| fail(msg));

    let image = encode_file(&file, &profile).unwrap_or_else(|e| fail(e));
    if let Err(e) = image.save(&args.output) {
        fail(format!("failed to write '{}': {}", args.output.display(), e));
    }
}
