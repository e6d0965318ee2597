use std::path::PathBuf;

use dw4_compiler::decode_file;

use super::io::{ProfileSource, fail, load_catalog, load_image, load_library, write_output};

pub struct DecompileArgs {
    pub image_path: PathBuf,
    pub plates: Option<PathBuf>,
    pub library: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub profile: ProfileSource,
}

pub fn run(args: DecompileArgs) {
    let profile = args.profile.load().unwrap_or_else(|msg| fail(msg));
    let image = load_image(&args.image_path).unwrap_or_else(|msg| fail(msg));
    let library = load_library(args.library.as_deref()).unwrap_or_else(|msg| fail(msg));
    let catalog = load_catalog(args.plates.as_deref()).unwrap_or_else(|msg| fail(msg));

    // Program library first, then the catalog.
    let file = decode_file(&image, &profile, &(library, catalog)).unwrap_or_else(|e| fail(e));
    let mut json = file.to_json().unwrap_or_else(|e| fail(e));
    json.push('\n');
    write_output(args.output.as_deref(), &json).unwrap_or_else(|msg| fail(msg));
}
