use std::path::PathBuf;

use dw4_bytecode::dump;
use dw4_core::Colors;

use super::io::{fail, load_image};

pub struct DumpArgs {
    pub image_path: PathBuf,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let image = load_image(&args.image_path).unwrap_or_else(|msg| fail(msg));
    print!("{}", dump(&image, Colors::new(args.color)));
}
