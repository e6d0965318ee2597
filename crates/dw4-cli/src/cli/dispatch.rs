//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::compile::CompileArgs;
use crate::commands::decompile::DecompileArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::io::ProfileSource;
use crate::commands::labels::LabelsArgs;

pub struct CheckParams {
    pub programs_path: PathBuf,
    pub profile: ProfileSource,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            programs_path: required_path(m, "programs_path"),
            profile: parse_profile(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            programs_path: p.programs_path,
            profile: p.profile,
        }
    }
}

pub struct CompileParams {
    pub programs_path: PathBuf,
    pub output: PathBuf,
    pub profile: ProfileSource,
}

impl CompileParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            programs_path: required_path(m, "programs_path"),
            output: required_path(m, "output"),
            profile: parse_profile(m),
        }
    }
}

impl From<CompileParams> for CompileArgs {
    fn from(p: CompileParams) -> Self {
        Self {
            programs_path: p.programs_path,
            output: p.output,
            profile: p.profile,
        }
    }
}

pub struct DecompileParams {
    pub image_path: PathBuf,
    pub plates: Option<PathBuf>,
    pub library: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub profile: ProfileSource,
}

impl DecompileParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            image_path: required_path(m, "image_path"),
            plates: m.get_one::<PathBuf>("plates").cloned(),
            library: m.get_one::<PathBuf>("library").cloned(),
            output: m.get_one::<PathBuf>("output").cloned(),
            profile: parse_profile(m),
        }
    }
}

impl From<DecompileParams> for DecompileArgs {
    fn from(p: DecompileParams) -> Self {
        Self {
            image_path: p.image_path,
            plates: p.plates,
            library: p.library,
            output: p.output,
            profile: p.profile,
        }
    }
}

pub struct DumpParams {
    pub image_path: PathBuf,
    pub color: ColorChoice,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            image_path: required_path(m, "image_path"),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            image_path: p.image_path,
            color: p.color.should_colorize(),
        }
    }
}

pub struct LabelsParams {
    pub text: String,
    pub format: u8,
    pub profile: ProfileSource,
}

impl LabelsParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            text: m.get_one::<String>("text").cloned().unwrap_or_default(),
            format: m.get_one::<u8>("format").copied().unwrap_or(1),
            profile: parse_profile(m),
        }
    }
}

impl From<LabelsParams> for LabelsArgs {
    fn from(p: LabelsParams) -> Self {
        Self {
            text: p.text,
            format: p.format,
            profile: p.profile,
        }
    }
}

/// Required positionals and options are enforced by clap.
fn required_path(m: &ArgMatches, id: &str) -> PathBuf {
    m.get_one::<PathBuf>(id).cloned().unwrap_or_default()
}

fn parse_profile(m: &ArgMatches) -> ProfileSource {
    if m.get_flag("legacy") {
        return ProfileSource::Legacy;
    }
    match m.get_one::<PathBuf>("profile") {
        Some(path) => ProfileSource::File(path.clone()),
        None => ProfileSource::Default,
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
