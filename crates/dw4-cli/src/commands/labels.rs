use dw4_compiler::{DeviceProfile, SelectionCodec};
use dw4_core::PlateFormat;

use super::io::{ProfileSource, fail};

pub struct LabelsArgs {
    pub text: String,
    pub format: u8,
    pub profile: ProfileSource,
}

pub fn run(args: LabelsArgs) {
    let profile = args.profile.load().unwrap_or_else(|msg| fail(msg));
    let report = describe_labels(&args.text, args.format, &profile).unwrap_or_else(|msg| fail(msg));
    print!("{}", report);
}

/// Mask, canonical spelling and well ranges of `text` on plate format `format`.
pub fn describe_labels(text: &str, format: u8, profile: &DeviceProfile) -> Result<String, String> {
    let format = PlateFormat::from_code(format).ok_or_else(|| format!("unknown plate format {}", format))?;
    let codec = SelectionCodec::new(profile.generation(), format);

    let mask = codec.parse(text).map_err(|e| e.to_string())?;
    let labels = codec.format(mask).map_err(|e| e.to_string())?;
    let wells = codec.describe(mask).map_err(|e| e.to_string())?;

    let mut out = String::new();
    out.push_str(&format!("{:<7} {}\n", "format", format));
    out.push_str(&format!("{:<7} {}\n", "mask", mask));
    out.push_str(&format!("{:<7} {}\n", "labels", labels));
    out.push_str(&format!("{:<7} {}\n", "wells", wells));
    if mask.to_u32().is_none() {
        out.push_str("warning: selection needs more than 32 bits and cannot be stored in a program\n");
    }
    Ok(out)
}
