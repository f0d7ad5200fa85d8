//! Option resolution: merging an options file with command-line overrides.

use crate::error::ConfigError;
use crate::types::{GenerateOptions, OptionsFile, OPT_DESIGN, OPT_DEVICE_SIZE, OPT_PIN};
use std::path::PathBuf;

/// Values supplied directly by the caller, overriding the options file.
#[derive(Debug, Clone, Default)]
pub struct OptionOverrides {
    /// Device grid size (`"<W>x<H>"`).
    pub device_size: Option<String>,
    /// Clock-assignment file path.
    pub design: Option<String>,
    /// Pin-table file path.
    pub pin: Option<String>,
    /// Template path.
    pub template: Option<String>,
    /// Output path.
    pub output: Option<String>,
    /// Extra flags, added to those of the file.
    pub flags: Vec<String>,
}

/// Resolves the final generator options.
///
/// The file (if any) forms the base and every override that is set replaces
/// the matching file value. Flags are the union of both sources.
pub fn resolve_options(
    file: Option<&OptionsFile>,
    overrides: &OptionOverrides,
) -> Result<GenerateOptions, ConfigError> {
    let base = file.cloned().unwrap_or_default();

    let mut options = base.options;
    for (key, value) in [
        (OPT_DEVICE_SIZE, &overrides.device_size),
        (OPT_DESIGN, &overrides.design),
        (OPT_PIN, &overrides.pin),
    ] {
        if let Some(value) = value {
            options.insert(key.to_string(), value.clone());
        }
    }

    let mut flags = base.flags;
    for flag in &overrides.flags {
        if !flags.contains(flag) {
            flags.push(flag.clone());
        }
    }

    let template = overrides.template.clone().or(base.template);
    let output = overrides.output.clone().or(base.output);

    GenerateOptions::from_option_map(
        &options,
        &flags,
        template.map(PathBuf::from),
        output.map(PathBuf::from),
    )
}
