//! Assembly of generator options from the options file and CLI flags.

use fabclk_config::{
    load_options, resolve_options, GenerateOptions, OptionOverrides, FLAG_STRICT_COORDINATES,
    FLAG_UNITTEST,
};
use std::path::Path;

use crate::{GlobalArgs, InputArgs};

/// Builds the generator options.
///
/// When `--config` is given, the file supplies defaults and every flag that
/// is set on the command line overrides it.
pub fn build_options(
    inputs: &InputArgs,
    template: Option<&str>,
    output: Option<&str>,
    unittest: bool,
    global: &GlobalArgs,
) -> Result<GenerateOptions, Box<dyn std::error::Error>> {
    let file = match global.config.as_deref() {
        Some(path) => Some(load_options(Path::new(path))?),
        None => None,
    };

    let mut flags = Vec::new();
    if unittest {
        flags.push(FLAG_UNITTEST.to_string());
    }
    if inputs.strict_coordinates {
        flags.push(FLAG_STRICT_COORDINATES.to_string());
    }

    let overrides = OptionOverrides {
        device_size: inputs.device_size.clone(),
        design: inputs.design.clone(),
        pin: inputs.pin.clone(),
        template: template.map(str::to_string),
        output: output.map(str::to_string),
        flags,
    };

    Ok(resolve_options(file.as_ref(), &overrides)?)
}
