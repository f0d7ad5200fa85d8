//! Bitstream setting generation for fabric and SoC clock-select pins.
//!
//! This crate turns a design's clock assignments into an OpenFPGA bitstream
//! setting fragment that overrides the clock-select bits of the I/O tiles
//! driving those clocks. Generation runs in three stages:
//!
//! 1. [`assign`] reads `set_core_clk` / `set_soc_clk` directives.
//! 2. [`pin_table`] resolves each identifier to a grid coordinate.
//! 3. [`edge`] classifies each coordinate and [`emit`] renders the document,
//!    optionally spliced into a [`template`].
//!
//! The main entry point is [`generate()`]. The output file only appears once
//! the whole document has been rendered; on any error the output path is left
//! untouched.

#![warn(missing_docs)]

pub mod assign;
pub mod edge;
pub mod emit;
pub mod error;
pub mod geometry;
mod input;
mod number;
pub mod pin_table;
pub mod template;

use fabclk_config::{ConfigError, GenerateOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub use assign::{ClockAssignment, ClockAssignments, ClockDomain};
pub use edge::Edge;
pub use emit::{render_setting, OriginAnnotation};
pub use error::{ErrorKind, SettingError, ValidationKind};
pub use geometry::{DeviceGeometry, GeometryError};
pub use pin_table::{CoordinatePolicy, LocatedClock, LocatedClocks};
pub use template::TemplatePrefix;

/// Result of a successful [`generate()`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// The setting file was written.
    Written(GenerateSummary),
    /// The device size could not be parsed; nothing was read or written.
    Skipped {
        /// Why the device size was rejected.
        reason: GeometryError,
    },
}

/// Statistics about a written setting file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSummary {
    /// Path of the written file.
    pub output: PathBuf,
    /// Clocks that received bit overrides.
    pub classified: usize,
    /// Clocks emitted as unknown-location annotations only.
    pub unknown: usize,
}

/// Result of a successful [`locate()`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocateOutcome {
    /// Every assignment was located and classified.
    Located {
        /// The parsed device size.
        geometry: DeviceGeometry,
        /// Classified clocks in identifier order.
        clocks: LocatedClocks,
    },
    /// The device size could not be parsed; no input was read.
    Skipped {
        /// Why the device size was rejected.
        reason: GeometryError,
    },
}

/// Parses the inputs and classifies every assigned clock without writing anything.
///
/// The pin table is only opened when the design assigns at least one clock.
pub fn locate(options: &GenerateOptions) -> Result<LocateOutcome, SettingError> {
    let geometry = match DeviceGeometry::parse(&options.device_size) {
        Ok(geometry) => geometry,
        Err(reason) => {
            tracing::warn!(
                "skipping bitstream setting: device_size `{}`: {reason}",
                options.device_size
            );
            return Ok(LocateOutcome::Skipped { reason });
        }
    };

    let assignments = assign::read_assignments(&options.design)?;
    let policy = if options.strict_coordinates {
        CoordinatePolicy::Strict
    } else {
        CoordinatePolicy::ZeroOnError
    };
    let mut clocks = if assignments.is_empty() {
        LocatedClocks::new()
    } else {
        pin_table::read_pin_table(assignments, &options.pin, policy)?
    };

    for clock in clocks.values_mut() {
        clock.classify(&geometry);
    }

    Ok(LocateOutcome::Located { geometry, clocks })
}

/// Generates the bitstream setting file described by `options`.
///
/// Returns [`GenerateOutcome::Skipped`] rather than an error when
/// `device_size` is malformed.
pub fn generate(options: &GenerateOptions) -> Result<GenerateOutcome, SettingError> {
    let output = options
        .output
        .as_deref()
        .ok_or_else(|| ConfigError::MissingOption("output".to_string()))?;

    let clocks = match locate(options)? {
        LocateOutcome::Located { clocks, .. } => clocks,
        LocateOutcome::Skipped { reason } => return Ok(GenerateOutcome::Skipped { reason }),
    };

    let template = match options
        .template
        .as_deref()
        .filter(|p| !p.as_os_str().is_empty())
    {
        Some(path) => template::load_template(path)?,
        None => None,
    };
    let origin = if options.is_unittest {
        OriginAnnotation::Placeholder
    } else {
        OriginAnnotation::Path
    };

    let contents = render_setting(&clocks, template.as_ref(), origin);
    persist(output, &contents)?;

    let classified = clocks.values().filter(|c| c.edge.is_known()).count();
    let summary = GenerateSummary {
        output: output.to_path_buf(),
        classified,
        unknown: clocks.len() - classified,
    };
    tracing::info!(
        output = %output.display(),
        classified = summary.classified,
        unknown = summary.unknown,
        "bitstream setting written"
    );
    Ok(GenerateOutcome::Written(summary))
}

/// Writes `contents` to a temporary file beside `output`, then renames it into place.
fn persist(output: &Path, contents: &[u8]) -> Result<(), SettingError> {
    let write_err = |source: std::io::Error| SettingError::Write {
        path: output.to_path_buf(),
        source,
    };

    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(write_err)?;

    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    file.write_all(contents).map_err(write_err)?;
    file.flush().map_err(write_err)?;
    file.persist(output).map_err(|e| write_err(e.error))?;
    Ok(())
}
