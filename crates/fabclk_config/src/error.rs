//! Error types for option loading and validation.

use crate::types::KNOWN_FLAGS;
use std::path::PathBuf;

/// Why a set of generator options could not be assembled.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The options file could not be read.
    #[error("failed to read options file {}: {source}", path.display())]
    Read {
        /// The options file path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The options file is not valid TOML or has an unexpected shape.
    #[error("invalid options file: {0}")]
    Parse(String),

    /// A required option (`device_size`, `design`, `pin` or `output`) was not given.
    #[error("option `{0}` is required")]
    MissingOption(String),

    /// An option in the file's `[options]` table has an empty value.
    #[error("option `{0}` is blank")]
    BlankOption(String),

    /// A flag name outside [`KNOWN_FLAGS`].
    #[error("unknown flag `{0}` (known: {known})", known = KNOWN_FLAGS.join(", "))]
    UnknownFlag(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_option_names_key() {
        let err = ConfigError::MissingOption("device_size".to_string());
        assert_eq!(err.to_string(), "option `device_size` is required");
    }

    #[test]
    fn unknown_flag_lists_known_flags() {
        let err = ConfigError::UnknownFlag("fast".to_string());
        assert_eq!(
            err.to_string(),
            "unknown flag `fast` (known: is_unittest, strict_coordinates)"
        );
    }

    #[test]
    fn read_error_names_file() {
        let err = ConfigError::Read {
            path: PathBuf::from("proj/fabclk.toml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(
            err.to_string(),
            "failed to read options file proj/fabclk.toml: no such file"
        );
    }
}
