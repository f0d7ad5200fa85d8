//! Error types for bitstream setting generation.

use fabclk_config::ConfigError;
use std::path::PathBuf;

/// Coarse error classes a caller can act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An input file was malformed or inconsistent.
    Validation,
    /// A file could not be opened, read or written.
    Io,
}

/// What exactly was wrong with an offending input line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationKind {
    /// A clock directive did not have exactly three tokens.
    #[error("expected `<directive> <identifier> <index>`, found {found} token(s)")]
    TokenCount {
        /// Number of whitespace-separated tokens on the line.
        found: usize,
    },
    /// The line started with a directive prefix but the keyword did not match.
    #[error("unknown directive `{keyword}`")]
    UnknownDirective {
        /// The first token of the line.
        keyword: String,
    },
    /// The clock index was not an unsigned integer.
    #[error("invalid clock index `{token}`")]
    ClockIndex {
        /// The offending token.
        token: String,
    },
    /// The identifier was already assigned a clock.
    #[error("duplicate identifier, first assigned on line {first_line}")]
    DuplicateIdentifier {
        /// 1-based line of the first assignment.
        first_line: usize,
    },
    /// A pin-table coordinate was not an unsigned integer.
    #[error("invalid coordinate `{token}` in field {field}")]
    Coordinate {
        /// 0-based field index within the row.
        field: usize,
        /// The offending token.
        token: String,
    },
}

/// Errors that abort a generation call.
///
/// When one of these is returned, nothing has been written to the output path.
#[derive(Debug, thiserror::Error)]
pub enum SettingError {
    /// An input file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An input line failed validation.
    #[error("{}:{line}: {kind}: `{text}`", path.display())]
    Validation {
        /// The file containing the offending line.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// The offending line, trailing whitespace removed.
        text: String,
        /// The specific problem.
        kind: ValidationKind,
    },

    /// The template never closes its root element.
    #[error(
        "template {} has no closing `</openfpga_bitstream_setting>` tag",
        path.display()
    )]
    MissingSentinel {
        /// The template file.
        path: PathBuf,
    },

    /// The output could not be written or moved into place.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// The requested output path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The options were incomplete or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SettingError {
    /// Returns the coarse class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SettingError::Io { .. } | SettingError::Write { .. } => ErrorKind::Io,
            SettingError::Config(ConfigError::Read { .. }) => ErrorKind::Io,
            SettingError::Validation { .. }
            | SettingError::MissingSentinel { .. }
            | SettingError::Config(_) => ErrorKind::Validation,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SettingError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display_includes_location() {
        let err = SettingError::Validation {
            path: PathBuf::from("design.clk"),
            line: 7,
            text: "set_core_clk a".to_string(),
            kind: ValidationKind::TokenCount { found: 2 },
        };
        assert_eq!(
            err.to_string(),
            "design.clk:7: expected `<directive> <identifier> <index>`, found 2 token(s): `set_core_clk a`"
        );
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn duplicate_display() {
        let kind = ValidationKind::DuplicateIdentifier { first_line: 3 };
        assert_eq!(
            kind.to_string(),
            "duplicate identifier, first assigned on line 3"
        );
    }

    #[test]
    fn io_kind() {
        let err = SettingError::io(
            "pins.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().starts_with("failed to read pins.csv"));
    }

    #[test]
    fn missing_sentinel_kind() {
        let err = SettingError::MissingSentinel {
            path: PathBuf::from("base.xml"),
        };
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("</openfpga_bitstream_setting>"));
    }

    #[test]
    fn config_kinds() {
        let missing: SettingError = ConfigError::MissingOption("output".into()).into();
        assert_eq!(missing.kind(), ErrorKind::Validation);
        let io: SettingError = ConfigError::Read {
            path: PathBuf::from("fabclk.toml"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "x"),
        }
        .into();
        assert_eq!(io.kind(), ErrorKind::Io);
    }
}
