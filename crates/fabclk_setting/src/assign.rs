//! Clock-assignment file parser.
//!
//! The assignment file is a line-oriented list of directives:
//!
//! ```text
//! set_core_clk <identifier> <index>
//! set_soc_clk  <identifier> <index>
//! ```
//!
//! Every other line (comments, blanks, unrelated directives) is ignored.

use crate::error::{SettingError, ValidationKind};
use crate::input::read_lossy;
use crate::number::parse_unsigned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Directive assigning a fabric clock.
pub const CORE_CLK_DIRECTIVE: &str = "set_core_clk";
/// Directive assigning an SoC clock.
pub const SOC_CLK_DIRECTIVE: &str = "set_soc_clk";

/// Number of clock-select bits per I/O tile.
pub const CLOCK_SELECT_BITS: u32 = 4;

/// The clock domain a pin belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockDomain {
    /// Programmable fabric clock (`set_core_clk`).
    Fabric,
    /// Hard SoC clock (`set_soc_clk`).
    Soc,
}

impl ClockDomain {
    fn from_directive(keyword: &str) -> Option<Self> {
        match keyword {
            CORE_CLK_DIRECTIVE => Some(ClockDomain::Fabric),
            SOC_CLK_DIRECTIVE => Some(ClockDomain::Soc),
            _ => None,
        }
    }

    /// Returns whether this is the SoC domain.
    pub fn is_soc(self) -> bool {
        self == ClockDomain::Soc
    }
}

/// One clock assignment read from the design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockAssignment {
    /// The requested clock index (intended range 0-15).
    pub clock_index: u32,
    /// Which pin column of the pin table identifies this pin.
    pub domain: ClockDomain,
    /// 1-based line in the assignment file.
    pub line: usize,
}

impl ClockAssignment {
    /// Returns clock-select bit `bit` of the index.
    ///
    /// Only the low [`CLOCK_SELECT_BITS`] bits are ever emitted.
    pub fn select_bit(&self, bit: u32) -> bool {
        (self.clock_index >> bit) & 1 == 1
    }
}

/// Clock assignments keyed by pin identifier, iterated in ascending order.
pub type ClockAssignments = BTreeMap<String, ClockAssignment>;

/// Reads and parses the clock-assignment file at `path`.
pub fn read_assignments(path: &Path) -> Result<ClockAssignments, SettingError> {
    let source = read_lossy(path)?;
    parse_assignments(&source, path)
}

/// Parses clock-assignment directives from `source`.
///
/// `path` is only used to label errors. The first malformed directive aborts
/// the parse.
pub fn parse_assignments(source: &str, path: &Path) -> Result<ClockAssignments, SettingError> {
    let mut assignments = ClockAssignments::new();

    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim_end();
        if !line.starts_with(CORE_CLK_DIRECTIVE) && !line.starts_with(SOC_CLK_DIRECTIVE) {
            continue;
        }

        let invalid = |kind: ValidationKind| SettingError::Validation {
            path: path.to_path_buf(),
            line: line_no,
            text: line.to_string(),
            kind,
        };

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let domain = ClockDomain::from_directive(tokens[0]).ok_or_else(|| {
            invalid(ValidationKind::UnknownDirective {
                keyword: tokens[0].to_string(),
            })
        })?;
        let [_, identifier, index] = tokens.as_slice() else {
            return Err(invalid(ValidationKind::TokenCount {
                found: tokens.len(),
            }));
        };

        if let Some(first) = assignments.get(*identifier) {
            return Err(invalid(ValidationKind::DuplicateIdentifier {
                first_line: first.line,
            }));
        }

        let clock_index = parse_unsigned(index).ok_or_else(|| {
            invalid(ValidationKind::ClockIndex {
                token: index.to_string(),
            })
        })?;
        if clock_index >= 1 << CLOCK_SELECT_BITS {
            tracing::warn!(
                "{}:{line_no}: clock index {clock_index} for `{identifier}` exceeds {} bits; only the low bits are used",
                path.display(),
                CLOCK_SELECT_BITS
            );
        }

        tracing::debug!(identifier, clock_index, ?domain, "clock assignment");
        assignments.insert(
            identifier.to_string(),
            ClockAssignment {
                clock_index,
                domain,
                line: line_no,
            },
        );
    }

    Ok(assignments)
}
