//! Pin-table cross-referencing.
//!
//! The vendor pin table is a comma-separated file with one row per package
//! pin. Only four columns matter here: the fabric pin name, the SoC pin name,
//! and the grid coordinate of the I/O tile that drives the pin.

use crate::assign::{ClockAssignment, ClockAssignments, ClockDomain};
use crate::edge::{classify, Edge};
use crate::error::{SettingError, ValidationKind};
use crate::geometry::DeviceGeometry;
use crate::input::read_lossy;
use crate::number::parse_unsigned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Column holding the fabric pin identifier.
pub const FABRIC_PIN_FIELD: usize = 2;
/// Column holding the grid x coordinate.
pub const X_FIELD: usize = 9;
/// Column holding the grid y coordinate.
pub const Y_FIELD: usize = 10;
/// Column holding the SoC pin identifier.
pub const SOC_PIN_FIELD: usize = 13;
/// Rows with fewer fields are ignored.
pub const MIN_FIELDS: usize = SOC_PIN_FIELD + 1;

/// What to do with a coordinate field that is not an unsigned integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CoordinatePolicy {
    /// Read the field as 0 and log a warning.
    #[default]
    ZeroOnError,
    /// Fail with [`ValidationKind::Coordinate`].
    Strict,
}

/// A clock assignment enriched with its grid location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatedClock {
    /// The parsed assignment.
    #[serde(flatten)]
    pub assignment: ClockAssignment,
    /// Grid column, 0 until a pin-table row matches.
    pub x: u32,
    /// Grid row, 0 until a pin-table row matches.
    pub y: u32,
    /// Edge classification; [`Edge::Unknown`] until [`LocatedClock::classify`] runs.
    pub edge: Edge,
    /// 1-based pin-table line that supplied the coordinates.
    pub pin_row: Option<usize>,
}

impl LocatedClock {
    /// Wraps an assignment with no location yet.
    pub fn new(assignment: ClockAssignment) -> Self {
        Self {
            assignment,
            x: 0,
            y: 0,
            edge: Edge::Unknown,
            pin_row: None,
        }
    }

    /// Recomputes [`LocatedClock::edge`] for the given device.
    pub fn classify(&mut self, geometry: &DeviceGeometry) {
        self.edge = classify(self.x, self.y, geometry);
    }
}

/// Located clocks keyed by pin identifier, iterated in ascending order.
pub type LocatedClocks = BTreeMap<String, LocatedClock>;

/// Reads the pin table at `path` and resolves coordinates for `assignments`.
pub fn read_pin_table(
    assignments: ClockAssignments,
    path: &Path,
    policy: CoordinatePolicy,
) -> Result<LocatedClocks, SettingError> {
    let source = read_lossy(path)?;
    cross_reference(assignments, &source, path, policy)
}

/// Resolves coordinates for `assignments` from pin-table text.
///
/// A row matches an identifier when field 2 names a fabric clock or field 13
/// names an SoC clock. When several rows match the same identifier the last
/// one wins.
pub fn cross_reference(
    assignments: ClockAssignments,
    source: &str,
    path: &Path,
    policy: CoordinatePolicy,
) -> Result<LocatedClocks, SettingError> {
    let mut clocks: LocatedClocks = assignments
        .into_iter()
        .map(|(id, a)| (id, LocatedClock::new(a)))
        .collect();

    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim_end();
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < MIN_FIELDS {
            continue;
        }

        let Some(identifier) = match_row(&clocks, &fields) else {
            continue;
        };

        let coordinate = |field: usize| -> Result<u32, SettingError> {
            let token = fields[field];
            match (parse_unsigned(token), policy) {
                (Some(value), _) => Ok(value),
                (None, CoordinatePolicy::ZeroOnError) => {
                    tracing::warn!(
                        "{}:{line_no}: coordinate field {field} `{token}` is not a number; using 0",
                        path.display()
                    );
                    Ok(0)
                }
                (None, CoordinatePolicy::Strict) => Err(SettingError::Validation {
                    path: path.to_path_buf(),
                    line: line_no,
                    text: line.to_string(),
                    kind: ValidationKind::Coordinate {
                        field,
                        token: token.to_string(),
                    },
                }),
            }
        };
        let x = coordinate(X_FIELD)?;
        let y = coordinate(Y_FIELD)?;

        if let Some(clock) = clocks.get_mut(identifier) {
            match clock.pin_row {
                Some(previous) => tracing::debug!(
                    identifier,
                    previous,
                    line = line_no,
                    x,
                    y,
                    "later pin-table row overrides location"
                ),
                None => tracing::debug!(identifier, line = line_no, x, y, "pin-table match"),
            }
            clock.x = x;
            clock.y = y;
            clock.pin_row = Some(line_no);
        }
    }

    for (identifier, clock) in &clocks {
        if clock.pin_row.is_none() {
            tracing::warn!(
                "`{identifier}` not found in pin table {}; location defaults to (0, 0)",
                path.display()
            );
        }
    }

    Ok(clocks)
}

/// Returns the identifier a row resolves, testing the fabric column first.
fn match_row<'a>(clocks: &LocatedClocks, fields: &[&'a str]) -> Option<&'a str> {
    let candidate = |field: usize, domain: ClockDomain| {
        let id = fields[field];
        let hit = !id.is_empty()
            && clocks
                .get(id)
                .is_some_and(|clock| clock.assignment.domain == domain);
        hit.then_some(id)
    };
    candidate(FABRIC_PIN_FIELD, ClockDomain::Fabric)
        .or_else(|| candidate(SOC_PIN_FIELD, ClockDomain::Soc))
}
