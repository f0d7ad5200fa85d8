//! Classification of grid coordinates onto the I/O periphery.
//!
//! Clock-select I/O tiles sit one step inside the outer ring of the device
//! grid. A tile on row 1 or row `H-2` belongs to the bottom or top edge, and
//! a tile on column 1 or column `W-2` to the left or right edge. Corner
//! regions (within two tiles of either end of an edge) are excluded.

use crate::geometry::DeviceGeometry;
use serde::{Deserialize, Serialize};

/// Which side of the device periphery a location belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    /// Row `H-2`.
    Top,
    /// Row 1.
    Bottom,
    /// Column 1.
    Left,
    /// Column `W-2`.
    Right,
    /// Not on any clock-capable edge.
    Unknown,
}

impl Edge {
    /// Returns the edge name used in grid tile paths, or `None` for [`Edge::Unknown`].
    pub fn tile_name(self) -> Option<&'static str> {
        match self {
            Edge::Top => Some("top"),
            Edge::Bottom => Some("bottom"),
            Edge::Left => Some("left"),
            Edge::Right => Some("right"),
            Edge::Unknown => None,
        }
    }

    /// Returns whether this is one of the four real edges.
    pub fn is_known(self) -> bool {
        self != Edge::Unknown
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tile_name().unwrap_or("unknown"))
    }
}

/// Classifies `(x, y)` against the device geometry.
///
/// The top/bottom rule is tested before the left/right rule, and row 1 is
/// bottom even on a grid where it is also `H-2`.
pub fn classify(x: u32, y: u32, geometry: &DeviceGeometry) -> Edge {
    let right = geometry.inner_right();
    let top = geometry.inner_top();

    let in_row_span = right.is_some_and(|r| x >= 2 && x < r);
    if in_row_span {
        if y == 1 {
            return Edge::Bottom;
        }
        if Some(y) == top {
            return Edge::Top;
        }
    }

    let in_column_span = top.is_some_and(|t| y >= 2 && y < t);
    if in_column_span {
        if x == 1 {
            return Edge::Left;
        }
        if Some(x) == right {
            return Edge::Right;
        }
    }

    Edge::Unknown
}
