//! Device grid dimensions.

use crate::number::parse_unsigned;
use serde::{Deserialize, Serialize};

/// The device grid size in tiles, including the I/O ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceGeometry {
    /// Number of grid columns.
    pub width: u32,
    /// Number of grid rows.
    pub height: u32,
}

/// Why a `device_size` string was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    /// The string did not split into exactly two parts on `x`.
    #[error("expected `<W>x<H>`, found {count} part(s)")]
    Separator {
        /// Number of parts after splitting on `x`.
        count: usize,
    },
    /// One of the two parts was not an unsigned integer.
    #[error("invalid device dimension `{token}`")]
    Dimension {
        /// The offending part.
        token: String,
    },
}

impl DeviceGeometry {
    /// Creates a geometry from explicit dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Parses a `"<W>x<H>"` size string such as `"44x40"`.
    pub fn parse(size: &str) -> Result<Self, GeometryError> {
        let parts: Vec<&str> = size.split('x').collect();
        let [w, h] = parts.as_slice() else {
            return Err(GeometryError::Separator { count: parts.len() });
        };
        let dim = |token: &str| {
            parse_unsigned(token).ok_or_else(|| GeometryError::Dimension {
                token: token.to_string(),
            })
        };
        Ok(Self::new(dim(*w)?, dim(*h)?))
    }

    /// Index of the last interior column next to the right I/O ring (`W-2`).
    ///
    /// `None` when the grid is too narrow to have one.
    pub fn inner_right(&self) -> Option<u32> {
        self.width.checked_sub(2)
    }

    /// Index of the last interior row next to the top I/O ring (`H-2`).
    pub fn inner_top(&self) -> Option<u32> {
        self.height.checked_sub(2)
    }
}

impl std::fmt::Display for DeviceGeometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid() {
        assert_eq!(DeviceGeometry::parse("44x40"), Ok(DeviceGeometry::new(44, 40)));
        assert_eq!(DeviceGeometry::parse("0x0"), Ok(DeviceGeometry::new(0, 0)));
    }

    #[test]
    fn parse_no_separator() {
        assert_eq!(
            DeviceGeometry::parse("10"),
            Err(GeometryError::Separator { count: 1 })
        );
    }

    #[test]
    fn parse_too_many_separators() {
        assert_eq!(
            DeviceGeometry::parse("10x10x10"),
            Err(GeometryError::Separator { count: 3 })
        );
    }

    #[test]
    fn parse_bad_dimension() {
        assert_eq!(
            DeviceGeometry::parse("10xab"),
            Err(GeometryError::Dimension {
                token: "ab".to_string()
            })
        );
        assert_eq!(
            DeviceGeometry::parse("x10"),
            Err(GeometryError::Dimension {
                token: String::new()
            })
        );
    }

    #[test]
    fn inner_edges() {
        let g = DeviceGeometry::new(10, 8);
        assert_eq!(g.inner_right(), Some(8));
        assert_eq!(g.inner_top(), Some(6));
        assert_eq!(DeviceGeometry::new(1, 0).inner_right(), None);
        assert_eq!(DeviceGeometry::new(1, 0).inner_top(), None);
    }

    #[test]
    fn display_round_trips() {
        let g = DeviceGeometry::new(12, 9);
        assert_eq!(DeviceGeometry::parse(&g.to_string()), Ok(g));
    }
}
