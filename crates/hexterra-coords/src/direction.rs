//! The six directions around a hexagon, clockwise from north-east.

use std::fmt;

/// One of the six directions a hexagon edge can face.
///
/// Ordered clockwise starting at NE. The `repr(u8)` discriminant doubles as the
/// index into per-cell neighbor arrays and the corner table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum HexDirection {
    /// North-east.
    NE = 0,
    /// East.
    E = 1,
    /// South-east.
    SE = 2,
    /// South-west.
    SW = 3,
    /// West.
    W = 4,
    /// North-west.
    NW = 5,
}

impl HexDirection {
    /// All six directions in canonical (clockwise) order.
    pub const ALL: [HexDirection; 6] = [Self::NE, Self::E, Self::SE, Self::SW, Self::W, Self::NW];

    /// Returns the direction index (0–5).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Converts an index back into a direction. Indices wrap modulo 6.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 6]
    }

    /// Returns the direction pointing the other way.
    pub fn opposite(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Returns the next direction clockwise (NW wraps to NE).
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Returns the previous direction clockwise (NE wraps to NW).
    pub fn previous(self) -> Self {
        Self::from_index(self.index() + 5)
    }
}

impl fmt::Display for HexDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NE => "NE",
            Self::E => "E",
            Self::SE => "SE",
            Self::SW => "SW",
            Self::W => "W",
            Self::NW => "NW",
        };
        f.write_str(name)
    }
}
