//! Cube coordinates for hexagonal cells.

use std::fmt;

use glam::Vec3;

use crate::HexDirection;

/// Ratio between a hexagon's inner and outer radius (√3 / 2).
const INNER_TO_OUTER: f32 = 0.866_025_4;

/// A hex cell address in cube coordinates.
///
/// Only `x` and `z` are stored; `y` is derived as `-x - z` so the invariant
/// `x + y + z = 0` cannot be broken. Equality and hashing therefore operate on
/// the `(x, z)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct CubeCoord {
    x: i32,
    z: i32,
}

impl CubeCoord {
    /// Creates a coordinate from its `x` and `z` components.
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The `x` component.
    pub const fn x(self) -> i32 {
        self.x
    }

    /// The derived `y` component (`-x - z`).
    pub const fn y(self) -> i32 {
        -self.x - self.z
    }

    /// The `z` component (equal to the offset row).
    pub const fn z(self) -> i32 {
        self.z
    }

    /// Converts a staggered offset position (column, row) to cube coordinates.
    ///
    /// Odd rows are shifted half a cell to the right, so the `x` axis zig-zags
    /// back by one every two rows: `x = col - row / 2`, `z = row`.
    pub const fn from_offset(col: i32, row: i32) -> Self {
        Self::new(col - row / 2, row)
    }

    /// Recovers the offset (column, row) this coordinate was built from.
    pub const fn to_offset(self) -> (i32, i32) {
        (self.x + self.z / 2, self.z)
    }

    /// Finds the cell containing a world-space point on the XZ plane.
    ///
    /// The continuous cube position is rounded per axis. When independent
    /// rounding breaks the cube invariant, the axis with the largest rounding
    /// error is rebuilt from the other two.
    pub fn from_position(position: Vec3, outer_radius: f32) -> Self {
        let inner_radius = outer_radius * INNER_TO_OUTER;

        let mut x = position.x / (inner_radius * 2.0);
        let mut y = -x;
        let offset = position.z / (outer_radius * 3.0);
        x -= offset;
        y -= offset;
        let z = -x - y;

        let mut ix = x.round() as i32;
        let iy = y.round() as i32;
        let mut iz = z.round() as i32;

        if ix + iy + iz != 0 {
            let dx = (x - ix as f32).abs();
            let dy = (y - iy as f32).abs();
            let dz = (z - iz as f32).abs();

            if dx > dy && dx > dz {
                ix = -iy - iz;
            } else if dz > dy {
                iz = -ix - iy;
            }
            // Otherwise y carried the largest error and is simply re-derived.
        }

        let coord = Self::new(ix, iz);
        debug_assert_eq!(coord.x() + coord.y() + coord.z(), 0);
        coord
    }

    /// Returns the adjacent coordinate in `direction`.
    pub const fn neighbor(self, direction: HexDirection) -> Self {
        let (dx, dz) = match direction {
            HexDirection::NE => (0, 1),
            HexDirection::E => (1, 0),
            HexDirection::SE => (1, -1),
            HexDirection::SW => (0, -1),
            HexDirection::W => (-1, 0),
            HexDirection::NW => (-1, 1),
        };
        Self::new(self.x + dx, self.z + dz)
    }

    /// Number of cell steps between two coordinates, saturating at `u32::MAX`.
    pub fn distance_to(self, other: Self) -> u32 {
        let (ax, az) = (i64::from(self.x), i64::from(self.z));
        let (bx, bz) = (i64::from(other.x), i64::from(other.z));
        let dx = (ax - bx).unsigned_abs();
        let dy = ((-ax - az) - (-bx - bz)).unsigned_abs();
        let dz = (az - bz).unsigned_abs();
        u32::try_from((dx + dy + dz) / 2).unwrap_or(u32::MAX)
    }

    /// Size of a hexagonal area of `radius` rings, `3r(r + 1) + 1`, or `None`
    /// if it does not fit in a `usize`.
    pub fn count_within(radius: u32) -> Option<usize> {
        let r = usize::try_from(radius).ok()?;
        r.checked_add(1)?
            .checked_mul(r)?
            .checked_mul(3)?
            .checked_add(1)
    }

    /// All coordinates within `radius` steps of this one, including itself.
    ///
    /// Coordinates whose components would leave the `i32` range are skipped.
    pub fn within(self, radius: u32) -> Vec<Self> {
        let r = i64::from(radius);
        let mut out = Vec::with_capacity(Self::count_within(radius).unwrap_or(0));
        for dx in -r..=r {
            let Ok(x) = i32::try_from(i64::from(self.x) + dx) else {
                continue;
            };
            let lo = (-r).max(-dx - r);
            let hi = r.min(-dx + r);
            for dz in lo..=hi {
                let Ok(z) = i32::try_from(i64::from(self.z) + dz) else {
                    continue;
                };
                if x.checked_add(z).and_then(i32::checked_neg).is_some() {
                    out.push(Self::new(x, z));
                }
            }
        }
        out
    }

    /// Renders one component per line, for stacked cell labels.
    pub fn to_string_on_separate_lines(self) -> String {
        format!("{}\n{}\n{}", self.x, self.y(), self.z)
    }
}

impl fmt::Display for CubeCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y(), self.z)
    }
}
