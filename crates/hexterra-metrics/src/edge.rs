//! Classification of the transition between two neighboring cells.

/// How two adjacent cells connect, based on their elevation difference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeType {
    /// Same elevation: a coplanar connection.
    Flat,
    /// One level apart: rendered as terraces.
    Slope,
    /// Two or more levels apart: a sheer wall.
    Cliff,
}

impl EdgeType {
    /// Classifies the edge between cells at elevations `a` and `b`.
    ///
    /// Symmetric in its arguments.
    pub fn between(a: i32, b: i32) -> Self {
        match b.abs_diff(a) {
            0 => Self::Flat,
            1 => Self::Slope,
            _ => Self::Cliff,
        }
    }
}
