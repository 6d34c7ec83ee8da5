//! Error types for grid construction and cell access.

use std::fmt;

use crate::geom::Coord;

/// Errors arising from grid construction or bounds-checked cell access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// Attempted to construct a grid with side length below 1.
    InvalidSize {
        /// The rejected side length.
        size: i32,
    },
    /// A coordinate lies outside `[0, size)` on some axis.
    OutOfBounds {
        /// The offending coordinate.
        coord: Coord,
        /// Side length of the grid that rejected it.
        size: i32,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { size } => {
                write!(f, "grid size must be at least 1, got {size}")
            }
            Self::OutOfBounds { coord, size } => {
                write!(f, "coordinate {coord} out of bounds for {size}x{size} grid")
            }
        }
    }
}

impl std::error::Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            GridError::InvalidSize { size: 0 }.to_string(),
            "grid size must be at least 1, got 0"
        );
        let e = GridError::OutOfBounds {
            coord: Coord::new(3, -1),
            size: 3,
        };
        assert_eq!(e.to_string(), "coordinate (3, -1) out of bounds for 3x3 grid");
    }
}
