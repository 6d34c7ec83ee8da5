//! Error types for path searches.

use std::fmt;

use botnav_core::Coord;

/// Errors that stop a search before it can answer.
///
/// An unreachable goal is *not* an error: searches report it as an empty
/// [`Path`](crate::Path).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// Start or goal lies outside the searched extent.
    OutOfBounds {
        /// The offending coordinate.
        coord: Coord,
        /// Side length of the searched extent.
        size: i32,
    },
    /// The expansion budget ran out before the search finished.
    Timeout {
        /// Number of nodes expanded when the search gave up.
        expanded: usize,
    },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { coord, size } => {
                write!(f, "search endpoint {coord} out of bounds for {size}x{size} grid")
            }
            Self::Timeout { expanded } => {
                write!(f, "search budget exhausted after expanding {expanded} nodes")
            }
        }
    }
}

impl std::error::Error for SearchError {}
