//! Error types for simulation configuration and sessions.

use std::fmt;

use botnav_core::{Coord, GridError};
use botnav_paths::SearchError;

use crate::session::Phase;

/// Errors found when validating a [`SimConfig`](crate::SimConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Grid side length below 1.
    InvalidGridSize { size: i32 },
    /// The obstacle quota leaves no room for the source and destination.
    TooManyObstacles { max_obstacles: usize, capacity: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGridSize { size } => write!(f, "grid size must be at least 1, got {size}"),
            Self::TooManyObstacles {
                max_obstacles,
                capacity,
            } => write!(
                f,
                "{max_obstacles} obstacles requested but the grid has room for {capacity}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors surfaced by a [`Session`](crate::Session).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// A run was requested before both endpoints were placed.
    MissingEndpoints,
    /// Source and destination are not connected.
    NoPath,
    /// The operation is not available in the current placement phase.
    WrongPhase(Phase),
    /// The cell already holds the source, destination or an obstacle.
    CellTaken(Coord),
    Grid(GridError),
    Search(SearchError),
    Config(ConfigError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEndpoints => f.write_str("Please set both source and destination positions!"),
            Self::NoPath => f.write_str("No valid path found!"),
            Self::WrongPhase(phase) => write!(f, "not allowed while {phase}"),
            Self::CellTaken(c) => write!(f, "cell {c} is already painted"),
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::Search(e) => write!(f, "search: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::Search(e) => Some(e),
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for SessionError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<SearchError> for SessionError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl From<ConfigError> for SessionError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
