//! **botnav-core** — core types for grid navigation.
//!
//! This crate provides the foundational types used across the *botnav*
//! workspace: the [`Coord`] and [`Direction`] geometry primitives and the
//! obstacle [`Grid`] that pathfinding searches run over.

pub mod error;
pub mod geom;
pub mod grid;

pub use error::GridError;
pub use geom::{Coord, Direction};
pub use grid::Grid;
