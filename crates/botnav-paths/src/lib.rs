//! Shortest-path search over obstacle grids.
//!
//! The entry point is [`PathFinder::astar_path`], an A\* search using the
//! Manhattan heuristic over any [`AstarPather`]. [`PathFinder`] owns and
//! reuses its internal caches so that repeated queries incur zero
//! allocations after warm-up; [`find_path`] is a one-shot wrapper for a
//! [`Grid`](botnav_core::Grid).
//!
//! Results are deterministic: when several frontier nodes share the lowest
//! f-score, the one discovered first is expanded first.
//!
//! # Trait hierarchy
//!
//! | Trait | Provides |
//! |---|---|
//! | [`Pather`] | neighbour enumeration |
//! | [`WeightedPather`] : [`Pather`] | edge costs |
//! | [`AstarPather`] : [`WeightedPather`] | admissible heuristic |

mod astar;
mod distance;
mod error;
mod finder;
mod path;
mod traits;

pub use astar::find_path;
pub use distance::manhattan;
pub use error::SearchError;
pub use finder::{PathFinder, SearchBudget, SearchStats};
pub use path::Path;
pub use traits::{AstarPather, Pather, WeightedPather};
