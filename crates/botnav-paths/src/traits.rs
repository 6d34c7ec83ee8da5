use botnav_core::{Coord, Grid};

use crate::distance::manhattan;

/// Minimal pathfinding interface — provides neighbor enumeration.
pub trait Pather {
    /// Append neighbors of `c` into `buf`. The caller clears `buf` before calling.
    ///
    /// The order of appended neighbors decides which of several equally
    /// short paths a search returns, so it must be stable.
    fn neighbors(&self, c: Coord, buf: &mut Vec<Coord>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Coord, to: Coord) -> i32;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of distance from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Coord, to: Coord) -> i32;
}

// A grid is a unit-cost, 4-connected graph over its free cells.

impl Pather for Grid {
    fn neighbors(&self, c: Coord, buf: &mut Vec<Coord>) {
        self.push_neighbors(c, buf);
    }
}

impl WeightedPather for Grid {
    fn cost(&self, _from: Coord, _to: Coord) -> i32 {
        1
    }
}

impl AstarPather for Grid {
    fn estimate(&self, from: Coord, to: Coord) -> i32 {
        manhattan(from, to)
    }
}
