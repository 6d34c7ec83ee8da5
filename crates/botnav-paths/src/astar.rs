use botnav_core::{Coord, Grid};

use crate::error::SearchError;
use crate::finder::{NO_PARENT, NodeRef, PathFinder, SearchBudget, SearchStats, UNREACHED};
use crate::path::Path;
use crate::traits::AstarPather;

impl PathFinder {
    /// Compute the shortest path from `from` to `to` using A*.
    ///
    /// Returns the full path (including both endpoints), or an empty path if
    /// the goal cannot be reached. Among equally short paths the result is
    /// deterministic: frontier ties on f-score go to the coordinate that was
    /// discovered first.
    ///
    /// The search only covers the finder's extent ([`size`](Self::size));
    /// neighbours the pather yields outside it are ignored, so a finder
    /// smaller than the pather's grid can miss routes. Use
    /// [`set_size`](Self::set_size) to match them.
    ///
    /// Fails with [`SearchError::OutOfBounds`] if either endpoint lies
    /// outside the finder's extent, and with [`SearchError::Timeout`] if
    /// `budget` runs out first. Blocked endpoints are not rejected.
    pub fn astar_path<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Coord,
        to: Coord,
        budget: SearchBudget,
    ) -> Result<Path, SearchError> {
        let start_idx = self.endpoint_idx(from)?;
        let goal_idx = self.endpoint_idx(to)?;

        self.stats = SearchStats::default();

        if start_idx == goal_idx {
            self.stats.found = true;
            return Ok(Path::from_vec(vec![from]));
        }

        let cur_gen = self.next_generation();
        let mut seq: u64 = 0;

        // Initialise the start node.
        {
            let node = &mut self.nodes[start_idx];
            node.g = 0;
            node.f = pather.estimate(from, to);
            node.parent = NO_PARENT;
            node.seq = seq;
            node.generation = cur_gen;
            node.open = true;
        }
        self.stats.discovered = 1;

        self.open.clear();
        self.open.push(NodeRef {
            idx: start_idx,
            f: self.nodes[start_idx].f,
            seq,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let outcome = 'search: loop {
            let Some(current) = self.open.pop() else {
                break 'search Ok(false);
            };

            let ci = current.idx;

            // Skip entries superseded by a later improvement.
            {
                let n = &self.nodes[ci];
                if n.generation != cur_gen || !n.open || n.f != current.f || n.seq != current.seq {
                    continue;
                }
            }

            if self.stats.expanded >= budget.max_expansions() {
                break 'search Err(SearchError::Timeout {
                    expanded: self.stats.expanded,
                });
            }
            self.stats.expanded += 1;

            if ci == goal_idx {
                break 'search Ok(true);
            }

            self.nodes[ci].open = false;
            let current_g = self.nodes[ci].g;
            let current_coord = self.coord(ci);

            nbuf.clear();
            pather.neighbors(current_coord, &mut nbuf);

            for &nc in nbuf.iter() {
                let Some(ni) = self.idx(nc) else {
                    continue;
                };
                let tentative_g = current_g + pather.cost(current_coord, nc);

                let n = &mut self.nodes[ni];
                if n.generation == cur_gen {
                    if tentative_g >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                    n.g = UNREACHED;
                    n.open = false;
                }

                n.g = tentative_g;
                n.f = tentative_g + pather.estimate(nc, to);
                n.parent = ci;
                if !n.open {
                    // Entering the frontier: take the next discovery slot.
                    // An improvement while already open keeps its slot.
                    seq += 1;
                    n.seq = seq;
                    n.open = true;
                    self.stats.discovered += 1;
                }

                self.open.push(NodeRef {
                    idx: ni,
                    f: n.f,
                    seq: n.seq,
                });
            }
        };

        self.nbuf = nbuf;
        self.open.clear();

        match outcome {
            Ok(true) => {}
            Ok(false) => {
                log::debug!(
                    "astar: no path {from} -> {to} ({} expanded)",
                    self.stats.expanded
                );
                return Ok(Path::empty());
            }
            Err(e) => {
                log::warn!("astar: {from} -> {to}: {e}");
                return Err(e);
            }
        }
        self.stats.found = true;

        // Reconstruct path.
        let mut coords = Vec::new();
        let mut ci = goal_idx;
        while ci != NO_PARENT {
            coords.push(self.coord(ci));
            ci = self.nodes[ci].parent;
        }
        coords.reverse();
        log::debug!(
            "astar: {from} -> {to} in {} steps ({} expanded, {} discovered)",
            coords.len() - 1,
            self.stats.expanded,
            self.stats.discovered
        );
        Ok(Path::from_vec(coords))
    }
}

/// Find a shortest path on `grid` from `start` to `goal`.
///
/// Convenience wrapper around a one-off [`PathFinder`] with an unlimited
/// budget. An empty path means no route exists.
pub fn find_path(grid: &Grid, start: Coord, goal: Coord) -> Result<Path, SearchError> {
    PathFinder::new(grid.size()).astar_path(grid, start, goal, SearchBudget::UNLIMITED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::manhattan;
    use crate::traits::{Pather, WeightedPather};
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn c(row: i32, col: i32) -> Coord {
        Coord::new(row, col)
    }

    fn grid_with(size: i32, blocked: &[(i32, i32)]) -> Grid {
        let mut g = Grid::new(size).unwrap();
        for &(r, col) in blocked {
            g.set_blocked(c(r, col)).unwrap();
        }
        g
    }

    fn assert_valid(grid: &Grid, path: &Path, start: Coord, goal: Coord) {
        assert_eq!(path.start(), Some(start));
        assert_eq!(path.goal(), Some(goal));
        for w in path.windows(2) {
            assert!(w[0].is_adjacent(w[1]), "{} -> {} not adjacent", w[0], w[1]);
        }
        for &p in &path[1..path.len() - 1] {
            assert_eq!(grid.is_blocked(p), Ok(false), "{p} is blocked");
        }
    }

    #[test]
    fn start_equals_goal() {
        let g = grid_with(3, &[]);
        let p = find_path(&g, c(1, 1), c(1, 1)).unwrap();
        assert_eq!(p.as_slice(), &[c(1, 1)]);
    }

    #[test]
    fn straight_line() {
        let g = grid_with(5, &[]);
        let p = find_path(&g, c(2, 0), c(2, 4)).unwrap();
        assert_eq!(p.as_slice(), &[c(2, 0), c(2, 1), c(2, 2), c(2, 3), c(2, 4)]);
    }

    #[test]
    fn open_grid_tie_break_is_fixed() {
        // Equal f everywhere on the optimal band; discovery order (down
        // before right) makes the search descend the first column first.
        let g = grid_with(3, &[]);
        let p = find_path(&g, c(0, 0), c(2, 2)).unwrap();
        assert_eq!(p.as_slice(), &[c(0, 0), c(1, 0), c(2, 0), c(2, 1), c(2, 2)]);
    }

    #[test]
    fn detour_around_wall() {
        // . # .
        // . # .
        // . . .
        let g = grid_with(3, &[(0, 1), (1, 1)]);
        let p = find_path(&g, c(0, 0), c(0, 2)).unwrap();
        assert_eq!(p.len(), 7);
        assert_valid(&g, &p, c(0, 0), c(0, 2));
    }

    #[test]
    fn out_of_bounds_endpoints() {
        let g = grid_with(3, &[]);
        assert_eq!(
            find_path(&g, c(3, 0), c(0, 0)),
            Err(SearchError::OutOfBounds { coord: c(3, 0), size: 3 })
        );
        assert_eq!(
            find_path(&g, c(0, 0), c(0, -1)),
            Err(SearchError::OutOfBounds { coord: c(0, -1), size: 3 })
        );
    }

    #[test]
    fn blocked_goal_is_unreachable() {
        let g = grid_with(3, &[(2, 2)]);
        assert!(find_path(&g, c(0, 0), c(2, 2)).unwrap().is_empty());
    }

    #[test]
    fn blocked_start_still_searches() {
        let g = grid_with(3, &[(0, 0)]);
        let p = find_path(&g, c(0, 0), c(0, 2)).unwrap();
        assert_eq!(p.len(), 3);
    }

    #[test]
    fn budget_exhaustion_times_out() {
        let g = grid_with(10, &[]);
        let mut pf = PathFinder::new(10);
        let err = pf
            .astar_path(&g, c(0, 0), c(9, 9), SearchBudget::expansions(3))
            .unwrap_err();
        assert_eq!(err, SearchError::Timeout { expanded: 3 });
        assert!(!pf.last_stats().found);
    }

    #[test]
    fn exact_budget_suffices() {
        let g = grid_with(5, &[]);
        let mut pf = PathFinder::new(5);
        let full = pf
            .astar_path(&g, c(0, 0), c(4, 4), SearchBudget::UNLIMITED)
            .unwrap();
        let needed = pf.last_stats().expanded;
        let again = pf
            .astar_path(&g, c(0, 0), c(4, 4), SearchBudget::expansions(needed))
            .unwrap();
        assert_eq!(full, again);
    }

    #[test]
    fn stats_report_search_effort() {
        let g = grid_with(5, &[]);
        let mut pf = PathFinder::new(5);
        pf.astar_path(&g, c(0, 0), c(0, 4), SearchBudget::UNLIMITED)
            .unwrap();
        let s = pf.last_stats();
        assert!(s.found);
        assert!(s.expanded >= 5);
        assert!(s.discovered >= s.expanded);
    }

    #[test]
    fn finder_reuse_across_grids() {
        let open = grid_with(4, &[]);
        let walled = grid_with(4, &[(0, 1), (1, 1), (2, 1), (3, 1)]);
        let mut pf = PathFinder::new(4);
        let a = pf
            .astar_path(&open, c(0, 0), c(0, 3), SearchBudget::UNLIMITED)
            .unwrap();
        assert_eq!(a.len(), 4);
        let b = pf
            .astar_path(&walled, c(0, 0), c(0, 3), SearchBudget::UNLIMITED)
            .unwrap();
        assert!(b.is_empty());
        let a2 = pf
            .astar_path(&open, c(0, 0), c(0, 3), SearchBudget::UNLIMITED)
            .unwrap();
        assert_eq!(a, a2);
    }

    /// Plain A* over an insertion-ordered open list, selecting the first
    /// entry with the strictly smallest f. Improving an open entry leaves
    /// it in place; anything else re-enters at the back.
    fn linear_scan_astar<P: AstarPather>(pather: &P, start: Coord, goal: Coord) -> Vec<Coord> {
        if start == goal {
            return vec![start];
        }
        let mut g: HashMap<Coord, i32> = HashMap::from([(start, 0)]);
        let mut parent: HashMap<Coord, Coord> = HashMap::new();
        let mut open = vec![start];
        let mut buf = Vec::new();
        while !open.is_empty() {
            let f = |p: &Coord| g[p] + pather.estimate(*p, goal);
            let mut best = 0;
            for i in 1..open.len() {
                if f(&open[i]) < f(&open[best]) {
                    best = i;
                }
            }
            let cur = open.remove(best);
            if cur == goal {
                let mut path = vec![cur];
                while let Some(&p) = parent.get(path.last().unwrap()) {
                    path.push(p);
                }
                path.reverse();
                return path;
            }
            buf.clear();
            pather.neighbors(cur, &mut buf);
            for &n in &buf {
                let t = g[&cur] + pather.cost(cur, n);
                if g.get(&n).is_some_and(|&old| t >= old) {
                    continue;
                }
                g.insert(n, t);
                parent.insert(n, cur);
                if !open.contains(&n) {
                    open.push(n);
                }
            }
        }
        Vec::new()
    }

    /// A small graph whose heuristic is admissible but inconsistent:
    ///
    /// ```text
    /// S(0,0) -1-> A(0,1) -1-> C(1,1) -10-> G(2,2)
    /// S(0,0) -1-> B(1,0) -3-> C(1,1)
    /// ```
    ///
    /// `h(A) = 10` delays A until C is closed through B, so C is re-opened
    /// and G, still open, is improved.
    struct Reopening;

    impl Pather for Reopening {
        fn neighbors(&self, p: Coord, buf: &mut Vec<Coord>) {
            match (p.row, p.col) {
                (0, 0) => buf.extend([c(0, 1), c(1, 0)]),
                (0, 1) | (1, 0) => buf.push(c(1, 1)),
                (1, 1) => buf.push(c(2, 2)),
                _ => {}
            }
        }
    }

    impl WeightedPather for Reopening {
        fn cost(&self, from: Coord, to: Coord) -> i32 {
            match ((from.row, from.col), (to.row, to.col)) {
                ((1, 0), (1, 1)) => 3,
                ((1, 1), (2, 2)) => 10,
                _ => 1,
            }
        }
    }

    impl AstarPather for Reopening {
        fn estimate(&self, from: Coord, _to: Coord) -> i32 {
            if from == c(0, 1) { 10 } else { 0 }
        }
    }

    #[test]
    fn closed_node_is_reopened_on_improvement() {
        let mut pf = PathFinder::new(3);
        let p = pf
            .astar_path(&Reopening, c(0, 0), c(2, 2), SearchBudget::UNLIMITED)
            .unwrap();
        assert_eq!(p.as_slice(), &[c(0, 0), c(0, 1), c(1, 1), c(2, 2)]);
        // S, A, B, C, G, then C again; G's improvement is not a new entry.
        assert_eq!(pf.last_stats().discovered, 6);
        // S, B, C, A, C, G. G's first entry is left unpopped.
        assert_eq!(pf.last_stats().expanded, 6);
        assert_eq!(
            p.into_vec(),
            linear_scan_astar(&Reopening, c(0, 0), c(2, 2))
        );
    }

    #[test]
    fn search_is_limited_to_finder_extent() {
        // # . . .
        // . # . .
        // . . . .
        // The only route from (1, 0) to (0, 1) leaves the top-left 2x2.
        let g = grid_with(4, &[(0, 0), (1, 1)]);
        let mut pf = PathFinder::new(2);
        let p = pf
            .astar_path(&g, c(1, 0), c(0, 1), SearchBudget::UNLIMITED)
            .unwrap();
        assert!(p.is_empty());
        pf.set_size(g.size());
        let p = pf
            .astar_path(&g, c(1, 0), c(0, 1), SearchBudget::UNLIMITED)
            .unwrap();
        assert_eq!(p.len(), 7);
        assert_valid(&g, &p, c(1, 0), c(0, 1));
    }

    /// Entering row 0 costs 5, everything else 1.
    struct Uneven;

    impl Pather for Uneven {
        fn neighbors(&self, p: Coord, buf: &mut Vec<Coord>) {
            for n in p.neighbors_4() {
                if (0..4).contains(&n.row) && (0..4).contains(&n.col) {
                    buf.push(n);
                }
            }
        }
    }

    impl WeightedPather for Uneven {
        fn cost(&self, _from: Coord, to: Coord) -> i32 {
            if to.row == 0 { 5 } else { 1 }
        }
    }

    impl AstarPather for Uneven {
        fn estimate(&self, from: Coord, to: Coord) -> i32 {
            manhattan(from, to)
        }
    }

    #[test]
    fn weighted_pather_prefers_cheap_rows() {
        let mut pf = PathFinder::new(4);
        let p = pf
            .astar_path(&Uneven, c(1, 0), c(1, 3), SearchBudget::UNLIMITED)
            .unwrap();
        assert!(p.iter().all(|q| q.row != 0));
        assert_eq!(p.len(), 4);
    }

    proptest! {
        #[test]
        fn matches_linear_scan_open_list(
            size in 1i32..12,
            blocked in proptest::collection::vec((0i32..12, 0i32..12), 0..60),
            sr in 0i32..12, sc in 0i32..12,
            gr in 0i32..12, gc in 0i32..12,
        ) {
            let start = c(sr % size, sc % size);
            let goal = c(gr % size, gc % size);
            let mut g = Grid::new(size).unwrap();
            for (r, col) in blocked {
                let p = c(r % size, col % size);
                if p != start && p != goal {
                    g.set_blocked(p).unwrap();
                }
            }
            let p = find_path(&g, start, goal).unwrap();
            prop_assert_eq!(p.into_vec(), linear_scan_astar(&g, start, goal));
        }

        #[test]
        fn open_grid_paths_are_optimal(
            size in 1i32..12,
            sr in 0i32..12, sc in 0i32..12,
            gr in 0i32..12, gc in 0i32..12,
        ) {
            let start = c(sr % size, sc % size);
            let goal = c(gr % size, gc % size);
            let g = Grid::new(size).unwrap();
            let p = find_path(&g, start, goal).unwrap();
            prop_assert_eq!(p.steps() as i32, manhattan(start, goal));
        }

        #[test]
        fn paths_are_valid_and_deterministic(
            size in 2i32..10,
            blocked in proptest::collection::vec((0i32..10, 0i32..10), 0..30),
            sr in 0i32..10, sc in 0i32..10,
            gr in 0i32..10, gc in 0i32..10,
        ) {
            let start = c(sr % size, sc % size);
            let goal = c(gr % size, gc % size);
            let mut g = Grid::new(size).unwrap();
            for (r, col) in blocked {
                let p = c(r % size, col % size);
                if p != start && p != goal {
                    g.set_blocked(p).unwrap();
                }
            }
            let p = find_path(&g, start, goal).unwrap();
            if !p.is_empty() {
                prop_assert_eq!(p.start(), Some(start));
                prop_assert_eq!(p.goal(), Some(goal));
                for w in p.windows(2) {
                    prop_assert!(w[0].is_adjacent(w[1]));
                }
                for &q in p.iter() {
                    prop_assert_eq!(g.is_blocked(q), Ok(false));
                }
                prop_assert!(p.steps() as i32 >= manhattan(start, goal));
            }
            prop_assert_eq!(find_path(&g, start, goal).unwrap(), p);
        }
    }
}
