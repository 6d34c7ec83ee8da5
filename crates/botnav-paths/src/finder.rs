use botnav_core::Coord;

use crate::error::SearchError;

/// Upper bound on the number of nodes a single search may expand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct SearchBudget {
    max_expansions: usize,
}

impl SearchBudget {
    /// No limit: the search runs until it finds the goal or exhausts the
    /// frontier.
    pub const UNLIMITED: Self = Self {
        max_expansions: usize::MAX,
    };

    /// Allow at most `n` node expansions.
    pub const fn expansions(n: usize) -> Self {
        Self { max_expansions: n }
    }

    /// Maximum number of expansions.
    #[inline]
    pub const fn max_expansions(self) -> usize {
        self.max_expansions
    }

    #[inline]
    pub const fn is_unlimited(self) -> bool {
        self.max_expansions == usize::MAX
    }
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self::UNLIMITED
    }
}

/// Counters describing the most recent search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Nodes selected from the frontier.
    pub expanded: usize,
    /// Times a coordinate entered the frontier.
    pub discovered: usize,
    /// Whether the goal was reached.
    pub found: bool,
}

// ---------------------------------------------------------------------------
// Internal node for A* priority-queue searches
// ---------------------------------------------------------------------------

pub(crate) const NO_PARENT: usize = usize::MAX;

#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) f: i32,
    pub(crate) parent: usize,
    /// Discovery sequence number; breaks f-score ties first-discovered-first.
    pub(crate) seq: u64,
    pub(crate) generation: u32,
    pub(crate) open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            f: 0,
            parent: NO_PARENT,
            seq: 0,
            generation: 0,
            open: false,
        }
    }
}

/// Reference into the node array, ordered by `(f, seq)` for use in
/// `BinaryHeap`.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: i32,
    pub(crate) seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest (f, seq) first.
        other.f.cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Sentinel g-score meaning "not yet reached".
pub(crate) const UNREACHED: i32 = i32::MAX;

// ---------------------------------------------------------------------------
// PathFinder
// ---------------------------------------------------------------------------

/// Reusable A* search context for a square grid extent.
///
/// `PathFinder` owns the per-cell search state, the open list and a scratch
/// neighbour buffer so that repeated queries incur no allocations after the
/// first use. Per-cell state is invalidated lazily by bumping a generation
/// counter instead of clearing the node array.
pub struct PathFinder {
    pub(crate) size: i32,
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    pub(crate) open: std::collections::BinaryHeap<NodeRef>,
    pub(crate) nbuf: Vec<Coord>,
    pub(crate) stats: SearchStats,
}

impl PathFinder {
    /// Create a finder for a `size`×`size` extent.
    pub fn new(size: i32) -> Self {
        let size = size.max(0);
        let len = (size as usize) * (size as usize);
        Self {
            size,
            nodes: vec![Node::default(); len],
            generation: 0,
            open: std::collections::BinaryHeap::new(),
            nbuf: Vec::with_capacity(4),
            stats: SearchStats::default(),
        }
    }

    /// Change the searched extent, reusing caches when they are large enough.
    pub fn set_size(&mut self, size: i32) {
        let size = size.max(0);
        let new_len = (size as usize) * (size as usize);
        self.size = size;
        self.stats = SearchStats::default();

        if new_len <= self.nodes.len() {
            // Stale entries are ignored once the generation moves on.
            self.next_generation();
            return;
        }

        self.nodes.clear();
        self.nodes.resize(new_len, Node::default());
        self.generation = 0;
    }

    /// Side length of the searched extent.
    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Statistics of the most recent search.
    #[inline]
    pub fn last_stats(&self) -> SearchStats {
        self.stats
    }

    /// Start a fresh generation, returning its stamp.
    pub(crate) fn next_generation(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: stamps from 2^32 searches ago would look current.
            for n in self.nodes.iter_mut() {
                n.generation = 0;
            }
            self.generation = 1;
        }
        self.generation
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Coord` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, c: Coord) -> Option<usize> {
        if !(0..self.size).contains(&c.row) || !(0..self.size).contains(&c.col) {
            return None;
        }
        Some(c.row as usize * self.size as usize + c.col as usize)
    }

    /// Like [`idx`](Self::idx) but reports the offending coordinate.
    pub(crate) fn endpoint_idx(&self, c: Coord) -> Result<usize, SearchError> {
        self.idx(c).ok_or(SearchError::OutOfBounds {
            coord: c,
            size: self.size,
        })
    }

    /// Convert a flat index back to a `Coord`.
    #[inline]
    pub(crate) fn coord(&self, idx: usize) -> Coord {
        let n = self.size as usize;
        Coord::new((idx / n) as i32, (idx % n) as i32)
    }
}
