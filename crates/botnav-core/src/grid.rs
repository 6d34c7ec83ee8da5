//! The obstacle grid: a fixed-size square of free or blocked cells.

use crate::error::GridError;
use crate::geom::{Coord, Direction};

/// A square grid of cells, each either free or blocked.
///
/// Every coordinate `(r, c)` with `0 <= r, c < size` maps to exactly one
/// cell. Cells are stored row-major in a flat buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GridRepr", into = "GridRepr")
)]
pub struct Grid {
    size: i32,
    blocked: Vec<bool>,
}

impl Grid {
    /// Create a `size`×`size` grid with every cell free.
    ///
    /// Returns [`GridError::InvalidSize`] if `size < 1`.
    pub fn new(size: i32) -> Result<Self, GridError> {
        if size < 1 {
            return Err(GridError::InvalidSize { size });
        }
        let len = (size as usize) * (size as usize);
        log::debug!("grid: new {size}x{size}");
        Ok(Self {
            size,
            blocked: vec![false; len],
        })
    }

    /// Side length of the grid.
    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.blocked.len()
    }

    /// Always `false`: construction rejects empty grids.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `c` lies inside the grid.
    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        (0..self.size).contains(&c.row) && (0..self.size).contains(&c.col)
    }

    /// Flat index of `c`, or `None` if out of bounds.
    #[inline]
    fn index(&self, c: Coord) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        Some(c.row as usize * self.size as usize + c.col as usize)
    }

    fn checked_index(&self, c: Coord) -> Result<usize, GridError> {
        self.index(c).ok_or(GridError::OutOfBounds {
            coord: c,
            size: self.size,
        })
    }

    /// Mark `c` as blocked. Blocking an already-blocked cell is a no-op.
    pub fn set_blocked(&mut self, c: Coord) -> Result<(), GridError> {
        let i = self.checked_index(c)?;
        if !self.blocked[i] {
            log::trace!("grid: block {c}");
            self.blocked[i] = true;
        }
        Ok(())
    }

    /// Mark `c` as free again.
    pub fn clear_blocked(&mut self, c: Coord) -> Result<(), GridError> {
        let i = self.checked_index(c)?;
        if self.blocked[i] {
            log::trace!("grid: unblock {c}");
            self.blocked[i] = false;
        }
        Ok(())
    }

    /// Whether `c` is blocked. Out-of-bounds coordinates are an error, not
    /// `false`.
    pub fn is_blocked(&self, c: Coord) -> Result<bool, GridError> {
        self.checked_index(c).map(|i| self.blocked[i])
    }

    /// In-bounds, free orthogonal neighbours of `c` in up, down, left,
    /// right order.
    pub fn neighbors_of(&self, c: Coord) -> Vec<Coord> {
        let mut buf = Vec::with_capacity(4);
        self.push_neighbors(c, &mut buf);
        buf
    }

    /// Append the neighbours of `c` to `buf` without allocating. Same order
    /// and filtering as [`neighbors_of`](Self::neighbors_of).
    ///
    /// `c` itself may lie anywhere, including at the `i32` limits.
    pub fn push_neighbors(&self, c: Coord, buf: &mut Vec<Coord>) {
        for d in Direction::ALL {
            let Some(n) = c.checked_step(d) else {
                continue;
            };
            if let Some(i) = self.index(n) {
                if !self.blocked[i] {
                    buf.push(n);
                }
            }
        }
    }

    /// Clear every blocked flag. The size is unchanged.
    pub fn reset(&mut self) {
        log::debug!("grid: reset {} blocked cells", self.blocked_count());
        self.blocked.fill(false);
    }

    /// Number of blocked cells.
    pub fn blocked_count(&self) -> usize {
        self.blocked.iter().filter(|&&b| b).count()
    }

    /// Iterate over all coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        let n = self.size;
        (0..n).flat_map(move |row| (0..n).map(move |col| Coord::new(row, col)))
    }

    /// Iterate over blocked coordinates in row-major order.
    pub fn blocked(&self) -> impl Iterator<Item = Coord> + '_ {
        self.coords()
            .zip(self.blocked.iter())
            .filter_map(|(c, &b)| b.then_some(c))
    }
}

/// Serialised form: side length plus the list of blocked coordinates.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct GridRepr {
    size: i32,
    blocked: Vec<Coord>,
}

#[cfg(feature = "serde")]
impl From<Grid> for GridRepr {
    fn from(g: Grid) -> Self {
        Self {
            size: g.size,
            blocked: g.blocked().collect(),
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for Grid {
    type Error = GridError;

    fn try_from(repr: GridRepr) -> Result<Self, GridError> {
        let mut g = Grid::new(repr.size)?;
        for c in repr.blocked {
            g.set_blocked(c)?;
        }
        Ok(g)
    }
}
