use std::ops::Deref;

use botnav_core::Coord;

/// An ordered sequence of coordinates from a start cell to a goal cell.
///
/// Consecutive coordinates are one orthogonal step apart. An empty path
/// means the goal could not be reached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Path {
    coords: Vec<Coord>,
}

impl Path {
    /// The empty path ("no path exists").
    pub const fn empty() -> Self {
        Self { coords: Vec::new() }
    }

    pub(crate) fn from_vec(coords: Vec<Coord>) -> Self {
        Self { coords }
    }

    /// Number of coordinates, including both endpoints.
    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Whether this path signals that the goal is unreachable.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Number of moves needed to walk the path.
    #[inline]
    pub fn steps(&self) -> usize {
        self.coords.len().saturating_sub(1)
    }

    /// First coordinate.
    pub fn start(&self) -> Option<Coord> {
        self.coords.first().copied()
    }

    /// Last coordinate.
    pub fn goal(&self) -> Option<Coord> {
        self.coords.last().copied()
    }

    pub fn as_slice(&self) -> &[Coord] {
        &self.coords
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coord> {
        self.coords.iter()
    }

    pub fn into_vec(self) -> Vec<Coord> {
        self.coords
    }
}

impl Deref for Path {
    type Target = [Coord];

    fn deref(&self) -> &[Coord] {
        &self.coords
    }
}

impl IntoIterator for Path {
    type Item = Coord;
    type IntoIter = std::vec::IntoIter<Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.coords.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Coord;
    type IntoIter = std::slice::Iter<'a, Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.coords.iter()
    }
}
