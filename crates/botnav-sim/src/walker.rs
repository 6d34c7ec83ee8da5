//! Step-by-step traversal of a computed path.
//!
//! A [`Walker`] is externally clocked: the caller reports elapsed time and
//! the walker emits one [`Step`] per full interval, visiting every
//! coordinate of the path strictly in order.

use std::time::Duration;

use botnav_core::Coord;
use botnav_paths::Path;

/// A single move of the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Index of `to` within the path.
    pub index: usize,
    pub from: Coord,
    pub to: Coord,
}

/// Animates a bot along a [`Path`].
#[derive(Debug, Clone)]
pub struct Walker {
    path: Path,
    index: usize,
    interval: Duration,
    pending: Duration,
}

impl Walker {
    /// Place the bot at the start of `path`, moving once every `interval`.
    pub fn new(path: Path, interval: Duration) -> Self {
        Self {
            path,
            index: 0,
            interval,
            pending: Duration::ZERO,
        }
    }

    /// Current bot position, or `None` for an empty path.
    pub fn position(&self) -> Option<Coord> {
        self.path.get(self.index).copied()
    }

    /// Index of the current position within the path.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the bot has reached the last coordinate.
    pub fn is_finished(&self) -> bool {
        self.index + 1 >= self.path.len()
    }

    /// Moves left before the bot arrives.
    pub fn remaining(&self) -> usize {
        self.path.steps().saturating_sub(self.index)
    }

    /// Move to the next coordinate immediately.
    pub fn step(&mut self) -> Option<Step> {
        if self.is_finished() {
            return None;
        }
        let from = self.path[self.index];
        self.index += 1;
        let to = self.path[self.index];
        log::trace!("walker: {from} -> {to}");
        Some(Step {
            index: self.index,
            from,
            to,
        })
    }

    /// Report `elapsed` time and return the moves that became due.
    ///
    /// Leftover time below one interval carries over to the next call.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Step> {
        let mut steps = Vec::new();
        if self.is_finished() {
            return steps;
        }
        self.pending = self.pending.saturating_add(elapsed);
        while self.pending >= self.interval {
            let Some(s) = self.step() else {
                break;
            };
            self.pending -= self.interval;
            steps.push(s);
        }
        if self.is_finished() {
            self.pending = Duration::ZERO;
        }
        steps
    }

    /// Time until the next move is due, or `None` once finished.
    pub fn until_next(&self) -> Option<Duration> {
        if self.is_finished() {
            return None;
        }
        Some(self.interval.saturating_sub(self.pending))
    }
}
