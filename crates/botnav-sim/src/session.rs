//! The placement session: an explicit state machine for painting the source,
//! the destination and obstacles, then planning a run.

use std::fmt;

use rand::{Rng, RngExt};

use botnav_core::{Coord, Grid};
use botnav_paths::{Path, PathFinder};

use crate::config::SimConfig;
use crate::error::SessionError;
use crate::walker::Walker;

/// Placement phase. Clicks move the session forward through these in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    AwaitingSource,
    AwaitingDestination,
    PlacingObstacles,
    /// Obstacle quota used up; only running or clearing remain.
    Ready,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AwaitingSource => "awaiting source",
            Self::AwaitingDestination => "awaiting destination",
            Self::PlacingObstacles => "placing obstacles",
            Self::Ready => "ready",
        })
    }
}

/// What occupies a cell, from the user's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Empty,
    Source,
    Destination,
    Obstacle,
}

/// Result of a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Source,
    Destination,
    Obstacle {
        /// Obstacles still allowed after this one.
        remaining: usize,
    },
    /// The cell was already painted, or nothing more may be placed.
    Ignored,
}

/// Interactive simulation state: one grid, its endpoints and obstacle quota.
///
/// Only unpainted cells accept paint. The first accepted click sets the
/// source, the second the destination, and later clicks place obstacles
/// until the configured quota is reached.
pub struct Session {
    config: SimConfig,
    grid: Grid,
    finder: PathFinder,
    source: Option<Coord>,
    destination: Option<Coord>,
    obstacles: usize,
    phase: Phase,
}

impl Session {
    /// Start an empty session.
    pub fn new(config: SimConfig) -> Result<Self, SessionError> {
        config.validate()?;
        let grid = Grid::new(config.grid_size)?;
        Ok(Self {
            finder: PathFinder::new(grid.size()),
            config,
            grid,
            source: None,
            destination: None,
            obstacles: 0,
            phase: Phase::AwaitingSource,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn source(&self) -> Option<Coord> {
        self.source
    }

    pub fn destination(&self) -> Option<Coord> {
        self.destination
    }

    /// Number of obstacles placed so far.
    pub fn obstacles_placed(&self) -> usize {
        self.obstacles
    }

    /// Obstacles that may still be placed.
    pub fn obstacles_remaining(&self) -> usize {
        self.config.max_obstacles - self.obstacles
    }

    /// What occupies `c`. Out-of-bounds coordinates are an error.
    pub fn cell_kind(&self, c: Coord) -> Result<CellKind, SessionError> {
        if self.grid.is_blocked(c)? {
            Ok(CellKind::Obstacle)
        } else if self.source == Some(c) {
            Ok(CellKind::Source)
        } else if self.destination == Some(c) {
            Ok(CellKind::Destination)
        } else {
            Ok(CellKind::Empty)
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            log::debug!("session: {} -> {}", self.phase, phase);
            self.phase = phase;
        }
    }

    /// Phase to enter once the obstacle count has changed.
    fn obstacle_phase(&self) -> Phase {
        if self.obstacles >= self.config.max_obstacles {
            Phase::Ready
        } else {
            Phase::PlacingObstacles
        }
    }

    /// Paint `c` according to the current phase.
    pub fn click(&mut self, c: Coord) -> Result<Placement, SessionError> {
        if self.cell_kind(c)? != CellKind::Empty {
            return Ok(Placement::Ignored);
        }
        match self.phase {
            Phase::AwaitingSource => {
                self.source = Some(c);
                self.set_phase(Phase::AwaitingDestination);
                Ok(Placement::Source)
            }
            Phase::AwaitingDestination => {
                self.destination = Some(c);
                let next = self.obstacle_phase();
                self.set_phase(next);
                Ok(Placement::Destination)
            }
            Phase::PlacingObstacles => {
                let remaining = self.place_obstacle(c)?;
                Ok(Placement::Obstacle { remaining })
            }
            Phase::Ready => Ok(Placement::Ignored),
        }
    }

    /// Set both endpoints at once on a fresh session.
    pub fn set_endpoints(&mut self, source: Coord, destination: Coord) -> Result<(), SessionError> {
        if self.phase != Phase::AwaitingSource {
            return Err(SessionError::WrongPhase(self.phase));
        }
        for c in [source, destination] {
            if self.cell_kind(c)? != CellKind::Empty {
                return Err(SessionError::CellTaken(c));
            }
        }
        if source == destination {
            return Err(SessionError::CellTaken(destination));
        }
        self.source = Some(source);
        self.destination = Some(destination);
        let next = self.obstacle_phase();
        self.set_phase(next);
        Ok(())
    }

    /// Block `c`, returning how many obstacles may still be placed.
    pub fn place_obstacle(&mut self, c: Coord) -> Result<usize, SessionError> {
        if self.phase != Phase::PlacingObstacles {
            return Err(SessionError::WrongPhase(self.phase));
        }
        if self.cell_kind(c)? != CellKind::Empty {
            return Err(SessionError::CellTaken(c));
        }
        self.grid.set_blocked(c)?;
        self.obstacles += 1;
        let next = self.obstacle_phase();
        self.set_phase(next);
        Ok(self.obstacles_remaining())
    }

    /// Place up to `count` obstacles on random unpainted cells, bounded by
    /// the remaining quota. Returns how many were placed.
    pub fn scatter_obstacles(&mut self, rng: &mut impl Rng, count: usize) -> usize {
        if self.phase != Phase::PlacingObstacles {
            return 0;
        }
        let mut free: Vec<Coord> = self
            .grid
            .coords()
            .filter(|&c| matches!(self.cell_kind(c), Ok(CellKind::Empty)))
            .collect();
        let mut placed = 0;
        while placed < count && self.phase == Phase::PlacingObstacles && !free.is_empty() {
            let c = free.swap_remove(rng.random_range(0..free.len()));
            if self.place_obstacle(c).is_ok() {
                placed += 1;
            }
        }
        log::debug!("session: scattered {placed} obstacles");
        placed
    }

    /// Forget endpoints and obstacles. The grid size is unchanged.
    pub fn clear(&mut self) {
        self.grid.reset();
        self.source = None;
        self.destination = None;
        self.obstacles = 0;
        self.set_phase(Phase::AwaitingSource);
    }

    /// Compute the bot's route from source to destination.
    pub fn plan(&mut self) -> Result<Path, SessionError> {
        let (Some(source), Some(destination)) = (self.source, self.destination) else {
            return Err(SessionError::MissingEndpoints);
        };
        let path = self
            .finder
            .astar_path(&self.grid, source, destination, self.config.search_budget)?;
        if path.is_empty() {
            log::info!("session: no path {source} -> {destination}");
            return Err(SessionError::NoPath);
        }
        Ok(path)
    }

    /// Plan a route and hand it to a [`Walker`] using the configured step
    /// interval.
    pub fn run(&mut self) -> Result<Walker, SessionError> {
        let path = self.plan()?;
        Ok(Walker::new(path, self.config.step_interval))
    }
}
