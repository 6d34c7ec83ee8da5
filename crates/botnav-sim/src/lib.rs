//! Interactive bot-navigation simulation built on `botnav-core` and
//! `botnav-paths`.
//!
//! A [`Session`] is the explicit context object a presentation layer owns:
//! it holds the grid, the placed source and destination, the obstacle quota
//! and the current [`Phase`] of the placement protocol. Running a session
//! yields a [`Walker`] that animates the bot along the computed route.

pub mod config;
pub mod error;
pub mod session;
pub mod walker;

pub use config::SimConfig;
pub use error::{ConfigError, SessionError};
pub use session::{CellKind, Phase, Placement, Session};
pub use walker::{Step, Walker};
