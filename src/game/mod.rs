//! Core match logic for Serpents
//!
//! This module contains all the game rules without any I/O, timing or
//! rendering dependencies. The scheduler drives it from concurrent tasks,
//! tests drive it tick by tick.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod food;
pub mod round;
pub mod serpent;
pub mod snapshot;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::GameConfig;
pub use engine::{MatchEngine, RoundResult, TickOutcome};
pub use error::{ConfigError, GameError};
pub use food::FoodRegistry;
pub use round::{RoundCoordinator, RoundPhase, Verdict};
pub use serpent::Serpent;
pub use snapshot::{MatchSnapshot, MatchStatus, SerpentView};
pub use state::{Cell, Grid, SerpentId};
