//! Error types for the game core.

use super::round::RoundPhase;

/// Invalid configuration values.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The grid cannot hold both spawn cells.
    #[error("grid size {size} is too small (minimum {min})")]
    GridTooSmall {
        /// Requested size.
        size: usize,
        /// Smallest usable size.
        min: usize,
    },

    /// Grid coordinates would not fit the board's cell type.
    #[error("grid size {size} is too large (maximum {max})")]
    GridTooLarge {
        /// Requested size.
        size: usize,
        /// Largest usable size.
        max: usize,
    },

    /// The board's pixel extent overflows.
    #[error("board with cell size {cell_size} and margin {margin} is too large")]
    BoardTooLarge {
        /// Requested cell size in pixels.
        cell_size: u32,
        /// Requested margin in pixels.
        margin: u32,
    },

    /// A timer period of zero would spin.
    #[error("{name} must be greater than zero")]
    ZeroPeriod {
        /// Name of the offending option.
        name: &'static str,
    },

    /// A match needs at least one life per serpent.
    #[error("starting lives must be at least 1")]
    NoLives,
}

/// Contract violations raised by the match engine.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GameError {
    /// A round transition was requested from the wrong phase.
    #[error("cannot {action} while round is {phase:?}")]
    InvalidTransition {
        /// What was attempted.
        action: &'static str,
        /// Phase the coordinator was in.
        phase: RoundPhase,
    },

    /// A round was resolved although both serpents are alive.
    #[error("round {round} has no casualty to resolve")]
    NoCasualty {
        /// Round number.
        round: u32,
    },

    /// The match has already been decided.
    #[error("match is already over")]
    MatchOver,
}
