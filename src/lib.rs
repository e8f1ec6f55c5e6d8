//! Serpents - a two-player arena game with a concurrent tick scheduler
//!
//! This library provides:
//! - Core match rules: serpents, food, rounds, lives (game module)
//! - The concurrent activities that run a match (scheduler module)
//! - Pluggable directional input (input module)
//! - Terminal rendering (render module)
//! - Match statistics (metrics module)
//! - Terminal and headless front-ends (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod scheduler;
