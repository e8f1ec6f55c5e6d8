//! Round coordinator: the per-round state machine.
//!
//! A round runs until a tick leaves at least one serpent dead. The round is
//! then frozen (`PendingResolution`), picked up by the round watcher
//! (`Resolving`), and finally resolved back to `Running` with fresh serpents.

use serde::{Deserialize, Serialize};

use super::error::GameError;
use super::state::SerpentId;

/// Phase of the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    Running,
    PendingResolution,
    Resolving,
}

/// Outcome of a round or of the whole match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Winner(SerpentId),
    Draw,
}

impl Verdict {
    /// Decide a finished round from the alive flags. `None` if nobody died.
    pub fn from_alive(one_alive: bool, two_alive: bool) -> Option<Verdict> {
        match (one_alive, two_alive) {
            (false, false) => Some(Verdict::Draw),
            (false, true) => Some(Verdict::Winner(SerpentId::Two)),
            (true, false) => Some(Verdict::Winner(SerpentId::One)),
            (true, true) => None,
        }
    }

    /// Serpents that lose a life under this verdict
    pub fn losers(&self) -> Vec<SerpentId> {
        match self {
            Verdict::Draw => SerpentId::BOTH.to_vec(),
            Verdict::Winner(id) => vec![id.opponent()],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Winner(id) => id.label(),
            Verdict::Draw => "Draw",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundCoordinator {
    phase: RoundPhase,
    round: u32,
}

impl RoundCoordinator {
    pub fn new() -> Self {
        Self {
            phase: RoundPhase::Running,
            round: 1,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// One-based number of the current round
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn is_running(&self) -> bool {
        self.phase == RoundPhase::Running
    }

    /// Freeze the round after a tick that left someone dead
    pub fn end_round(&mut self) -> Result<(), GameError> {
        self.transition("end the round", RoundPhase::Running, RoundPhase::PendingResolution)
    }

    pub fn begin_resolution(&mut self) -> Result<(), GameError> {
        self.transition(
            "begin resolution",
            RoundPhase::PendingResolution,
            RoundPhase::Resolving,
        )
    }

    pub fn finish_resolution(&mut self) -> Result<(), GameError> {
        self.transition("finish resolution", RoundPhase::Resolving, RoundPhase::Running)?;
        self.round = self.round.saturating_add(1);
        Ok(())
    }

    fn transition(
        &mut self,
        action: &'static str,
        from: RoundPhase,
        to: RoundPhase,
    ) -> Result<(), GameError> {
        if self.phase != from {
            return Err(GameError::InvalidTransition {
                action,
                phase: self.phase,
            });
        }
        self.phase = to;
        Ok(())
    }
}

impl Default for RoundCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
