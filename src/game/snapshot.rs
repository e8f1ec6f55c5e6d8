use serde::Serialize;

use super::action::Direction;
use super::round::{RoundPhase, Verdict};
use super::serpent::Serpent;
use super::state::{Cell, SerpentId};

/// Coarse match status; exactly one holds at any observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchStatus {
    Running,
    RoundOver,
    GameOver,
}

/// Read-only copy of a serpent for renderers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SerpentView {
    pub id: SerpentId,
    /// Head first
    pub body: Vec<Cell>,
    pub direction: Direction,
    pub alive: bool,
}

impl SerpentView {
    pub fn head(&self) -> Option<Cell> {
        self.body.first().copied()
    }
}

impl From<&Serpent> for SerpentView {
    fn from(serpent: &Serpent) -> Self {
        Self {
            id: serpent.id(),
            body: serpent.body().copied().collect(),
            direction: serpent.direction(),
            alive: serpent.is_alive(),
        }
    }
}

/// Consistent post-tick view of the whole match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSnapshot {
    pub grid_size: usize,
    pub tick: u64,
    pub round: u32,
    pub status: MatchStatus,
    pub phase: RoundPhase,
    pub serpents: [SerpentView; 2],
    pub food: Vec<Cell>,
    pub lives: [u32; 2],
    /// Verdict of the most recently resolved round
    pub last_verdict: Option<Verdict>,
    /// Set once the match is over
    pub winner: Option<Verdict>,
}

impl MatchSnapshot {
    pub fn serpent(&self, id: SerpentId) -> &SerpentView {
        &self.serpents[id.index()]
    }

    pub fn lives_of(&self, id: SerpentId) -> u32 {
        self.lives[id.index()]
    }

    pub fn is_game_over(&self) -> bool {
        self.status == MatchStatus::GameOver
    }
}
