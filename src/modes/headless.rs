//! Headless mode: run a whole match without a terminal.
//!
//! Both serpents are fed from scripted input sources, so a run is fully
//! reproducible when the configuration carries a seed. Progress is reported
//! through `tracing` only.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::game::{GameConfig, MatchSnapshot, MatchStatus};
use crate::input::ScriptedSource;
use crate::scheduler::{MatchHandle, MatchTasks};

pub struct HeadlessMode {
    handle: Arc<MatchHandle>,
    scripts: Option<(ScriptedSource, ScriptedSource)>,
}

impl HeadlessMode {
    pub fn new(config: GameConfig) -> Self {
        Self::with_scripts(config, ScriptedSource::idle(), ScriptedSource::idle())
    }

    pub fn with_scripts(config: GameConfig, one: ScriptedSource, two: ScriptedSource) -> Self {
        Self {
            handle: MatchHandle::new(config),
            scripts: Some((one, two)),
        }
    }

    /// Play the match to the end and return the final snapshot
    pub async fn run(&mut self) -> Result<Arc<MatchSnapshot>> {
        let (one, two) = self
            .scripts
            .take()
            .context("Match has already been played")?;
        let mut snapshots = self.handle.subscribe();
        let tasks = MatchTasks::spawn(&self.handle, one, two);

        let mut last_round = 0;
        while snapshots.changed().await.is_ok() {
            let snapshot = snapshots.borrow_and_update().clone();
            if snapshot.status == MatchStatus::RoundOver && snapshot.round != last_round {
                last_round = snapshot.round;
                info!(
                    round = snapshot.round,
                    tick = snapshot.tick,
                    serpent_1_alive = snapshot.serpents[0].alive,
                    serpent_2_alive = snapshot.serpents[1].alive,
                    "round frozen"
                );
            }
            if snapshot.is_game_over() {
                break;
            }
        }

        tasks.join().await.context("Match activities failed")?;

        let snapshot = self.handle.snapshot();
        info!(
            winner = ?snapshot.winner,
            serpent_1_lives = snapshot.lives[0],
            serpent_2_lives = snapshot.lives[1],
            rounds = snapshot.round.saturating_sub(1),
            "match finished"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, SerpentId, Verdict};

    #[tokio::test(start_paused = true)]
    async fn test_idle_match_ends_in_draw() {
        let mut mode = HeadlessMode::new(GameConfig {
            starting_lives: 2,
            ..GameConfig::small().with_seed(8)
        });

        let snapshot = mode.run().await.unwrap();
        assert!(snapshot.is_game_over());
        assert_eq!(snapshot.lives, [0, 0]);
        assert_eq!(snapshot.winner, Some(Verdict::Draw));
        assert!(mode.run().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_scripted_turn_wins_the_round() {
        // Serpent one dives out through the top wall; the idle serpent keeps going
        let mut mode = HeadlessMode::with_scripts(
            GameConfig {
                starting_lives: 1,
                ..GameConfig::small().with_seed(8)
            },
            ScriptedSource::new([Some(Direction::Up)]),
            ScriptedSource::idle(),
        );

        let snapshot = mode.run().await.unwrap();
        assert_eq!(snapshot.winner, Some(Verdict::Winner(SerpentId::Two)));
        assert_eq!(snapshot.lives, [0, 1]);
    }
}
