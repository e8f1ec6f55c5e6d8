//! Tick scheduler: runs a match as a set of concurrent tokio tasks.
//!
//! On the multi-threaded runtime the activities run in parallel. They share
//! one [`MatchHandle`] and coordinate only through it:
//!
//! ```text
//! input watcher (x2) --steer--> +-------------+ --snapshot--> round watcher
//! food spawner ---request-----> | MatchHandle | --snapshot--> renderer
//! tick driver ----tick--------> +-------------+
//! ```

pub mod activities;
pub mod handle;

use std::sync::Arc;

use tokio::task::{JoinError, JoinSet};
use tracing::info;

use crate::game::SerpentId;
use crate::input::DirectionSource;

pub use handle::MatchHandle;

/// Errors surfaced when joining the match activities.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    /// An activity panicked or was aborted.
    #[error("match activity failed: {0}")]
    Join(#[from] JoinError),
}

/// Running activities of one match
pub struct MatchTasks {
    tasks: JoinSet<()>,
}

impl MatchTasks {
    /// Spawn the tick driver, the food spawner, the round watcher and one
    /// input watcher per serpent.
    pub fn spawn<A, B>(handle: &Arc<MatchHandle>, input_one: A, input_two: B) -> Self
    where
        A: DirectionSource,
        B: DirectionSource,
    {
        let mut tasks = JoinSet::new();
        tasks.spawn(activities::input_watcher(
            handle.clone(),
            SerpentId::One,
            input_one,
        ));
        tasks.spawn(activities::input_watcher(
            handle.clone(),
            SerpentId::Two,
            input_two,
        ));
        tasks.spawn(activities::tick_driver(handle.clone()));
        tasks.spawn(activities::food_spawner(handle.clone()));
        tasks.spawn(activities::round_watcher(handle.clone()));

        info!(activities = tasks.len(), "match started");
        Self { tasks }
    }

    /// Wait until every activity has exited
    pub async fn join(mut self) -> Result<(), SchedulerError> {
        while let Some(result) = self.tasks.join_next().await {
            result?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::game::{Cell, Direction, GameConfig, MatchStatus, RoundPhase, Verdict};
    use crate::input::{ChannelSource, ScriptedSource};

    fn config(lives: u32) -> GameConfig {
        GameConfig {
            starting_lives: lives,
            ..GameConfig::default().with_seed(17)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_straight_run_keeps_both_serpents_in_step() {
        let handle = MatchHandle::new(config(5));
        let mut snapshots = handle.subscribe();
        let tasks = MatchTasks::spawn(&handle, ScriptedSource::idle(), ScriptedSource::idle());

        let deadline = tokio::time::Instant::now() + Duration::from_millis(22 * 200 + 100);
        loop {
            tokio::select! {
                changed = snapshots.changed() => changed.unwrap(),
                _ = tokio::time::sleep_until(deadline) => break,
            }
            let snapshot = snapshots.borrow_and_update().clone();
            // Both serpents have always moved the same number of times
            let ticks = snapshot.tick as i32;
            assert_eq!(snapshot.serpents[0].head(), Some(Cell::new(1 + ticks, 1)));
            assert_eq!(snapshot.serpents[1].head(), Some(Cell::new(23 - ticks, 23)));
        }

        let snapshot = handle.snapshot();
        assert_eq!(snapshot.tick, 22);
        assert_eq!(snapshot.status, MatchStatus::Running);
        assert_eq!(snapshot.lives, [5, 5]);

        handle.stop();
        tasks.join().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_match_ends_and_activities_exit() {
        let handle = MatchHandle::new(config(1));
        // Serpent two turns into the bottom wall right away
        let tasks = MatchTasks::spawn(
            &handle,
            ScriptedSource::idle(),
            ScriptedSource::new([Some(Direction::Down)]),
        );

        tasks.join().await.unwrap();

        let snapshot = handle.snapshot();
        assert!(handle.is_stopped());
        assert_eq!(snapshot.status, MatchStatus::GameOver);
        assert_eq!(snapshot.lives, [1, 0]);
        assert_eq!(snapshot.last_verdict, Some(Verdict::Winner(SerpentId::One)));
        assert_eq!(snapshot.winner, Some(Verdict::Winner(SerpentId::One)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_round_is_frozen_during_hold() {
        let handle = MatchHandle::new(config(3));
        let (tx, input_one) = ChannelSource::new();
        let tasks = MatchTasks::spawn(&handle, input_one, ScriptedSource::idle());

        tx.send(Direction::Up).unwrap();
        // Two ticks take serpent one through the top wall
        tokio::time::sleep(Duration::from_millis(500)).await;
        let frozen = handle.snapshot();
        assert_eq!(frozen.status, MatchStatus::RoundOver);
        assert_eq!(frozen.phase, RoundPhase::Resolving);

        // Ticks and spawns keep firing but change nothing
        tokio::time::sleep(Duration::from_millis(2000)).await;
        let still = handle.snapshot();
        assert_eq!(still.serpents, frozen.serpents);
        assert_eq!(still.food, frozen.food);
        assert_eq!(still.tick, frozen.tick);

        // After the hold the next round starts from the spawn cells
        tokio::time::sleep(Duration::from_millis(1000)).await;
        let next = handle.snapshot();
        assert_eq!(next.round, 2);
        assert_eq!(next.lives, [2, 3]);
        assert_eq!(next.status, MatchStatus::Running);

        handle.stop();
        tasks.join().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawner_adds_food_while_running() {
        let handle = MatchHandle::new(GameConfig {
            food_spawn_period_ms: 900,
            ..config(5)
        });
        let tasks = MatchTasks::spawn(&handle, ScriptedSource::idle(), ScriptedSource::idle());

        // Request at 0.9s, placed by the tick at 1.0s
        tokio::time::sleep(Duration::from_millis(1100)).await;
        let snapshot = handle.snapshot();
        assert_eq!(snapshot.status, MatchStatus::Running);
        assert_eq!(snapshot.food.len(), 2);
        for cell in &snapshot.food {
            assert!(!snapshot.serpents.iter().any(|s| s.body.contains(cell)));
        }

        handle.stop();
        tasks.join().await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_full_match_on_worker_threads() {
        let handle = MatchHandle::new(GameConfig {
            grid_size: 8,
            starting_lives: 2,
            tick_period_ms: 2,
            food_spawn_period_ms: 5,
            round_hold_ms: 5,
            input_poll_ms: 1,
            ..GameConfig::default().with_seed(23)
        });
        // Nobody steers: both serpents run into the side walls each round
        let tasks = MatchTasks::spawn(&handle, ScriptedSource::idle(), ScriptedSource::idle());

        tokio::time::timeout(Duration::from_secs(10), tasks.join())
            .await
            .expect("match should finish")
            .unwrap();

        let snapshot = handle.snapshot();
        assert!(snapshot.is_game_over());
        assert_eq!(snapshot.lives, [0, 0]);
        assert_eq!(snapshot.winner, Some(Verdict::Draw));
    }
}
