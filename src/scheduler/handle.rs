//! Shared match handle passed to every activity.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

use crate::game::{Direction, GameConfig, MatchEngine, MatchSnapshot, SerpentId};

/// One match shared between the concurrent activities and the front-end.
///
/// Every mutation happens under a single lock and is followed, still under
/// the lock, by publishing a fresh snapshot. Readers never see a half-applied
/// tick. The lock is never held across an `.await`.
pub struct MatchHandle {
    config: GameConfig,
    engine: Mutex<MatchEngine>,
    snapshots: watch::Sender<Arc<MatchSnapshot>>,
    stop: watch::Sender<bool>,
}

impl MatchHandle {
    pub fn new(config: GameConfig) -> Arc<Self> {
        let engine = MatchEngine::new(config.clone());
        let (snapshots, _) = watch::channel(Arc::new(engine.snapshot()));
        let (stop, _) = watch::channel(false);

        Arc::new(Self {
            config,
            engine: Mutex::new(engine),
            snapshots,
            stop,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Read or mutate the engine without publishing
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut MatchEngine) -> R) -> R {
        f(&mut self.lock())
    }

    /// Mutate the engine and publish the resulting snapshot
    pub fn update<R>(&self, f: impl FnOnce(&mut MatchEngine) -> R) -> R {
        let mut engine = self.lock();
        let result = f(&mut engine);
        self.snapshots.send_replace(Arc::new(engine.snapshot()));
        result
    }

    pub fn steer(&self, id: SerpentId, direction: Direction) -> bool {
        self.with_engine(|engine| engine.steer(id, direction))
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> Arc<MatchSnapshot> {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<MatchSnapshot>> {
        self.snapshots.subscribe()
    }

    /// Ask every activity to wind down
    pub fn stop(&self) {
        self.stop.send_replace(true);
    }

    pub fn is_stopped(&self) -> bool {
        *self.stop.borrow()
    }

    pub fn stop_signal(&self) -> watch::Receiver<bool> {
        self.stop.subscribe()
    }

    fn lock(&self) -> MutexGuard<'_, MatchEngine> {
        // A panicking activity cannot leave the engine half-updated: every
        // engine method completes its mutation before returning.
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::MatchStatus;

    #[test]
    fn test_update_publishes_snapshot() {
        let handle = MatchHandle::new(GameConfig::default().with_seed(1));
        let mut rx = handle.subscribe();
        assert_eq!(rx.borrow_and_update().tick, 0);

        handle.update(MatchEngine::tick);

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().tick, 1);
        assert_eq!(handle.snapshot().tick, 1);
    }

    #[test]
    fn test_with_engine_does_not_publish() {
        let handle = MatchHandle::new(GameConfig::default().with_seed(1));
        let rx = handle.subscribe();

        assert!(handle.steer(SerpentId::One, Direction::Down));
        assert!(!rx.has_changed().unwrap());
        assert_eq!(handle.snapshot().status, MatchStatus::Running);
    }

    #[test]
    fn test_stop_signal() {
        let handle = MatchHandle::new(GameConfig::default());
        let rx = handle.stop_signal();
        assert!(!handle.is_stopped());

        handle.stop();
        assert!(handle.is_stopped());
        assert!(*rx.borrow());
    }
}
