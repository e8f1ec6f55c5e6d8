//! The concurrent activities of a running match.
//!
//! All board mutation happens in [`tick_driver`], one atomic step per tick.
//! Input watchers only change a serpent's queued direction, the spawner only
//! queues food requests, and the round watcher only acts once a round is
//! frozen. Every loop exits as soon as the stop signal is raised.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{Instant, interval, interval_at};
use tracing::{debug, info, warn};

use super::handle::MatchHandle;
use crate::game::{MatchEngine, RoundPhase, SerpentId};
use crate::input::DirectionSource;

/// Resolves once the stop flag is set (or its sender is gone)
async fn stopped(stop: &mut watch::Receiver<bool>) {
    // An error means the handle was dropped, which is as good as stopping.
    let _ = stop.wait_for(|&stopped| stopped).await;
}

/// Sample a serpent's input source and forward new directions
pub async fn input_watcher<S: DirectionSource>(
    handle: Arc<MatchHandle>,
    id: SerpentId,
    mut source: S,
) {
    let mut stop = handle.stop_signal();
    let mut poll = interval(handle.config().input_poll());

    loop {
        tokio::select! {
            _ = poll.tick() => {
                if let Some(direction) = source.poll_direction() {
                    if handle.steer(id, direction) {
                        debug!(serpent = %id, ?direction, "direction changed");
                    }
                }
            }
            _ = stopped(&mut stop) => break,
        }
    }
    debug!(serpent = %id, "input watcher stopped");
}

/// Move both serpents once per tick period
pub async fn tick_driver(handle: Arc<MatchHandle>) {
    let period = handle.config().tick_period();
    let mut stop = handle.stop_signal();
    let mut ticks = interval_at(Instant::now() + period, period);

    loop {
        tokio::select! {
            _ = ticks.tick() => {
                if let Some(outcome) = handle.update(MatchEngine::tick) {
                    if outcome.round_over {
                        debug!(tick = outcome.tick, "tick ended the round");
                    }
                }
            }
            _ = stopped(&mut stop) => break,
        }
    }
    debug!("tick driver stopped");
}

/// Queue a food item every spawn period while a round is running
pub async fn food_spawner(handle: Arc<MatchHandle>) {
    let period = handle.config().food_spawn_period();
    let mut stop = handle.stop_signal();
    let mut timer = interval_at(Instant::now() + period, period);

    loop {
        tokio::select! {
            _ = timer.tick() => {
                handle.with_engine(MatchEngine::request_food);
            }
            _ = stopped(&mut stop) => break,
        }
    }
    debug!("food spawner stopped");
}

/// Wait for a frozen round, hold it on screen, resolve it.
///
/// Raises the stop signal once the match is decided.
pub async fn round_watcher(handle: Arc<MatchHandle>) {
    let hold = handle.config().round_hold();
    let mut stop = handle.stop_signal();
    let mut snapshots = handle.subscribe();

    loop {
        let pending = snapshots.borrow_and_update().phase == RoundPhase::PendingResolution;
        if pending {
            if let Err(err) = handle.update(MatchEngine::begin_resolution) {
                warn!(%err, "could not start round resolution");
                break;
            }
            if !hold_or_stop(hold, &mut stop).await {
                break;
            }
            match handle.update(MatchEngine::resolve_round) {
                Ok(result) if result.game_over => {
                    info!(round = result.round, "final round resolved");
                    handle.stop();
                    break;
                }
                Ok(_) => {}
                Err(err) => warn!(%err, "round resolution failed"),
            }
            continue;
        }

        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = stopped(&mut stop) => break,
        }
    }
    debug!("round watcher stopped");
}

/// Sleep for `hold`; false if the match was stopped meanwhile
async fn hold_or_stop(hold: Duration, stop: &mut watch::Receiver<bool>) -> bool {
    tokio::select! {
        _ = tokio::time::sleep(hold) => true,
        _ = stopped(stop) => false,
    }
}
