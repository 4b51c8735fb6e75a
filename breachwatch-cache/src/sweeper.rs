//! Periodic eviction of expired verdicts.

use std::sync::Weak;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::VerdictCache;

/// Spawns the sweep loop for `cache`.
///
/// The loop exits when `cancel` fires or when the cache has been dropped.
pub(crate) fn spawn(
    cache: Weak<VerdictCache>,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately; nothing can have expired yet.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Verdict sweep cancelled");
                    break;
                }
                _ = ticker.tick() => {
                    let Some(cache) = cache.upgrade() else {
                        debug!("Verdict cache dropped, sweep exiting");
                        break;
                    };
                    cache.remove_expired();
                }
            }
        }
    })
}
