//! Sync loop: periodic refresh of the current board from the service.
//!
//! DESIGN
//! ======
//! The loop owns no board state. Each tick enqueues `Command::Refresh` on the
//! view's command channel, so refreshes are serialized with user gestures by
//! the single dispatcher. A tick that finds the channel full is skipped; a
//! closed channel ends the loop. `plan` turns a fetched listing into render
//! operations for either reconciliation mode.

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::net::types::{Note, RecordId};
use crate::view::Command;

// =============================================================================
// RECONCILIATION
// =============================================================================

/// How a refresh is applied to the rendered notes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReconcileMode {
    /// Clear every element and redraw the listing. Drops any drag in progress.
    #[default]
    Replace,
    /// Touch only elements whose note was added, changed, or removed.
    Diff,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderOp {
    Clear,
    Draw(Note),
    Remove(RecordId),
}

/// Render operations that bring `shown` in line with `fetched`.
#[must_use]
pub fn plan(mode: ReconcileMode, shown: &HashMap<RecordId, Note>, fetched: &[Note]) -> Vec<RenderOp> {
    match mode {
        ReconcileMode::Replace => std::iter::once(RenderOp::Clear)
            .chain(fetched.iter().cloned().map(RenderOp::Draw))
            .collect(),
        ReconcileMode::Diff => {
            let incoming: HashSet<&RecordId> = fetched.iter().map(|n| &n.id).collect();
            let mut vanished: Vec<&RecordId> = shown.keys().filter(|id| !incoming.contains(id)).collect();
            vanished.sort();

            let removes = vanished.into_iter().cloned().map(RenderOp::Remove);
            let draws = fetched
                .iter()
                .filter(|note| shown.get(&note.id) != Some(note))
                .cloned()
                .map(RenderOp::Draw);
            removes.chain(draws).collect()
        }
    }
}

// =============================================================================
// LOOP
// =============================================================================

/// Running sync loop. Dropping the handle stops the loop.
pub struct SyncHandle {
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl SyncHandle {
    /// Stop the loop and wait for it to exit.
    pub async fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Err(e) = (&mut self.task).await {
            warn!(error = %e, "sync loop task failed");
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for SyncHandle {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }
}

/// Spawn a loop that sends `Command::Refresh` every `period`, first one
/// `period` after the call.
pub fn spawn_sync_loop(commands: mpsc::Sender<Command>, period: Duration) -> SyncHandle {
    let (stop_tx, mut stop_rx) = oneshot::channel();
    info!(period_ms = period.as_millis(), "sync loop started");

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = &mut stop_rx => break,
                _ = ticker.tick() => {
                    match commands.try_send(Command::Refresh) {
                        Ok(()) => {}
                        Err(mpsc::error::TrySendError::Full(_)) => {
                            debug!("command queue full; skipping sync tick");
                        }
                        Err(mpsc::error::TrySendError::Closed(_)) => break,
                    }
                }
            }
        }
        info!("sync loop stopped");
    });

    SyncHandle { stop: Some(stop_tx), task }
}
