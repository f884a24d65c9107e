use log::{debug, warn};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

use super::{GameClient, LocalGame};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Owns the background poll task. Dropping the handle stops polling.
pub struct PollHandle {
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn stop(self) {}
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Reads the session every `every` and adopts the server position when it
/// changed, calling `on_update` with the refreshed game. Read failures are
/// logged and the next tick tries again.
pub fn spawn_poll_loop<F>(
    client: GameClient,
    game: Arc<Mutex<LocalGame>>,
    every: Duration,
    on_update: F,
) -> PollHandle
where
    F: Fn(&LocalGame) + Send + 'static,
{
    let task = tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + every, every);
        loop {
            ticker.tick().await;
            let session_id = game.lock().session_id().to_string();

            let snapshot = match client.read_session(&session_id).await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!("Error polling game state for {}: {}", session_id, e);
                    continue;
                }
            };

            let mut local = game.lock();
            match local.reconcile(&snapshot) {
                Ok(true) => {
                    debug!("Session {} advanced, {} to move", session_id, snapshot.turn.name());
                    on_update(&local);
                }
                Ok(false) => {}
                Err(e) => warn!("Ignoring server state for {}: {}", session_id, e),
            }
        }
    });

    PollHandle { task }
}
