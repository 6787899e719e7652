//! Ctrl+C forwarding for the long-running binaries.

use std::future::Future;
use tokio::sync::watch;
use tracing::{error, info};

/// Spawns a task that flips the returned receiver to `true` on Ctrl+C.
#[must_use]
pub fn on_ctrl_c() -> watch::Receiver<bool> {
    let (sender, receiver) = watch::channel(false);
    tokio::spawn(forward(tokio::signal::ctrl_c(), sender));
    receiver
}

/// Waits for `signal` and then sets `sender` to `true`.
///
/// When the signal handler cannot be installed the sender is held forever,
/// so receivers keep waiting instead of observing a closed channel.
pub async fn forward<F>(signal: F, sender: watch::Sender<bool>)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(err) = signal.await {
        error!(error = %err, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
    if sender.send(true).is_err() {
        error!("no receiver left for the shutdown signal");
    }
}
