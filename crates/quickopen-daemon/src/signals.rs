//! Signal wiring for the daemon.
//!
//! The asynchronous rescan trigger (SIGUSR1) is turned into events on
//! a bounded channel the serve loop drains between requests, instead
//! of doing work inside a signal handler. The channel holds a single
//! slot: a trigger that cannot be delivered because one is already
//! queued is redundant and coalesces away, but a trigger is never
//! dropped when the queue is empty.

use tokio::sync::mpsc;

/// Spawn the rescan-trigger listener and return its event stream.
#[cfg(unix)]
pub fn rescan_events() -> mpsc::Receiver<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let (tx, rx) = mpsc::channel(1);
    tokio::spawn(async move {
        let mut sigusr1 = match signal(SignalKind::user_defined1()) {
            Ok(stream) => stream,
            Err(e) => {
                tracing::error!(error = %e, "failed to register SIGUSR1 handler");
                return;
            }
        };
        while sigusr1.recv().await.is_some() {
            tracing::debug!("rescan signal received");
            // Full queue means a trigger is already pending; coalesce.
            let _ = tx.try_send(());
        }
    });
    rx
}

#[cfg(not(unix))]
pub fn rescan_events() -> mpsc::Receiver<()> {
    // No user signals off Unix; keep the channel open but silent.
    let (tx, rx) = mpsc::channel(1);
    tokio::spawn(async move {
        let _tx = tx;
        std::future::pending::<()>().await;
    });
    rx
}

/// Wait for SIGINT or SIGTERM.
pub async fn wait_for_shutdown() {
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received SIGINT");
        }
        _ = wait_for_sigterm() => {
            tracing::info!("Received SIGTERM");
        }
    }
}

#[cfg(unix)]
async fn wait_for_sigterm() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate()).expect("Failed to register SIGTERM handler");

    sigterm.recv().await;
}

#[cfg(not(unix))]
async fn wait_for_sigterm() {
    // On non-Unix platforms, just wait forever
    std::future::pending::<()>().await;
}
