//! Process lifecycle: shutdown coordination and OS signals.
//!
//! # Design Decisions
//! - Shutdown is an explicit broadcast event, not ambient global state;
//!   the accept loop and any other long-running task subscribe to it
//! - SIGINT and SIGTERM both request a graceful stop: the listener stops
//!   accepting, in-flight checks may be abandoned (a dropped probe reads
//!   as unhealthy, which is safe)

use tokio::sync::broadcast;

/// Coordinator for graceful shutdown.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Request shutdown. Safe to call more than once.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for SIGINT or SIGTERM, then trigger the given coordinator.
///
/// Runs until the first signal arrives; repeated signals after that are
/// left to the default disposition.
pub async fn trigger_on_signal(shutdown: &Shutdown) {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut terminate = match signal(SignalKind::terminate()) {
            Ok(stream) => stream,
            Err(error) => {
                tracing::error!(error = %error, "failed to install SIGTERM handler");
                if ctrl_c.await.is_ok() {
                    tracing::info!("SIGINT received");
                }
                shutdown.trigger();
                return;
            }
        };

        tokio::select! {
            result = ctrl_c => {
                if result.is_ok() {
                    tracing::info!("SIGINT received");
                }
            }
            _ = terminate.recv() => {
                tracing::info!("SIGTERM received");
            }
        }
    }

    #[cfg(not(unix))]
    {
        if ctrl_c.await.is_ok() {
            tracing::info!("interrupt received");
        }
    }

    shutdown.trigger();
}
