//! Accept loop and per-connection handling.
//!
//! # Responsibilities
//! - Accept probe connections from the bounded listener
//! - Run exactly one health-check cycle per connection
//! - Write the rendered response and close the socket
//! - Exit the loop on the shutdown signal
//!
//! # Design Decisions
//! - The inbound payload is never read or parsed; a probe that sends
//!   nothing at all still receives a response
//! - Write failures are best-effort: log and close, the load balancer
//!   re-probes on its own schedule
//! - Each connection runs on its own task holding a listener permit, so a
//!   slow database check queues later probes instead of dropping them

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::sync::broadcast;

use crate::check::HealthCheck;
use crate::http::response;
use crate::net::{ConnectionPermit, Listener};

/// The probe-facing server: one checker, one listener, one response per
/// accepted connection.
pub struct Sentinel {
    checker: Arc<dyn HealthCheck>,
}

impl Sentinel {
    pub fn new(checker: Arc<dyn HealthCheck>) -> Self {
        Self { checker }
    }

    /// Serve probes until the shutdown signal fires.
    ///
    /// In-flight checks may be abandoned at shutdown; a dropped probe reads
    /// as unhealthy on the load balancer side, which is the safe direction.
    pub async fn run(self, listener: Listener, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!("sentinel accepting probe connections");

        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    match accepted {
                        Ok((stream, peer_addr, permit)) => {
                            let checker = Arc::clone(&self.checker);
                            tokio::spawn(handle_connection(stream, peer_addr, checker, permit));
                        }
                        Err(error) => {
                            tracing::warn!(error = %error, "failed to accept connection");
                        }
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("shutdown signal received, no longer accepting probes");
                    break;
                }
            }
        }
    }
}

/// Evaluate once and answer, regardless of what (if anything) the probe
/// sent.
async fn handle_connection(
    mut stream: TcpStream,
    peer_addr: SocketAddr,
    checker: Arc<dyn HealthCheck>,
    _permit: ConnectionPermit,
) {
    let result = checker.evaluate().await;
    tracing::debug!(
        peer_addr = %peer_addr,
        code = result.code().as_u16(),
        diagnostics = result.messages().len(),
        "health check evaluated"
    );

    let bytes = response::render(&result);
    if let Err(error) = stream.write_all(&bytes).await {
        tracing::debug!(peer_addr = %peer_addr, error = %error, "failed to write response");
        return;
    }
    let _ = stream.shutdown().await;
}
