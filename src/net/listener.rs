//! TCP listener with backpressure.
//!
//! # Responsibilities
//! - Bind to the configured address
//! - Accept incoming probe connections
//! - Enforce max_connections via a semaphore
//!
//! Probes are cheap but the status query behind each one is a full
//! database round trip; the permit cap keeps a probe storm from piling up
//! unbounded connection tasks behind a slow target.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Semaphore;

use crate::config::ListenerConfig;

/// Error type for listener operations.
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    #[error("invalid bind address {addr}: {source}")]
    Address {
        addr: String,
        source: std::net::AddrParseError,
    },

    #[error("failed to bind: {0}")]
    Bind(#[source] std::io::Error),

    #[error("failed to accept: {0}")]
    Accept(#[source] std::io::Error),
}

/// A bounded TCP listener.
///
/// When `max_connections` tasks are in flight, further probes wait in the
/// kernel accept queue until a slot frees up.
pub struct Listener {
    inner: TcpListener,
    connection_limit: Arc<Semaphore>,
}

impl Listener {
    /// Bind to the configured address with the configured connection limit.
    pub async fn bind(config: &ListenerConfig) -> Result<Self, ListenerError> {
        let addr_string = format!("{}:{}", config.bind_ip, config.bind_port);
        let addr: SocketAddr = addr_string.parse().map_err(|source| ListenerError::Address {
            addr: addr_string,
            source,
        })?;

        let listener = TcpListener::bind(addr).await.map_err(ListenerError::Bind)?;
        let local_addr = listener.local_addr().map_err(ListenerError::Bind)?;

        tracing::info!(
            address = %local_addr,
            max_connections = config.max_connections,
            "listener bound"
        );

        Ok(Self {
            inner: listener,
            connection_limit: Arc::new(Semaphore::new(config.max_connections)),
        })
    }

    /// Accept the next connection, waiting for a free slot first.
    ///
    /// The returned permit must be held for the connection's lifetime; it
    /// releases the slot on drop even if the handling task panics.
    pub async fn accept(&self) -> Result<(TcpStream, SocketAddr, ConnectionPermit), ListenerError> {
        let permit = Arc::clone(&self.connection_limit)
            .acquire_owned()
            .await
            .map_err(|_| {
                ListenerError::Accept(std::io::Error::other("connection semaphore closed"))
            })?;

        let (stream, addr) = self.inner.accept().await.map_err(ListenerError::Accept)?;

        tracing::debug!(
            peer_addr = %addr,
            available_permits = self.connection_limit.available_permits(),
            "connection accepted"
        );

        Ok((stream, addr, ConnectionPermit { _permit: permit }))
    }

    /// Local address the listener is bound to. Useful when binding port 0
    /// in tests.
    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.inner.local_addr()
    }
}

/// A held connection slot, released back to the listener on drop.
#[derive(Debug)]
pub struct ConnectionPermit {
    _permit: tokio::sync::OwnedSemaphorePermit,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loopback_config(max_connections: usize) -> ListenerConfig {
        ListenerConfig {
            bind_ip: "127.0.0.1".to_string(),
            bind_port: 0,
            max_connections,
        }
    }

    #[tokio::test]
    async fn binds_to_ephemeral_port() {
        let listener = Listener::bind(&loopback_config(4)).await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }

    #[tokio::test]
    async fn rejects_malformed_bind_ip() {
        let config = ListenerConfig {
            bind_ip: "not-an-ip".to_string(),
            bind_port: 0,
            max_connections: 4,
        };
        assert!(matches!(
            Listener::bind(&config).await,
            Err(ListenerError::Address { .. })
        ));
    }

    #[tokio::test]
    async fn permit_release_frees_a_slot() {
        let listener = Listener::bind(&loopback_config(1)).await.unwrap();
        let addr = listener.local_addr().unwrap();

        let _client1 = TcpStream::connect(addr).await.unwrap();
        let (_stream1, _, permit1) = listener.accept().await.unwrap();
        assert_eq!(listener.connection_limit.available_permits(), 0);

        drop(permit1);
        let _client2 = TcpStream::connect(addr).await.unwrap();
        let (_stream2, _, _permit2) = listener.accept().await.unwrap();
    }
}
