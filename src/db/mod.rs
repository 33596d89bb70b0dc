//! Status acquisition against the target database.
//!
//! # Design Decisions
//! - Checkers talk to a [`StatusSource`] trait object, never to the driver
//!   directly; tests substitute canned sources
//! - The source returns a typed `Result`, and the checker decides what a
//!   failure means for the probe (always: unknown → unhealthy)

pub mod mysql;

use async_trait::async_trait;

use crate::check::StatusSnapshot;

pub use mysql::MySqlStatusSource;

/// A failed status query.
#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    #[error("database driver error: {0}")]
    Driver(#[from] mysql_async::Error),

    #[error("connection error: {0}")]
    Io(#[from] std::io::Error),
}

/// Capability to execute one mode-specific status query against the
/// configured endpoint and return the resulting variables.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// `SHOW STATUS LIKE 'wsrep_%'` — Galera cluster variables.
    async fn cluster_status(&self) -> Result<StatusSnapshot, StatusError>;

    /// `SHOW SLAVE STATUS` — the replication status row, flattened to
    /// variable-name → value.
    async fn replica_status(&self) -> Result<StatusSnapshot, StatusError>;
}
