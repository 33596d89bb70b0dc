//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from a TOML file; the
//! same structs are populated directly when the process is configured from
//! CLI flags alone.

use serde::Deserialize;

/// Root configuration for the sentinel.
#[derive(Debug, Clone, Deserialize)]
pub struct SentinelConfig {
    /// Listener configuration (bind address, connection limit).
    #[serde(default)]
    pub listener: ListenerConfig,

    /// Target database endpoint and credentials.
    pub target: TargetConfig,

    /// Health-check mode and rule parameters.
    pub check: CheckConfig,

    /// Observability settings.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Local IP to bind to.
    pub bind_ip: String,

    /// Local port the sentinel answers probes on.
    pub bind_port: u16,

    /// Maximum concurrent probe connections (backpressure).
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_ip: "0.0.0.0".to_string(),
            bind_port: 3307,
            max_connections: 64,
        }
    }
}

/// Target database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    /// Hostname or IP of the MariaDB/MySQL server to check.
    pub host: String,

    /// Port of the target server.
    #[serde(default = "default_target_port")]
    pub port: u16,

    /// User to connect with.
    pub user: String,

    /// Password for that user.
    pub password: String,
}

fn default_target_port() -> u16 {
    3306
}

/// Health-check configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckConfig {
    /// Evaluation mode, selected once at startup.
    pub mode: CheckMode,

    /// Acceptable replication lag in seconds (replica mode).
    #[serde(default = "default_lag_threshold")]
    pub lag_threshold_secs: i64,

    /// Accept cluster members in state Donor/Desynced as healthy
    /// (cluster mode).
    #[serde(default)]
    pub accept_donor: bool,

    /// Upper bound on a single status query round trip. A hung target must
    /// not stall the accept loop forever; on timeout the check degrades to
    /// "unable to determine status".
    #[serde(default = "default_query_timeout")]
    pub query_timeout_secs: u64,
}

fn default_lag_threshold() -> i64 {
    120
}

fn default_query_timeout() -> u64 {
    5
}

/// Which rule set the sentinel evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CheckMode {
    /// Galera-style multi-master cluster member.
    Cluster,
    /// Primary/replica lag-based evaluation.
    Replica,
}

impl std::fmt::Display for CheckMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckMode::Cluster => write!(f, "cluster"),
            CheckMode::Replica => write!(f, "replica"),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
