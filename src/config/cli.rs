//! Command-line interface.
//!
//! Every option has a file-config counterpart; flags passed explicitly
//! override values loaded via `--config`.

use std::path::PathBuf;

use clap::Parser;

use crate::config::loader::{self, ConfigError};
use crate::config::schema::{
    CheckConfig, CheckMode, ListenerConfig, ObservabilityConfig, SentinelConfig, TargetConfig,
};
use crate::config::validation::validate;

#[derive(Debug, Parser)]
#[command(name = "db-sentinel")]
#[command(about = "Health-check sentinel for MariaDB/MySQL replicas and Galera clusters")]
pub struct Cli {
    /// Optional TOML configuration file; flags override its values.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Database server to check.
    #[arg(short, long, value_name = "HOST")]
    pub server: Option<String>,

    /// User to connect to the server with.
    #[arg(short, long)]
    pub user: Option<String>,

    /// Password to use.
    #[arg(short, long)]
    pub password: Option<String>,

    /// Evaluation mode.
    #[arg(short, long, value_enum)]
    pub mode: Option<CheckMode>,

    /// Local IP to bind to (default: 0.0.0.0).
    #[arg(short = 'i', long)]
    pub ip: Option<String>,

    /// Local port to answer probes on (default: 3307).
    #[arg(long)]
    pub port: Option<u16>,

    /// Port of the database server to connect to (default: 3306).
    #[arg(long)]
    pub sql_port: Option<u16>,

    /// Replication lag threshold in seconds, replica mode (default: 120).
    #[arg(long, value_name = "SECONDS")]
    pub threshold: Option<i64>,

    /// Accept cluster state "Donor/Desynced" as valid, cluster mode.
    #[arg(long)]
    pub accept_donor: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Resolve the final configuration: file values first, flags on top,
    /// then semantic validation.
    pub fn into_config(self) -> Result<SentinelConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => loader::load_file(path)?,
            None => {
                let (Some(mode), Some(host), Some(user), Some(password)) = (
                    self.mode,
                    self.server.clone(),
                    self.user.clone(),
                    self.password.clone(),
                ) else {
                    return Err(ConfigError::MissingRequired(
                        "--mode, --server, --user, --password",
                    ));
                };
                SentinelConfig {
                    listener: ListenerConfig::default(),
                    target: TargetConfig {
                        host,
                        port: 3306,
                        user,
                        password,
                    },
                    check: CheckConfig {
                        mode,
                        lag_threshold_secs: 120,
                        accept_donor: false,
                        query_timeout_secs: 5,
                    },
                    observability: ObservabilityConfig::default(),
                }
            }
        };

        if let Some(server) = self.server {
            config.target.host = server;
        }
        if let Some(user) = self.user {
            config.target.user = user;
        }
        if let Some(password) = self.password {
            config.target.password = password;
        }
        if let Some(mode) = self.mode {
            config.check.mode = mode;
        }
        if let Some(ip) = self.ip {
            config.listener.bind_ip = ip;
        }
        if let Some(port) = self.port {
            config.listener.bind_port = port;
        }
        if let Some(sql_port) = self.sql_port {
            config.target.port = sql_port;
        }
        if let Some(threshold) = self.threshold {
            config.check.lag_threshold_secs = threshold;
        }
        if self.accept_donor {
            config.check.accept_donor = true;
        }
        if let Some(log_level) = self.log_level {
            config.observability.log_level = log_level;
        }

        validate(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}
