//! Structured logging.
//!
//! # Design Decisions
//! - tracing + tracing-subscriber, initialized once at startup
//! - `RUST_LOG` overrides the configured level, so operators can turn on
//!   debug output without touching the config

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the configured default level.
pub fn init(log_level: &str) {
    let default_filter = format!("db_sentinel={log_level}");
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
