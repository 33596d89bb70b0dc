//! db-sentinel entry point.
//!
//! Startup order: resolve configuration, initialize tracing, construct the
//! (lazy) database source and the mode's checker, bind the listener, then
//! serve probes until SIGINT/SIGTERM.

use std::sync::Arc;

use clap::Parser;

use db_sentinel::check;
use db_sentinel::config::Cli;
use db_sentinel::db::MySqlStatusSource;
use db_sentinel::http::Sentinel;
use db_sentinel::lifecycle::{self, Shutdown};
use db_sentinel::net::Listener;
use db_sentinel::observability;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match Cli::parse().into_config() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("Error: {error}");
            std::process::exit(2);
        }
    };

    observability::init(&config.observability.log_level);

    tracing::info!(
        mode = %config.check.mode,
        bind_ip = %config.listener.bind_ip,
        bind_port = config.listener.bind_port,
        target_host = %config.target.host,
        target_port = config.target.port,
        "db-sentinel starting"
    );

    // The source connects lazily: an unreachable database shows up as 503
    // probe responses, not as a startup crash.
    let source = Arc::new(MySqlStatusSource::new(&config.target));
    let checker = check::for_mode(&config, source);

    let listener = Listener::bind(&config.listener).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        lifecycle::trigger_on_signal(&shutdown).await;
    });

    Sentinel::new(checker).run(listener, server_shutdown).await;

    tracing::info!("shutdown complete");
    Ok(())
}
