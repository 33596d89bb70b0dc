//! Health evaluation subsystem.
//!
//! # Data Flow
//! ```text
//! connection accepted
//!     → HealthCheck::evaluate()
//!     → StatusSource query (bounded by query timeout)
//!     → StatusSnapshot (fresh per check, discarded after)
//!     → rule evaluation (cluster.rs or replica.rs)
//!     → CheckResult
//! ```
//!
//! # Design Decisions
//! - The checker variant is constructed exactly once, from the validated
//!   configuration mode, and never switched at runtime
//! - Query failures, timeouts, and malformed status values never cross the
//!   checker boundary; they degrade to an "unable to determine" result so
//!   the probe always receives a response
//! - A snapshot that could not be obtained is unknown, and unknown is
//!   unhealthy

pub mod cluster;
pub mod replica;
pub mod result;
pub mod snapshot;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::{CheckMode, SentinelConfig};
use crate::db::StatusSource;

pub use cluster::ClusterChecker;
pub use replica::ReplicaChecker;
pub use result::{CheckResult, HealthCode};
pub use snapshot::StatusSnapshot;

/// Capability shared by both checker variants: run one health-check cycle.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Query the target, evaluate the mode's rules, and report the outcome.
    ///
    /// Infallible by contract: every failure mode is folded into the
    /// returned [`CheckResult`].
    async fn evaluate(&self) -> CheckResult;
}

/// Construct the checker selected by the validated configuration.
pub fn for_mode(
    config: &SentinelConfig,
    source: Arc<dyn StatusSource>,
) -> Arc<dyn HealthCheck> {
    let query_timeout = Duration::from_secs(config.check.query_timeout_secs);
    match config.check.mode {
        CheckMode::Cluster => Arc::new(ClusterChecker::new(
            source,
            config.check.accept_donor,
            query_timeout,
        )),
        CheckMode::Replica => Arc::new(ReplicaChecker::new(
            source,
            config.check.lag_threshold_secs,
            query_timeout,
        )),
    }
}
