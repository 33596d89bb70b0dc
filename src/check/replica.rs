//! Primary/replica lag evaluation.
//!
//! # Rules
//! - `Slave_IO_Running` must be the literal `Yes`; anything else means the
//!   replication thread has stopped
//! - `Seconds_Behind_Master` must be strictly below the configured
//!   threshold

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time;

use crate::db::StatusSource;

use super::{CheckResult, HealthCheck, StatusSnapshot};

const UNABLE: &str = "Unable to determine slave status";

/// Health checker for a lag-based primary/replica setup.
pub struct ReplicaChecker {
    source: Arc<dyn StatusSource>,
    lag_threshold: i64,
    query_timeout: Duration,
}

impl ReplicaChecker {
    pub fn new(source: Arc<dyn StatusSource>, lag_threshold: i64, query_timeout: Duration) -> Self {
        Self {
            source,
            lag_threshold,
            query_timeout,
        }
    }

    /// Fetch the replication status row. Mirrors the cluster checker:
    /// failure, timeout and "no rows" all collapse to `None`.
    async fn acquire(&self) -> Option<StatusSnapshot> {
        match time::timeout(self.query_timeout, self.source.replica_status()).await {
            Ok(Ok(snapshot)) if !snapshot.is_empty() => Some(snapshot),
            Ok(Ok(_)) => {
                tracing::warn!("replication status query returned no rows");
                None
            }
            Ok(Err(error)) => {
                tracing::warn!(error = %error, "replication status query failed");
                None
            }
            Err(_) => {
                tracing::warn!(timeout = ?self.query_timeout, "replication status query timed out");
                None
            }
        }
    }
}

#[async_trait]
impl HealthCheck for ReplicaChecker {
    async fn evaluate(&self) -> CheckResult {
        let Some(snapshot) = self.acquire().await else {
            return CheckResult::unavailable(UNABLE);
        };

        let mut result = CheckResult::passing();

        if snapshot.get("Slave_IO_Running") != Some("Yes") {
            result.fail("Slave IO is not running.");
        }

        let Some(lag) = snapshot.get_int("Seconds_Behind_Master") else {
            // NULL when the SQL thread is stopped; non-numeric is a driver
            // surprise. Either way the lag is unknowable this cycle.
            tracing::warn!("Seconds_Behind_Master missing or not an integer");
            return CheckResult::unavailable(UNABLE);
        };
        if lag >= self.lag_threshold {
            result.fail(format!(
                "Slave is {lag} seconds behind. Threshold is {}.",
                self.lag_threshold
            ));
        }

        result
    }
}
