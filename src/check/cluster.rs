//! Galera cluster member evaluation.
//!
//! # Rules
//! - `wsrep_cluster_size` must be above 1; a single-member "cluster" is
//!   likely a split-brain
//! - `wsrep_ready` must be the literal `ON`
//! - `wsrep_local_state` must be Synced, or Donor/Desynced when the
//!   operator opted in with accept_donor

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time;

use crate::db::StatusSource;

use super::{CheckResult, HealthCheck, StatusSnapshot};

const UNABLE: &str = "Unable to determine cluster status";

/// wsrep_local_state code for a fully synced member.
const STATE_SYNCED: i64 = 4;
/// wsrep_local_state code for a member currently serving as donor.
const STATE_DONOR_DESYNCED: i64 = 2;

/// Human-readable name for a wsrep_local_state code.
fn state_name(code: i64) -> String {
    match code {
        1 => "Joining".to_string(),
        2 => "Donor/Desynced".to_string(),
        3 => "Joined".to_string(),
        4 => "Synced".to_string(),
        other => format!("Unknown ({other})"),
    }
}

/// Health checker for a Galera-style multi-master cluster member.
pub struct ClusterChecker {
    source: Arc<dyn StatusSource>,
    accept_donor: bool,
    query_timeout: Duration,
}

impl ClusterChecker {
    pub fn new(source: Arc<dyn StatusSource>, accept_donor: bool, query_timeout: Duration) -> Self {
        Self {
            source,
            accept_donor,
            query_timeout,
        }
    }

    /// Fetch the wsrep status variables. Any failure mode collapses to
    /// `None`; the caller answers 503 without crashing the connection task.
    async fn acquire(&self) -> Option<StatusSnapshot> {
        match time::timeout(self.query_timeout, self.source.cluster_status()).await {
            Ok(Ok(snapshot)) if !snapshot.is_empty() => Some(snapshot),
            Ok(Ok(_)) => {
                tracing::warn!("cluster status query returned no wsrep variables");
                None
            }
            Ok(Err(error)) => {
                tracing::warn!(error = %error, "cluster status query failed");
                None
            }
            Err(_) => {
                tracing::warn!(timeout = ?self.query_timeout, "cluster status query timed out");
                None
            }
        }
    }
}

#[async_trait]
impl HealthCheck for ClusterChecker {
    async fn evaluate(&self) -> CheckResult {
        let Some(snapshot) = self.acquire().await else {
            return CheckResult::unavailable(UNABLE);
        };

        let mut result = CheckResult::passing();

        let Some(size) = snapshot.get_int("wsrep_cluster_size") else {
            tracing::warn!("wsrep_cluster_size missing or not an integer");
            return CheckResult::unavailable(UNABLE);
        };
        if size <= 1 {
            result.fail(format!(
                "Cluster size is {size}. Split-brain situation is likely."
            ));
        }

        if snapshot.get("wsrep_ready") != Some("ON") {
            result.fail("Cluster replication is not running.");
        }

        let Some(state) = snapshot.get_int("wsrep_local_state") else {
            tracing::warn!("wsrep_local_state missing or not an integer");
            return CheckResult::unavailable(UNABLE);
        };
        let acceptable =
            state == STATE_SYNCED || (state == STATE_DONOR_DESYNCED && self.accept_donor);
        if !acceptable {
            result.fail(format!("Local state is '{}'.", state_name(state)));
        }

        result
    }
}
