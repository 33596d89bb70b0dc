//! MySQL status source backed by mysql_async.

use async_trait::async_trait;
use mysql_async::{
    Opts, OptsBuilder, Pool, PoolConstraints, PoolOpts, Row, Value, prelude::*,
};

use crate::check::StatusSnapshot;
use crate::config::TargetConfig;

use super::{StatusError, StatusSource};

/// Status source that queries a MariaDB/MySQL endpoint.
///
/// Holds a single-connection pool: checks run one at a time per connection
/// task, and the pool transparently reconnects after the target was down.
/// Construction is lazy on purpose; a database that is unreachable at boot
/// must surface as 503 probe responses, not as a startup failure.
pub struct MySqlStatusSource {
    pool: Pool,
}

impl MySqlStatusSource {
    pub fn new(target: &TargetConfig) -> Self {
        let mut builder = OptsBuilder::from_opts(Opts::default())
            .ip_or_hostname(target.host.as_str())
            .tcp_port(target.port)
            .user(Some(target.user.as_str()))
            .pass(Some(target.password.as_str()));

        // Sentinels often run against servers with a tight connection
        // budget; one pooled connection is all a serialized check needs.
        if let Some(constraints) = PoolConstraints::new(1, 1) {
            builder = builder.pool_opts(PoolOpts::default().with_constraints(constraints));
        }

        Self {
            pool: Pool::new(builder),
        }
    }

    /// Map one result-row value to the string form the rule set parses.
    /// NULL stays absent so `Seconds_Behind_Master IS NULL` reads as a
    /// missing field.
    fn value_to_string(value: &Value) -> Option<String> {
        match value {
            Value::NULL => None,
            Value::Bytes(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
            Value::Int(n) => Some(n.to_string()),
            Value::UInt(n) => Some(n.to_string()),
            Value::Float(n) => Some(n.to_string()),
            Value::Double(n) => Some(n.to_string()),
            // Temporal values do not appear in the status variables the
            // checkers read.
            _ => None,
        }
    }
}

#[async_trait]
impl StatusSource for MySqlStatusSource {
    async fn cluster_status(&self) -> Result<StatusSnapshot, StatusError> {
        let mut conn = self.pool.get_conn().await?;
        let rows: Vec<(String, String)> = conn.query("SHOW STATUS LIKE 'wsrep_%'").await?;
        tracing::debug!(variables = rows.len(), "fetched wsrep status");
        Ok(StatusSnapshot::from_pairs(rows))
    }

    async fn replica_status(&self) -> Result<StatusSnapshot, StatusError> {
        let mut conn = self.pool.get_conn().await?;
        let row: Option<Row> = conn.query_first("SHOW SLAVE STATUS").await?;

        let Some(row) = row else {
            // Not configured as a replica; the checker reports "unable to
            // determine slave status".
            tracing::debug!("SHOW SLAVE STATUS returned no row");
            return Ok(StatusSnapshot::empty());
        };

        let mut snapshot = StatusSnapshot::empty();
        let columns = row.columns();
        for (index, column) in columns.iter().enumerate() {
            if let Some(value) = row.as_ref(index).and_then(Self::value_to_string) {
                snapshot.insert(column.name_str().into_owned(), value);
            }
        }
        tracing::debug!("fetched replication status row");
        Ok(snapshot)
    }
}
