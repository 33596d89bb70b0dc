//! Per-check view of the target's status variables.

use std::collections::HashMap;

/// Status variables retrieved from the target for one check cycle.
///
/// Built fresh for every connection and discarded afterwards; nothing is
/// cached across checks. Values are kept as strings the way the server
/// reports them, with typed access on top.
#[derive(Debug, Default, Clone)]
pub struct StatusSnapshot {
    vars: HashMap<String, String>,
}

impl StatusSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            vars: pairs.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, name: String, value: String) {
        self.vars.insert(name, value);
    }

    /// True when the query returned no rows, which a checker must treat as
    /// "status unknown".
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Fetch a variable and parse it as an integer. `None` covers both a
    /// missing field and an unparsable value; callers degrade either case
    /// to "unable to determine status".
    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.vars.get(name)?.trim().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> StatusSnapshot {
        StatusSnapshot::from_pairs([
            ("wsrep_cluster_size".to_string(), "3".to_string()),
            ("wsrep_ready".to_string(), "ON".to_string()),
            ("Seconds_Behind_Master".to_string(), "NULL".to_string()),
        ])
    }

    #[test]
    fn typed_access() {
        let snapshot = snapshot();
        assert_eq!(snapshot.get("wsrep_ready"), Some("ON"));
        assert_eq!(snapshot.get_int("wsrep_cluster_size"), Some(3));
    }

    #[test]
    fn missing_and_malformed_integers_are_none() {
        let snapshot = snapshot();
        assert_eq!(snapshot.get_int("wsrep_local_state"), None);
        assert_eq!(snapshot.get_int("Seconds_Behind_Master"), None);
    }

    #[test]
    fn empty_snapshot_reports_empty() {
        assert!(StatusSnapshot::empty().is_empty());
        assert!(!snapshot().is_empty());
    }
}
