//! Outcome of a single health-check cycle.

/// HTTP-level verdict of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthCode {
    /// The target should receive traffic.
    Ok,
    /// The target must be taken out of rotation.
    ServiceUnavailable,
}

impl HealthCode {
    /// Numeric status code for the wire response.
    pub fn as_u16(self) -> u16 {
        match self {
            HealthCode::Ok => 200,
            HealthCode::ServiceUnavailable => 503,
        }
    }

    /// Fixed reason phrase for the status line.
    pub fn reason(self) -> &'static str {
        match self {
            HealthCode::Ok => "OK",
            HealthCode::ServiceUnavailable => "Service Unavailable",
        }
    }
}

/// Result of one evaluate() call: an ordered list of diagnostics.
///
/// The code is derived, which keeps the invariant structural: 503 if and
/// only if at least one message was recorded. A fresh result is healthy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    messages: Vec<String>,
}

impl CheckResult {
    /// A result with no findings (code 200).
    pub fn passing() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// The status could not be determined at all: a single diagnostic,
    /// code 503. Used for query failures, timeouts, empty result sets and
    /// malformed numeric fields alike.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
        }
    }

    /// Record a failed rule. Downgrades the result to 503.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn code(&self) -> HealthCode {
        if self.messages.is_empty() {
            HealthCode::Ok
        } else {
            HealthCode::ServiceUnavailable
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.code() == HealthCode::Ok
    }

    /// Diagnostics in the order the rules recorded them.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_result_is_healthy() {
        let result = CheckResult::passing();
        assert!(result.is_healthy());
        assert_eq!(result.code().as_u16(), 200);
        assert!(result.messages().is_empty());
    }

    #[test]
    fn any_message_downgrades_to_503() {
        let mut result = CheckResult::passing();
        result.fail("Slave IO is not running.");
        assert!(!result.is_healthy());
        assert_eq!(result.code().as_u16(), 503);
        assert_eq!(result.code().reason(), "Service Unavailable");
    }

    #[test]
    fn unavailable_carries_exactly_one_diagnostic() {
        let result = CheckResult::unavailable("Unable to determine cluster status");
        assert_eq!(result.messages(), ["Unable to determine cluster status"]);
        assert_eq!(result.code().as_u16(), 503);
    }

    #[test]
    fn messages_keep_insertion_order() {
        let mut result = CheckResult::passing();
        result.fail("first");
        result.fail("second");
        assert_eq!(result.messages(), ["first", "second"]);
    }
}
