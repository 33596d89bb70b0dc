//! Response rendering.
//!
//! # Responsibilities
//! - Turn a [`CheckResult`] into the exact bytes written to the probe
//!
//! # Design Decisions
//! - Pure function of its input; rendering the same result twice yields
//!   identical bytes
//! - Content-length is the exact byte count of the body, CRLF terminators
//!   included
//! - No other headers, no chunked encoding, no connection negotiation

use crate::check::CheckResult;

/// Render a check result as a complete HTTP/1.1 response.
///
/// Each diagnostic message becomes one CRLF-terminated body line, in rule
/// order. A healthy result with no diagnostics has an empty body.
pub fn render(result: &CheckResult) -> Vec<u8> {
    let body = render_body(result);
    let code = result.code();
    format!(
        "HTTP/1.1 {} {}\r\nContent-type: text/plain\r\nContent-length: {}\r\n\r\n{}",
        code.as_u16(),
        code.reason(),
        body.len(),
        body
    )
    .into_bytes()
}

fn render_body(result: &CheckResult) -> String {
    let mut body = String::new();
    for message in result.messages() {
        body.push_str(message);
        body.push_str("\r\n");
    }
    body
}
