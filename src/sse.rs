//! Body decoding for Paper's MCP endpoint.
//!
//! Paper answers either with plain `application/json` or with a one-shot
//! `text/event-stream` carrying a single `data:` line. Both are read to
//! completion; only the first `data:` line of an event stream is used.

use serde_json::Value;

/// Payload of the first non-empty `data:` line, if the body has one.
pub fn first_data_line(body: &str) -> Option<&str> {
    body.lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter_map(|line| line.strip_prefix("data:"))
        .map(|rest| rest.strip_prefix(' ').unwrap_or(rest))
        .find(|payload| !payload.trim().is_empty())
}

/// Parse a response body that is either raw JSON or a single SSE event.
pub fn parse_body(body: &str) -> Result<Value, serde_json::Error> {
    match first_data_line(body) {
        Some(payload) => serde_json::from_str(payload),
        None => serde_json::from_str(body),
    }
}
