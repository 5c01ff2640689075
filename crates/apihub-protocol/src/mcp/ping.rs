//! MCP `ping` liveness check.

use serde::{Deserialize, Serialize};

/// Response for `ping`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingResult {
    /// Always `true`.
    pub pong: bool,
}

impl Default for PingResult {
    fn default() -> Self {
        Self { pong: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ping_serializes_pong_true() {
        let s = serde_json::to_string(&PingResult::default()).expect("ser");
        assert_eq!(s, r#"{"pong":true}"#);
    }
}
