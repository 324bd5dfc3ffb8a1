//! Cassette data structures for recording and replaying interactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded interaction with an external port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// Port name (`"fs"` or `"llm"`).
    pub port: String,
    /// Method name invoked on the port.
    pub method: String,
    /// Input data sent to the port.
    pub input: serde_json::Value,
    /// Output data returned from the port, `{"ok": ..}` or `{"err": ".."}`.
    pub output: serde_json::Value,
}

/// A cassette containing a sequence of recorded interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Label of the analyzed tree (its directory name), or `"unknown"`.
    pub commit: String,
    /// Ordered list of interactions.
    pub interactions: Vec<Interaction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hand_written_cassette() {
        let yaml = r#"
name: summarize-express
recorded_at: 2025-06-15T10:00:00Z
commit: unknown
interactions:
  - seq: 0
    port: fs
    method: read_to_string
    input: { path: /project/app.js }
    output: { ok: "app.listen(3000)" }
  - seq: 1
    port: llm
    method: complete
    input: { prompt: "..." }
    output: { err: "rate limited" }
"#;
        let cassette: Cassette = serde_yaml::from_str(yaml).expect("deserialize");
        assert_eq!(cassette.name, "summarize-express");
        assert_eq!(cassette.interactions.len(), 2);
        assert_eq!(cassette.interactions[0].output["ok"], "app.listen(3000)");
        assert_eq!(cassette.interactions[1].port, "llm");
    }
}
