//! Replaying adapter for the `LlmClient` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{CompletionRequest, LlmClient, LlmFuture};

/// Serves recorded LLM completions from a cassette.
pub struct ReplayingLlmClient {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingLlmClient {
    /// Create a replaying LLM client backed by the given replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl LlmClient for ReplayingLlmClient {
    fn complete(&self, _request: &CompletionRequest) -> LlmFuture<'_> {
        let output = next_output(&self.replayer, "llm", "complete");
        Box::pin(async move { replay_result(&output, "llm::complete") })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    fn request() -> CompletionRequest {
        CompletionRequest { model: "m".into(), system: None, prompt: "p".into(), max_tokens: 8 }
    }

    fn replayer(output: serde_json::Value) -> CassetteReplayer {
        CassetteReplayer::new(&Cassette {
            name: "llm".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions: vec![Interaction {
                seq: 0,
                port: "llm".into(),
                method: "complete".into(),
                input: json!({"prompt": "p"}),
                output,
            }],
        })
    }

    #[tokio::test]
    async fn serves_recorded_completion() {
        let client = ReplayingLlmClient::new(replayer(json!({
            "ok": {"text": "A layered API.", "prompt_tokens": 10, "completion_tokens": 4}
        })));
        let response = client.complete(&request()).await.unwrap();
        assert_eq!(response.text, "A layered API.");
        assert_eq!(response.prompt_tokens, 10);
    }

    #[tokio::test]
    async fn serves_recorded_failure() {
        let client = ReplayingLlmClient::new(replayer(json!({"err": "rate limited"})));
        let err = client.complete(&request()).await.unwrap_err();
        assert_eq!(err.to_string(), "rate limited");
    }
}
