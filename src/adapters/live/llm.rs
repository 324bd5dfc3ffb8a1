//! Live adapter for the `LlmClient` port using an OpenAI-compatible
//! chat completions API (Groq by default).

use std::env;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_LLM_ENDPOINT;
use crate::ports::llm::{CompletionRequest, CompletionResponse, LlmClient, LlmFuture};

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "GROQ_API_KEY";

/// Live LLM client that posts to a chat completions endpoint.
pub struct LiveLlmClient {
    client: Client,
    endpoint: String,
}

impl LiveLlmClient {
    /// Creates a client for the given chat completions URL.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { client: Client::new(), endpoint: endpoint.into() }
    }
}

impl Default for LiveLlmClient {
    fn default() -> Self {
        Self::new(DEFAULT_LLM_ENDPOINT)
    }
}

/// Request body sent to the chat completions API.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

/// A single message in the request.
#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Top-level response from the chat completions API.
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Token usage reported by the API.
#[derive(Default, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

/// Error envelope returned on non-2xx responses.
#[derive(Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

fn build_messages(request: &CompletionRequest) -> Vec<ChatMessage<'_>> {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = &request.system {
        messages.push(ChatMessage { role: "system", content: system });
    }
    messages.push(ChatMessage { role: "user", content: &request.prompt });
    messages
}

fn parse_response(
    body: &str,
) -> Result<CompletionResponse, Box<dyn std::error::Error + Send + Sync>> {
    let api_response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| format!("Failed to parse chat completions response: {e}"))?;
    let text = api_response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or("chat completions response contained no message content")?;
    Ok(CompletionResponse {
        text,
        prompt_tokens: api_response.usage.prompt_tokens,
        completion_tokens: api_response.usage.completion_tokens,
    })
}

impl LlmClient for LiveLlmClient {
    fn complete(&self, request: &CompletionRequest) -> LlmFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            let api_key = env::var(API_KEY_VAR).map_err(|_| {
                Box::<dyn std::error::Error + Send + Sync>::from(format!(
                    "{API_KEY_VAR} environment variable not set"
                ))
            })?;

            let body = ChatRequest {
                model: &request.model,
                max_tokens: request.max_tokens,
                messages: build_messages(&request),
            };

            let response = self
                .client
                .post(&self.endpoint)
                .bearer_auth(&api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("chat completions request failed: {e}").into()
                })?;

            let status = response.status();
            let response_text =
                response.text().await.map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Failed to read chat completions response: {e}").into()
                })?;

            if !status.is_success() {
                let msg = serde_json::from_str::<ApiError>(&response_text)
                    .map(|e| e.error.message)
                    .unwrap_or(response_text);
                return Err(format!("LLM API error ({}): {msg}", status.as_u16()).into());
            }

            parse_response(&response_text)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_message_precedes_user_prompt() {
        let request = CompletionRequest {
            model: "m".into(),
            system: Some("be terse".into()),
            prompt: "hello".into(),
            max_tokens: 10,
        };
        let body = ChatRequest {
            model: &request.model,
            max_tokens: 10,
            messages: build_messages(&request),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "hello");
    }

    #[test]
    fn parses_first_choice_and_usage() {
        let body = r#"{
            "choices": [{"message": {"role": "assistant", "content": "Layered app."}}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
        }"#;
        let response = parse_response(body).unwrap();
        assert_eq!(response.text, "Layered app.");
        assert_eq!(response.prompt_tokens, 12);
        assert_eq!(response.completion_tokens, 3);
    }

    #[test]
    fn empty_choices_are_an_error() {
        assert!(parse_response(r#"{"choices": []}"#).is_err());
    }
}
