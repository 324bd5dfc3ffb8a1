//! Natural-language repository summary via the LLM port.

use crate::config::LlmConfig;
use crate::context::ServiceContext;
use crate::ports::CompletionRequest;

/// System message framing the model's role.
pub const SYSTEM_PROMPT: &str =
    "You are a senior software architect analyzing a GitHub repository.";

const INSTRUCTIONS: &str = "Analyze this repository and explain:

1. Overall architecture
2. Tech stack
3. Folder structure meaning
4. How data flows
5. How to modify APIs

CODE SNIPPETS:
";

/// Builds the completion request for an excerpt.
#[must_use]
pub fn build_request(excerpt: &str, config: &LlmConfig) -> CompletionRequest {
    CompletionRequest {
        model: config.model.clone(),
        system: Some(SYSTEM_PROMPT.to_string()),
        prompt: format!("{INSTRUCTIONS}{excerpt}"),
        max_tokens: config.max_tokens,
    }
}

/// Asks the configured model to explain the repository behind `excerpt`.
///
/// The reply is returned verbatim.
///
/// # Errors
///
/// Returns an error string if the completion call fails.
pub async fn summarize(
    ctx: &ServiceContext,
    excerpt: &str,
    config: &LlmConfig,
) -> Result<String, String> {
    let request = build_request(excerpt, config);
    tracing::info!(model = %request.model, excerpt_bytes = excerpt.len(), "requesting summary");

    let response =
        ctx.llm.complete(&request).await.map_err(|e| format!("summarization failed: {e}"))?;

    tracing::info!(
        prompt_tokens = response.prompt_tokens,
        completion_tokens = response.completion_tokens,
        summary_bytes = response.text.len(),
        "summary received"
    );
    Ok(response.text)
}
