//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the analysis core and an
//! external system (file contents, language model). Implementations live in
//! `src/adapters/`.

pub mod filesystem;
pub mod llm;

pub use filesystem::FileSystem;
pub use llm::{CompletionRequest, CompletionResponse, LlmClient, LlmFuture};
