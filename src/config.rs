//! Analyzer configuration: traversal denylist, excerpt bounds, LLM settings.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Config file looked up in the analyzed root when no explicit path is given.
pub const ROOT_CONFIG_FILE: &str = ".archlens.yaml";

/// Directories pruned by the walker unless overridden.
const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    "bower_components",
    "vendor",
    ".git",
    ".svn",
    ".hg",
    "dist",
    "build",
    "out",
    "target",
    ".next",
    "coverage",
    "__pycache__",
    ".venv",
    "venv",
];

/// Groq's OpenAI-compatible chat completions endpoint.
pub const DEFAULT_LLM_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Model used for summaries unless overridden.
pub const DEFAULT_LLM_MODEL: &str = "llama-3.3-70b-versatile";

/// Environment variable overriding `llm.model`.
pub const MODEL_ENV_VAR: &str = "ARCHLENS_MODEL";

/// Environment variable overriding `llm.endpoint`.
pub const ENDPOINT_ENV_VAR: &str = "ARCHLENS_LLM_ENDPOINT";

/// Serialises tests that mutate the process environment.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Top-level analyzer configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Directory names whose subtrees are never visited.
    pub excluded_dirs: Vec<String>,
    /// Bounds for the summarization excerpt.
    pub excerpt: ExcerptConfig,
    /// Summarization model settings.
    pub llm: LlmConfig,
}

/// Bounds for the text excerpt handed to the summarizer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExcerptConfig {
    /// Number of files (in traversal order) included.
    pub max_files: usize,
    /// Byte cap applied to each file's content.
    pub max_bytes_per_file: usize,
}

/// Settings for the summarization call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LlmConfig {
    /// Chat completions URL.
    pub endpoint: String,
    /// Model identifier.
    pub model: String,
    /// Maximum number of tokens to generate.
    pub max_tokens: u32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| (*d).to_string()).collect(),
            excerpt: ExcerptConfig::default(),
            llm: LlmConfig::default(),
        }
    }
}

impl Default for ExcerptConfig {
    fn default() -> Self {
        Self { max_files: 20, max_bytes_per_file: 1000 }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_LLM_ENDPOINT.to_string(),
            model: DEFAULT_LLM_MODEL.to_string(),
            max_tokens: 2048,
        }
    }
}

impl AnalyzerConfig {
    /// Parses a config from YAML text. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the YAML does not match the config shape.
    pub fn from_yaml(yaml: &str, origin: &Path) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml)
            .map_err(|source| ConfigError::Parse { path: origin.to_path_buf(), source })
    }

    /// Loads the config for an analysis of `root`.
    ///
    /// Uses `explicit` when given, otherwise `<root>/.archlens.yaml` if it
    /// exists, otherwise the defaults. Environment overrides are applied last.
    ///
    /// # Errors
    ///
    /// Returns an error if the selected file cannot be read or parsed.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let candidate: Option<PathBuf> = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Some(root.join(ROOT_CONFIG_FILE)).filter(|p| p.is_file()),
        };

        let mut config = match candidate {
            Some(path) => {
                let yaml = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::Read { path: path.clone(), source })?;
                tracing::debug!(path = %path.display(), "loaded analyzer config");
                Self::from_yaml(&yaml, &path)?
            }
            None => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Applies `ARCHLENS_MODEL` and `ARCHLENS_LLM_ENDPOINT` when set.
    fn apply_env_overrides(&mut self) {
        if let Ok(model) = env::var(MODEL_ENV_VAR) {
            if !model.trim().is_empty() {
                self.llm.model = model;
            }
        }
        if let Ok(endpoint) = env::var(ENDPOINT_ENV_VAR) {
            if !endpoint.trim().is_empty() {
                self.llm.endpoint = endpoint;
            }
        }
    }

    /// Returns `true` if a directory with this name must be pruned.
    #[must_use]
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.excluded_dirs.iter().any(|d| d == name)
    }
}
