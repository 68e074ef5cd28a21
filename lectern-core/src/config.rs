//! Runtime configuration, read once at process start.
//!
//! The backend mode is resolved here and nowhere else: callers build a
//! generation backend from `GenAiConfig` during startup and inject it,
//! rather than consulting environment flags ad hoc.

use std::env;

/// Which generation backend the process runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendMode {
    /// Real generative backend over HTTP.
    Live,
    /// Deterministic stub, used when the backend is disabled.
    Stub,
}

/// Generation backend configuration.
#[derive(Debug, Clone)]
pub struct GenAiConfig {
    pub mode: BackendMode,
    /// API key for the live backend. Absent in stub mode.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Per-attempt request timeout. The repair cascade inherits it; there is
    /// no additional timeout layer above the HTTP client.
    pub request_timeout_secs: u64,
}

impl Default for GenAiConfig {
    fn default() -> Self {
        Self {
            mode: BackendMode::Stub,
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.0-flash".to_string(),
            request_timeout_secs: 60,
        }
    }
}

impl GenAiConfig {
    /// Read config from the environment. An explicit `LLM_MODE` wins;
    /// otherwise the presence of an API key selects the live backend.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.api_key = env::var("GOOGLE_API_KEY").ok().filter(|k| !k.is_empty());

        let mode = env::var("LLM_MODE").unwrap_or_default().to_lowercase();
        config.mode = match mode.as_str() {
            "live" | "gemini" => BackendMode::Live,
            "stub" => BackendMode::Stub,
            _ if config.api_key.is_some() => BackendMode::Live,
            _ => BackendMode::Stub,
        };

        if let Ok(model) = env::var("LLM_MODEL") {
            if !model.is_empty() {
                config.model = model;
            }
        }
        if let Ok(url) = env::var("LLM_BASE_URL") {
            if !url.is_empty() {
                config.base_url = url;
            }
        }
        config
    }
}

/// Cache tier configuration.
#[derive(Debug, Clone, Default)]
pub struct CacheConfig {
    /// Development-only switch forcing every lookup to miss, so content can
    /// be regenerated while iterating on prompts.
    pub bypass: bool,
}

impl CacheConfig {
    pub fn from_env() -> Self {
        Self {
            bypass: env::var("LECTURE_CACHE_BYPASS")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }
}
