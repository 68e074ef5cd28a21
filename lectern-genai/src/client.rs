//! Generation backend client.
//!
//! `GenerationBackend` is the strategy object selected once at process
//! start from `GenAiConfig` — callers never consult a mode flag again.
//! The live variant speaks a `generateContent`-style HTTP API; the stub
//! variant returns deterministic JSON that satisfies the same structural
//! contracts the validators enforce.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use lectern_core::config::{BackendMode, GenAiConfig};
use lectern_core::errors::GenAiError;
use lectern_core::models::lecture::LectureLevel;

use crate::stub;

/// One part of a prompt: plain text or an inline binary document.
#[derive(Debug, Clone)]
pub enum PromptPart {
    Text(String),
    InlineData { mime_type: String, data_base64: String },
}

/// What kind of content a request is for. Labels the request in logs and
/// routes the stub backend to the matching deterministic payload.
#[derive(Debug, Clone)]
pub enum RequestKind {
    Lecture { topic_name: String, level: LectureLevel },
    TieIns { course_name: String, topic_name: String, chunk_count: usize },
    Question { topic_name: String },
    Visuals,
    Syllabus,
}

impl RequestKind {
    pub fn label(&self) -> &'static str {
        match self {
            RequestKind::Lecture { .. } => "lecture",
            RequestKind::TieIns { .. } => "tie_ins",
            RequestKind::Question { .. } => "question",
            RequestKind::Visuals => "visuals",
            RequestKind::Syllabus => "syllabus",
        }
    }
}

/// A single generation request.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub model: String,
    pub system_instruction: String,
    pub parts: Vec<PromptPart>,
    pub temperature: f64,
    pub max_output_tokens: u32,
    /// Ask the backend for structured JSON output directly.
    pub structured_json: bool,
    pub kind: RequestKind,
}

// ---------------------------------------------------------------------------
// Wire types for the generateContent API
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WirePart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<WireInlineData>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireInlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
struct WireContent {
    role: &'static str,
    parts: Vec<WirePart>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest {
    system_instruction: WireContent,
    contents: Vec<WireContent>,
    generation_config: WireGenerationConfig,
}

#[derive(Deserialize)]
struct WireResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
}

#[derive(Deserialize)]
struct WireCandidate {
    #[serde(default)]
    content: Option<WireCandidateContent>,
}

#[derive(Deserialize)]
struct WireCandidateContent {
    #[serde(default)]
    parts: Vec<WireResponsePart>,
}

#[derive(Deserialize)]
struct WireResponsePart {
    #[serde(default)]
    text: Option<String>,
}

// ---------------------------------------------------------------------------
// Live client
// ---------------------------------------------------------------------------

/// HTTP client for the live generative backend.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &GenAiConfig) -> Result<Self, GenAiError> {
        let api_key = config.api_key.clone().ok_or(GenAiError::MissingApiKey)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| GenAiError::Transport {
                reason: e.to_string(),
            })?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key,
        })
    }

    /// Issue one generation call and return the concatenated text parts.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<String, GenAiError> {
        let request_id = uuid::Uuid::new_v4();
        tracing::debug!(%request_id, kind = request.kind.label(), "genai: live request");

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, request.model, self.api_key
        );

        let parts = request
            .parts
            .iter()
            .map(|part| match part {
                PromptPart::Text(text) => WirePart {
                    text: Some(text.clone()),
                    inline_data: None,
                },
                PromptPart::InlineData { mime_type, data_base64 } => WirePart {
                    text: None,
                    inline_data: Some(WireInlineData {
                        mime_type: mime_type.clone(),
                        data: data_base64.clone(),
                    }),
                },
            })
            .collect();

        let body = WireRequest {
            system_instruction: WireContent {
                role: "system",
                parts: vec![WirePart {
                    text: Some(request.system_instruction.clone()),
                    inline_data: None,
                }],
            },
            contents: vec![WireContent {
                role: "user",
                parts,
            }],
            generation_config: WireGenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_output_tokens,
                response_mime_type: request.structured_json.then_some("application/json"),
            },
        };

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenAiError::Transport {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            body.truncate(512);
            return Err(GenAiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: WireResponse = response.json().await.map_err(|e| GenAiError::Transport {
            reason: e.to_string(),
        })?;

        let text: String = parsed
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .filter_map(|p| p.text)
            .collect();

        if text.is_empty() {
            return Err(GenAiError::EmptyResponse);
        }
        Ok(text.trim().to_string())
    }
}

// ---------------------------------------------------------------------------
// Stub backend
// ---------------------------------------------------------------------------

/// Deterministic backend used when the real one is disabled. Emits JSON
/// that satisfies the same structural contract per request kind, so the
/// whole generate-validate-repair pipeline runs unchanged against it.
#[derive(Debug, Clone, Default)]
pub struct StubBackend;

impl StubBackend {
    pub fn generate(&self, request: &GenerationRequest) -> Result<String, GenAiError> {
        stub::stub_raw_json(&request.kind)
    }
}

// ---------------------------------------------------------------------------
// Strategy object
// ---------------------------------------------------------------------------

/// The generation backend, chosen once at process start.
#[derive(Debug, Clone)]
pub enum GenerationBackend {
    Gemini(GeminiClient),
    Stub(StubBackend),
}

impl GenerationBackend {
    /// Build the backend selected by config. Falls back to the stub (with a
    /// warning) when live mode is configured without an API key.
    pub fn from_config(config: &GenAiConfig) -> Self {
        match config.mode {
            BackendMode::Live => match GeminiClient::new(config) {
                Ok(client) => GenerationBackend::Gemini(client),
                Err(e) => {
                    tracing::warn!("genai: live backend unavailable ({e}), using stub");
                    GenerationBackend::Stub(StubBackend)
                }
            },
            BackendMode::Stub => GenerationBackend::Stub(StubBackend),
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, GenerationBackend::Gemini(_))
    }

    /// Issue one generation call. The only errors this returns are
    /// transport-level; response content problems are the caller's to judge.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<String, GenAiError> {
        tracing::debug!(kind = request.kind.label(), model = %request.model, "genai: generate");
        match self {
            GenerationBackend::Gemini(client) => client.generate(request).await,
            GenerationBackend::Stub(stub) => stub.generate(request),
        }
    }
}
