//! Error taxonomy for the Lectern pipeline.
//!
//! Only transport-level failures from the generative backend surface as
//! errors. Malformed or contract-violating model output is data, not an
//! error: it flows through the repair cascade and ends in a fallback.

/// Workspace-wide result alias.
pub type LecternResult<T> = Result<T, LecternError>;

/// Generation backend errors.
#[derive(Debug, thiserror::Error)]
pub enum GenAiError {
    #[error("backend request failed: {reason}")]
    Transport { reason: String },

    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("backend response had no text candidates")]
    EmptyResponse,

    #[error("api key missing for live backend")]
    MissingApiKey,

    #[error("payload encoding failed: {reason}")]
    Encode { reason: String },
}

/// Cache tier errors.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache record under {key} failed to deserialize: {reason}")]
    Corrupt { key: String, reason: String },
}

/// Top-level error for the Lectern pipeline.
#[derive(Debug, thiserror::Error)]
pub enum LecternError {
    #[error(transparent)]
    GenAi(#[from] GenAiError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}
