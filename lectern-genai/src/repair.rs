//! Generate → sanitize → parse → validate → repair-once cascade.
//!
//! The repair budget is exactly one call. That caps worst-case latency and
//! cost at 2x a single generation while still recovering the common
//! formatting-only failures (fenced output, trailing commas, extra prose).
//! Callers own what happens on total failure; this module never errors on a
//! malformed-but-received response.

use serde_json::Value;

use lectern_core::errors::GenAiError;

use crate::client::{GenerationBackend, GenerationRequest, PromptPart};
use crate::sanitize::sanitize_json;

/// What a generate/repair cycle produced.
#[derive(Debug)]
pub struct RepairOutcome<T> {
    /// The validated payload, or `None` when the repair attempt also failed.
    pub result: Option<T>,
    /// Whether the repair call was issued.
    pub repaired: bool,
    /// Raw text of the last backend response, for diagnostics.
    pub raw: String,
}

/// The primary request plus how to build its repair follow-up.
pub struct RepairRequest<'a> {
    pub primary: GenerationRequest,
    pub repair_system_instruction: &'a str,
    /// Builds the repair prompt from the broken (sanitized) text and the
    /// validation errors the first attempt accumulated.
    pub build_repair_prompt: &'a dyn Fn(&str, &[String]) -> String,
}

/// Run one generation with at most one repair attempt.
///
/// `validate` judges a parsed JSON value and either returns the normalized
/// typed payload or the list of violated rules (which is embedded verbatim
/// in the repair prompt).
pub async fn run_json_with_repair<T>(
    backend: &GenerationBackend,
    spec: RepairRequest<'_>,
    validate: &mut dyn FnMut(&Value) -> Result<T, Vec<String>>,
) -> Result<RepairOutcome<T>, GenAiError> {
    let kind = spec.primary.kind.label();

    let raw = backend.generate(&spec.primary).await?;
    let cleaned = sanitize_json(&raw);

    let errors = match serde_json::from_str::<Value>(&cleaned) {
        Ok(value) => match validate(&value) {
            Ok(result) => {
                return Ok(RepairOutcome {
                    result: Some(result),
                    repaired: false,
                    raw,
                })
            }
            Err(errors) => errors,
        },
        Err(e) => vec![format!("response was not parseable JSON: {e}")],
    };

    tracing::debug!(kind, errors = ?errors, "genai: first attempt invalid, repairing");

    // One repair call: same schema + the broken text, temperature forced to 0.
    let repair_request = GenerationRequest {
        system_instruction: spec.repair_system_instruction.to_string(),
        parts: vec![PromptPart::Text((spec.build_repair_prompt)(
            &cleaned, &errors,
        ))],
        temperature: 0.0,
        ..spec.primary
    };

    let repair_raw = backend.generate(&repair_request).await?;
    let repair_cleaned = sanitize_json(&repair_raw);

    if let Ok(value) = serde_json::from_str::<Value>(&repair_cleaned) {
        if let Ok(result) = validate(&value) {
            tracing::debug!(kind, "genai: repair attempt validated");
            return Ok(RepairOutcome {
                result: Some(result),
                repaired: true,
                raw: repair_raw,
            });
        }
    }

    tracing::warn!(kind, "genai: repair attempt still invalid");
    Ok(RepairOutcome {
        result: None,
        repaired: true,
        raw: repair_raw,
    })
}
