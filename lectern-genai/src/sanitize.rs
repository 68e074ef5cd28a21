//! Output sanitation for model responses that wrap JSON in formatting.
//!
//! Models routinely fence their JSON in markdown or leave a trailing comma
//! before a closing brace. Both are formatting noise, not content errors,
//! so they are stripped before parsing rather than burned on a repair call.

use std::sync::LazyLock;

use regex::Regex;

static FENCE_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)```json").unwrap());
static FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"```").unwrap());
static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([}\]])").unwrap());

/// Strip code fences and trailing commas from raw model output.
///
/// Idempotent: sanitizing already-sanitized text is a no-op. Trailing
/// commas are stripped to a fixpoint so stacked commas (",,]") cannot
/// survive one pass and change under the next.
pub fn sanitize_json(raw: &str) -> String {
    let cleaned = FENCE_OPEN.replace_all(raw, "");
    let cleaned = FENCE.replace_all(&cleaned, "");
    let mut cleaned = cleaned.trim().to_string();
    loop {
        let next = TRAILING_COMMA.replace_all(&cleaned, "$1").into_owned();
        if next == cleaned {
            return cleaned;
        }
        cleaned = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_fences_and_trailing_commas() {
        let raw = "```json\n{\"a\": [1, 2,], }\n```";
        assert_eq!(sanitize_json(raw), "{\"a\": [1, 2]}");
    }

    #[test]
    fn leaves_clean_json_alone() {
        let clean = "{\"a\": [1, 2]}";
        assert_eq!(sanitize_json(clean), clean);
    }
}
