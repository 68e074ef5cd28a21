//! Sanitizer behavior, including the idempotence property.

use proptest::prelude::*;

use lectern_genai::sanitize_json;

#[test]
fn strips_json_fences_case_insensitively() {
    assert_eq!(sanitize_json("```JSON\n{\"a\": 1}\n```"), "{\"a\": 1}");
}

#[test]
fn strips_bare_fences() {
    assert_eq!(sanitize_json("```\n[1, 2]\n```"), "[1, 2]");
}

#[test]
fn removes_trailing_commas_before_closers() {
    assert_eq!(sanitize_json("{\"a\": [1, 2,],}"), "{\"a\": [1, 2]}");
}

#[test]
fn fenced_output_with_prose_still_yields_the_json() {
    let raw = "```json\n{\"answer\": \"ok\"}\n```";
    let cleaned = sanitize_json(raw);
    let value: serde_json::Value = serde_json::from_str(&cleaned).expect("parseable");
    assert_eq!(value["answer"], "ok");
}

proptest! {
    // sanitize(sanitize(x)) == sanitize(x) for arbitrary input.
    #[test]
    fn sanitize_is_idempotent(raw in ".{0,400}") {
        let once = sanitize_json(&raw);
        let twice = sanitize_json(&once);
        prop_assert_eq!(once, twice);
    }
}
