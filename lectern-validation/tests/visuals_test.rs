//! Tests for anchor extraction, domain detection, normalization, and the
//! visuals batch validator.

use serde_json::{json, Value};

use lectern_core::models::visual::VisualsResult;
use lectern_validation::{
    detect_domains, extract_visual_anchors, normalize_visual_output, validate_visual_output,
};
use test_fixtures::{memory_diagram_visual, sample_transcript, table_visual};

fn validate(value: &Value, transcript: &str, anchors: &[&str], example_count: usize) -> Result<VisualsResult, Vec<String>> {
    let anchors: Vec<String> = anchors.iter().map(|a| a.to_string()).collect();
    validate_visual_output(value, transcript, &anchors, example_count)
}

// ─── anchor extraction ───

#[test]
fn anchor_extraction_counts_examples() {
    let transcript = "For example, suppose arr[3] = {1,2,3}.";
    let set = extract_visual_anchors(transcript, &[]);
    assert!(set.example_count >= 1);
    assert!(!set.anchors.is_empty());
}

#[test]
fn verbatim_code_snippets_become_anchors() {
    let snippet = "int arr[3] = {1, 2, 3};".to_string();
    let transcript = format!("Suppose we write `{snippet}` and step through it.");
    let set = extract_visual_anchors(&transcript, std::slice::from_ref(&snippet));
    assert!(set.anchors.contains(&snippet));
    // The sentence (example phrase + inline code) and the snippet both count.
    assert_eq!(set.example_count, 2);
}

#[test]
fn anchors_deduplicate_preserving_order() {
    let set = extract_visual_anchors(sample_transcript(), &[]);
    let mut seen = std::collections::HashSet::new();
    for anchor in &set.anchors {
        assert!(seen.insert(anchor.clone()), "duplicate anchor: {anchor}");
    }
}

// ─── domain detection ───

#[test]
fn cs_arch_selected_on_pointer_stack_text() {
    let detection = detect_domains(
        "We use a pointer and stack memory.",
        &["int *p = arr;".to_string()],
    );
    assert!(detection.selected.contains(&"cs_arch"));
}

#[test]
fn empty_keyword_domains_never_select() {
    let detection = detect_domains("Completely unrelated cooking text.", &[]);
    assert!(detection.selected.is_empty());
}

// ─── batch shape ───

#[test]
fn anchor_quote_must_be_substring() {
    let transcript = "Here is an example. for example we show it.";
    let value = json!([
        table_visual("V1", "for example"),
        table_visual("V2", "not in transcript"),
    ]);
    let errors = validate(&value, transcript, &["for example"], 1).unwrap_err();
    assert!(errors.iter().any(|e| e.contains("anchor_quote")));
}

#[test]
fn type_whitelist_enforced() {
    let transcript = "for example we show it.";
    let mut bad = table_visual("V2", "for example");
    bad["type"] = json!("photo");
    let value = json!([table_visual("V1", "for example"), bad]);
    let errors = validate(&value, transcript, &["for example"], 1).unwrap_err();
    assert!(errors.iter().any(|e| e.contains("not allowed")));
}

#[test]
fn batch_of_one_is_too_small() {
    let transcript = "for example we show it.";
    let value = json!([table_visual("V1", "for example")]);
    let errors = validate(&value, transcript, &["for example"], 1).unwrap_err();
    assert!(errors.iter().any(|e| e.contains("2-6")));
}

#[test]
fn batch_must_cover_example_count() {
    let transcript = "for example we show it.";
    let value = json!([table_visual("V1", "for example")]);
    let errors = validate(&value, transcript, &["for example"], 2).unwrap_err();
    assert!(errors.iter().any(|e| e.contains(">= number of examples")));
}

#[test]
fn duplicate_ids_rejected() {
    let transcript = "for example we show it.";
    let value = json!([
        table_visual("V1", "for example"),
        table_visual("V1", "for example"),
    ]);
    let errors = validate(&value, transcript, &["for example"], 1).unwrap_err();
    assert!(errors.iter().any(|e| e.contains("unique")));
}

#[test]
fn every_anchor_needs_coverage() {
    let transcript = "for example we show it. Watch out for the pointer.";
    let value = json!([
        table_visual("V1", "for example"),
        table_visual("V2", "for example"),
    ]);
    let errors = validate(
        &value,
        transcript,
        &["for example", "Watch out for the pointer."],
        1,
    )
    .unwrap_err();
    assert!(errors.iter().any(|e| e.contains("anchor missing visual coverage")));
}

#[test]
fn three_sentence_caption_rejected() {
    let transcript = "for example we show it.";
    let mut wordy = table_visual("V2", "for example");
    wordy["caption"] = json!("One. Two. Three.");
    let value = json!([table_visual("V1", "for example"), wordy]);
    let errors = validate(&value, transcript, &["for example"], 1).unwrap_err();
    assert!(errors.iter().any(|e| e.contains("1-2 sentences")));
}

#[test]
fn array_points_to_pointer_phrasing_rejected() {
    let transcript = "for example we show it.";
    let mut backwards = table_visual("V1", "for example");
    backwards["title"] = json!("Array points to pointer");
    backwards["caption"] = json!("Array points to pointer.");
    let value = json!([backwards, table_visual("V2", "for example")]);
    let errors = validate(&value, transcript, &["for example"], 1).unwrap_err();
    assert!(errors.iter().any(|e| e.contains("array points to pointer")));
}

// ─── memory diagrams ───

#[test]
fn array_indices_must_be_contiguous() {
    let transcript = "for example we show it.";
    let diagram = memory_diagram_visual(
        "V1",
        "for example",
        json!({
            "variables": [
                { "name": "arr", "kind": "array",
                  "cells": [ { "index": 0, "value": 1 }, { "index": 2, "value": 3 } ] }
            ]
        }),
    );
    let value = json!([diagram, table_visual("V2", "for example")]);
    let errors = validate(&value, transcript, &["for example"], 1).unwrap_err();
    assert!(errors.iter().any(|e| e.contains("contiguous")));
}

#[test]
fn arrows_must_originate_from_pointers() {
    let transcript = "for example we show it.";
    let diagram = memory_diagram_visual(
        "V1",
        "for example",
        json!({
            "variables": [
                { "name": "arr", "kind": "array", "cells": [ { "index": 0, "value": 1 } ] },
                { "name": "p", "kind": "pointer", "points_to": "arr[0]" }
            ],
            "arrows": [ { "from": "arr", "to_address": "arr[0]" } ]
        }),
    );
    let value = json!([diagram, table_visual("V2", "for example")]);
    let errors = validate(&value, transcript, &["for example"], 1).unwrap_err();
    assert!(errors.iter().any(|e| e.contains("pointer")));
}

#[test]
fn pointer_without_arrows_is_flagged() {
    let transcript = "for example we show it.";
    let diagram = memory_diagram_visual(
        "V1",
        "for example",
        json!({
            "variables": [
                { "name": "p", "kind": "pointer", "points_to": "arr[0]" }
            ]
        }),
    );
    let value = json!([diagram, table_visual("V2", "for example")]);
    let errors = validate(&value, transcript, &["for example"], 1).unwrap_err();
    assert!(errors.iter().any(|e| e.contains("pointer arrows missing")));
}

// ─── normalization ───

#[test]
fn fabricated_addresses_are_stripped() {
    // 0xBEEF appears nowhere in the transcript; 0x1000 does.
    let transcript = "The array starts at 0x1000. Suppose we look at arr[0].";
    let diagram = memory_diagram_visual(
        "V1",
        "Suppose we look at arr[0].",
        json!({
            "variables": [
                { "name": "arr", "kind": "array", "base_address": "0x1000",
                  "cells": [ { "index": 0, "value": 1, "address": "0xBEEF" } ] }
            ]
        }),
    );
    let mut value = json!([diagram]);
    normalize_visual_output(&mut value, transcript, &[]);

    let cell = &value[0]["content"]["variables"][0]["cells"][0];
    assert!(cell.get("address").is_none(), "fabricated address kept");
    let base = &value[0]["content"]["variables"][0]["base_address"];
    assert_eq!(base, "0x1000", "legitimate address stripped");
}

#[test]
fn dangling_pointer_retargets_to_first_array_cell() {
    let transcript = "Suppose we look at arr[0].";
    let diagram = memory_diagram_visual(
        "V1",
        "Suppose we look at arr[0].",
        json!({
            "variables": [
                { "name": "arr", "kind": "array", "cells": [ { "index": 0, "value": 1 } ] },
                { "name": "p", "kind": "pointer", "points_to": "0xDEAD" }
            ],
            "arrows": [ { "from": "p", "to_address": "0xDEAD" } ]
        }),
    );
    let mut value = json!([diagram]);
    normalize_visual_output(&mut value, transcript, &[]);

    assert_eq!(value[0]["content"]["variables"][1]["points_to"], "arr[0]");
    assert_eq!(value[0]["content"]["arrows"][0]["to_address"], "arr[0]");
}

// ─── clarification variant ───

#[test]
fn clarification_accepted_with_reason_and_question() {
    let value = json!({
        "needs_clarification": {
            "reason": "nothing concrete to draw",
            "questions": ["Which example should be visualized?"]
        }
    });
    let result = validate(&value, "anything", &[], 0).expect("valid clarification");
    assert!(result.is_clarification());
}

#[test]
fn clarification_without_questions_rejected() {
    let value = json!({ "needs_clarification": { "reason": "unclear", "questions": [] } });
    let errors = validate(&value, "anything", &[], 0).unwrap_err();
    assert!(errors.iter().any(|e| e.contains("questions missing")));
}
