//! Tests for the general-lecture, tie-in, and Q&A validators.

use serde_json::json;

use lectern_validation::{validate_answer, validate_general_lecture, validate_tie_ins};
use test_fixtures::{lecture_value, narration_of};

// ─── general lecture: floors ───

#[test]
fn accepts_a_lecture_clearing_every_floor() {
    let value = lecture_value(8, 160);
    let content = validate_general_lecture(&value).expect("valid lecture");
    assert_eq!(content.chunks.len(), 8);
    assert!(content.chunks.iter().all(|c| !c.narration.is_empty()));
}

#[test]
fn rejects_too_few_chunks() {
    let value = lecture_value(7, 160);
    let errors = validate_general_lecture(&value).unwrap_err();
    assert!(errors.iter().any(|e| e.contains("at least 8 chunks")));
}

#[test]
fn rejects_a_thin_chunk_even_when_total_is_high() {
    let mut value = lecture_value(8, 200);
    value["chunks"][3]["narration"] = json!(narration_of(80));
    let errors = validate_general_lecture(&value).unwrap_err();
    assert!(errors.iter().any(|e| e.contains("chunk 3 narration below 120")));
}

#[test]
fn rejects_low_aggregate_independently_of_per_chunk_floor() {
    // Every chunk clears 120 words but the total stays under 1,200.
    let value = lecture_value(8, 125);
    let errors = validate_general_lecture(&value).unwrap_err();
    assert!(errors.iter().any(|e| e.contains("total narration below 1200")));
}

// ─── general lecture: key allow-lists ───

#[test]
fn rejects_top_questions_at_the_root() {
    let mut value = lecture_value(8, 160);
    value["topQuestions"] = json!(["What is this?"]);
    let errors = validate_general_lecture(&value).unwrap_err();
    assert!(errors.iter().any(|e| e.contains("topQuestions")));
}

#[test]
fn rejects_unknown_root_and_chunk_keys() {
    let mut value = lecture_value(8, 160);
    value["extraField"] = json!(1);
    value["chunks"][0]["sidebar"] = json!("nope");
    let errors = validate_general_lecture(&value).unwrap_err();
    assert!(errors.iter().any(|e| e.contains("unexpected root key: extraField")));
    assert!(errors.iter().any(|e| e.contains("chunk 0 has unexpected key: sidebar")));
}

#[test]
fn rejects_malformed_board_ops() {
    let mut value = lecture_value(8, 160);
    value["chunks"][0]["boardOps"] = json!([{ "op": "hologram" }]);
    let errors = validate_general_lecture(&value).unwrap_err();
    assert!(errors.iter().any(|e| e.contains("chunk 0 boardOps malformed")));
}

// ─── general lecture: confusion mode ───

#[test]
fn rejects_missing_confusion_summary() {
    let mut value = lecture_value(8, 160);
    value["confusionMode"] = json!({ "boardOps": [] });
    let errors = validate_general_lecture(&value).unwrap_err();
    assert!(errors.iter().any(|e| e.contains("confusionMode summary missing")));
}

#[test]
fn rejects_an_overlong_confusion_summary() {
    let mut value = lecture_value(8, 160);
    value["confusionMode"]["summary"] = json!(narration_of(150));
    let errors = validate_general_lecture(&value).unwrap_err();
    assert!(errors.iter().any(|e| e.contains("confusion summary above")));
}

// ─── tie-ins ───

#[test]
fn accepts_a_tie_in_per_chunk() {
    let value = json!({ "tieIns": ["One.", "Two.", "Three."] });
    let tie_ins = validate_tie_ins(&value, 3).expect("valid tie-ins");
    assert_eq!(tie_ins.len(), 3);
}

#[test]
fn rejects_a_count_mismatch() {
    let value = json!({ "tieIns": ["One.", "Two."] });
    let errors = validate_tie_ins(&value, 3).unwrap_err();
    assert!(errors.iter().any(|e| e.contains("exactly 3 entries")));
}

#[test]
fn rejects_a_rambling_tie_in() {
    let value = json!({ "tieIns": ["One. Two. Three sentences is too many."] });
    let errors = validate_tie_ins(&value, 1).unwrap_err();
    assert!(errors.iter().any(|e| e.contains("1-2 sentences")));
}

#[test]
fn rejects_an_unexpected_envelope() {
    let value = json!({ "tieIns": ["One."], "notes": [] });
    let errors = validate_tie_ins(&value, 1).unwrap_err();
    assert!(errors.iter().any(|e| e.contains("unexpected root key: notes")));
}

// ─── Q&A ───

#[test]
fn accepts_a_compact_answer() {
    let value = json!({
        "answer": "Short and direct.",
        "boardOps": [ { "op": "text", "x": 1.0, "y": 2.0, "text": "hint" } ],
    });
    let answer = validate_answer(&value).expect("valid answer");
    assert_eq!(answer.answer, "Short and direct.");
}

#[test]
fn rejects_a_missing_answer() {
    let value = json!({ "boardOps": [] });
    let errors = validate_answer(&value).unwrap_err();
    assert!(errors.iter().any(|e| e.contains("answer missing")));
}

#[test]
fn rejects_too_many_answer_board_ops() {
    let op = json!({ "op": "text", "x": 1.0, "y": 2.0, "text": "hint" });
    let value = json!({ "answer": "Ok.", "boardOps": [op.clone(), op.clone(), op.clone(), op] });
    let errors = validate_answer(&value).unwrap_err();
    assert!(errors.iter().any(|e| e.contains("capped at 3")));
}
