//! Orchestrator tests against the deterministic stub backend, plus the
//! contract check that stub content clears the real validators.

use serde_json::Value;

use lectern_core::config::GenAiConfig;
use lectern_core::models::lecture::{ContentSource, LectureLevel};
use lectern_genai::stub::{stub_lecture, stub_tie_ins};
use lectern_genai::{
    run_json_with_repair, GenerationBackend, GenerationRequest, PromptPart, RepairRequest,
    RequestKind, StubBackend,
};
use lectern_validation::{validate_general_lecture, validate_tie_ins};

fn lecture_request() -> GenerationRequest {
    GenerationRequest {
        model: GenAiConfig::default().model,
        system_instruction: "test".to_string(),
        parts: vec![PromptPart::Text("generate".to_string())],
        temperature: 0.2,
        max_output_tokens: 4096,
        structured_json: true,
        kind: RequestKind::Lecture {
            topic_name: "pointers".to_string(),
            level: LectureLevel::Intro,
        },
    }
}

// ─── stub content satisfies the validators it will be judged by ───

#[test]
fn stub_lecture_passes_the_general_validator() {
    let lecture = stub_lecture("pointers", LectureLevel::Intro, ContentSource::Stub);
    let value = serde_json::to_value(&lecture).expect("serializable");
    let validated = validate_general_lecture(&value).expect("stub must satisfy every floor");
    assert!(validated.chunks.len() >= 8);
    let total: usize = validated
        .chunks
        .iter()
        .map(|c| c.narration.split_whitespace().count())
        .sum();
    assert!(total >= 1_200, "stub total narration too small: {total}");
}

#[test]
fn stub_tie_ins_pass_the_tie_in_validator() {
    let tie_ins = stub_tie_ins("Systems 101", "pointers", "Lesson 2 of 9", 8);
    let value = serde_json::json!({ "tieIns": tie_ins });
    let validated = validate_tie_ins(&value, 8).expect("stub tie-ins valid");
    assert_eq!(validated.len(), 8);
}

// ─── orchestrator paths ───

#[tokio::test]
async fn first_attempt_success_skips_repair() {
    let backend = GenerationBackend::Stub(StubBackend);
    let build_repair = |_raw: &str, _errors: &[String]| "repair".to_string();
    let spec = RepairRequest {
        primary: lecture_request(),
        repair_system_instruction: "repair",
        build_repair_prompt: &build_repair,
    };
    let mut validate = validate_general_lecture;

    let outcome = run_json_with_repair(&backend, spec, &mut validate)
        .await
        .expect("stub backend never fails transport");

    assert!(!outcome.repaired);
    let content = outcome.result.expect("stub output validates");
    assert_eq!(content.source, ContentSource::Stub);
}

#[tokio::test]
async fn two_rejections_return_none_after_one_repair() {
    let backend = GenerationBackend::Stub(StubBackend);
    let mut attempts = 0;
    let build_repair = |_raw: &str, errors: &[String]| {
        assert!(!errors.is_empty(), "repair prompt must carry the errors");
        "repair".to_string()
    };
    let spec = RepairRequest {
        primary: lecture_request(),
        repair_system_instruction: "repair",
        build_repair_prompt: &build_repair,
    };
    // A validator that refuses everything: the orchestrator must stop after
    // exactly one repair call, not retry unboundedly.
    let mut validate = |_value: &Value| -> Result<(), Vec<String>> {
        attempts += 1;
        Err(vec!["always rejected".to_string()])
    };

    let outcome = run_json_with_repair(&backend, spec, &mut validate)
        .await
        .expect("transport ok");

    assert!(outcome.repaired);
    assert!(outcome.result.is_none());
    assert_eq!(attempts, 2, "exactly two validation attempts");
}

#[tokio::test]
async fn stub_backend_emits_parseable_lecture_json() {
    let backend = GenerationBackend::Stub(StubBackend);
    let raw = backend.generate(&lecture_request()).await.expect("stub generates");
    let cleaned = lectern_genai::sanitize_json(&raw);
    let value: Value = serde_json::from_str(&cleaned).expect("stub emits parseable JSON");
    assert!(value.get("chunks").is_some());
}
