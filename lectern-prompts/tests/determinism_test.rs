//! Prompt builders are pure: identical inputs yield byte-identical prompts.
//! Cache keys are only meaningful because of this.

use lectern_core::models::lecture::LectureLevel;
use lectern_prompts::lecture::{general_lecture_prompt, tie_in_prompt};
use lectern_prompts::visuals::{visuals_prompt, VisualsPromptInput};

#[test]
fn lecture_prompt_is_byte_stable() {
    let a = general_lecture_prompt("Pointers", "addresses and arrays", LectureLevel::Intro, "v1");
    let b = general_lecture_prompt("Pointers", "addresses and arrays", LectureLevel::Intro, "v1");
    assert_eq!(a, b);
}

#[test]
fn version_tokens_change_prompt_bytes() {
    let v1 = general_lecture_prompt("Pointers", "addresses", LectureLevel::Intro, "v1");
    let v2 = general_lecture_prompt("Pointers", "addresses", LectureLevel::Intro, "v2");
    assert_ne!(v1, v2);

    let t1 = tie_in_prompt("Systems 101", "Pointers", "ctx", "Lesson 1 of 9", 8, "v1");
    let t2 = tie_in_prompt("Systems 101", "Pointers", "ctx", "Lesson 1 of 9", 8, "v2");
    assert_ne!(t1, t2);
}

#[test]
fn visuals_prompt_embeds_anchors_and_domains() {
    let anchors = vec!["for example, walk the array".to_string()];
    let input = VisualsPromptInput {
        transcript_chunk: "for example, walk the array",
        code_snippets: &[],
        anchors: &anchors,
        example_count: 1,
        selected_domains: &["cs_arch"],
    };
    let prompt = visuals_prompt(&input);
    assert!(prompt.contains("for example, walk the array"));
    assert!(prompt.contains("cs_arch"));
    assert_eq!(prompt, visuals_prompt(&input));
}
