//! LectureService — cache-aware orchestration of every exposed operation.
//!
//! A full package build is sequential for general content and tie-ins
//! (each ≤2 backend calls), then fans out one visuals cycle per chunk
//! concurrently. Branches fail independently; a chunk that cannot be
//! visualized gets a clarification payload, not an aborted request.

use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use serde_json::Value;

use lectern_cache::{
    general_cache_key, normalize_topic, tie_in_cache_key, topic_context_hash, user_cache_key,
    GeneralTier, ICacheStore, TieInTier, UserTier,
};
use lectern_core::config::{CacheConfig, GenAiConfig};
use lectern_core::constants::{
    MAX_VISUAL_ANCHORS, STYLE_VERSION, TIE_IN_VERSION, VISUALS_VERSION, WHITEBOARD_VERSION,
};
use lectern_core::errors::LecternResult;
use lectern_core::models::cache_record::{GeneralCacheRecord, TieInCacheRecord, UserCacheRecord};
use lectern_core::models::lecture::{
    ContentSource, GeneralLectureContent, LectureLevel, LecturePackage, LectureQuestionAnswer,
    PackageChunk,
};
use lectern_core::models::syllabus::Syllabus;
use lectern_core::models::visual::{NeedsClarification, VisualsResult};
use lectern_genai::stub::{stub_answer, stub_lecture, stub_tie_ins};
use lectern_genai::{
    run_json_with_repair, GenerationBackend, GenerationRequest, PromptPart, RepairRequest,
    RequestKind,
};
use lectern_prompts::lecture::{
    general_lecture_prompt, lecture_repair_prompt, question_prompt, question_repair_prompt,
    tie_in_prompt, tie_in_repair_prompt, GENERAL_SYSTEM_INSTRUCTION,
    LECTURE_REPAIR_SYSTEM_INSTRUCTION, QUESTION_REPAIR_SYSTEM_INSTRUCTION,
    QUESTION_SYSTEM_INSTRUCTION, TIE_IN_REPAIR_SYSTEM_INSTRUCTION, TIE_IN_SYSTEM_INSTRUCTION,
};
use lectern_prompts::visuals::{
    visuals_prompt, visuals_repair_prompt, VisualsPromptInput, BASE_VISUAL_CONTRACT,
    VISUALS_REPAIR_SYSTEM_INSTRUCTION,
};
use lectern_syllabus::parse_syllabus_from_bytes;
use lectern_validation::{
    detect_domains, extract_visual_anchors, normalize_visual_output, validate_answer,
    validate_general_lecture, validate_tie_ins, validate_visual_output,
};

/// Course/topic metadata handed in by the calling layer's record store.
#[derive(Debug, Clone)]
pub struct TopicRef {
    pub course_id: String,
    pub course_name: String,
    pub topic_id: String,
    pub topic_name: String,
    pub topic_context: String,
    pub topic_ordering: String,
}

/// "Lesson N of M" ordering string for tie-in prompts, from the topic's
/// position in the course schedule.
pub fn ordering_label(position: Option<usize>, total: usize) -> String {
    match position {
        Some(index) if index < total => format!("Lesson {} of {}", index + 1, total),
        _ => "ordering unknown".to_string(),
    }
}

/// The service facade over backend, validators, and cache tiers.
pub struct LectureService {
    backend: GenerationBackend,
    model: String,
    general: GeneralTier,
    tie_ins: TieInTier,
    users: UserTier,
}

impl LectureService {
    pub fn new(
        backend: GenerationBackend,
        store: Arc<dyn ICacheStore>,
        genai_config: &GenAiConfig,
        cache_config: &CacheConfig,
    ) -> Self {
        Self {
            backend,
            model: genai_config.model.clone(),
            general: GeneralTier::new(store.clone(), cache_config),
            tie_ins: TieInTier::new(store.clone(), cache_config),
            users: UserTier::new(store, cache_config),
        }
    }

    // -----------------------------------------------------------------------
    // General lecture
    // -----------------------------------------------------------------------

    /// Generate (or fetch) course-agnostic lecture content.
    ///
    /// Never fails: a transport error or an exhausted repair attempt
    /// substitutes the deterministic stub, tagged `stub_fallback` and not
    /// cached, so the next request retries the live backend.
    pub async fn generate_lecture(
        &self,
        topic_name: &str,
        topic_context: &str,
        level: LectureLevel,
        style_version: &str,
    ) -> GeneralLectureContent {
        let normalized = normalize_topic(topic_context);
        let cache_key = general_cache_key(&normalized, level.as_str(), style_version);

        if let Some(record) = self.general.lookup(&cache_key) {
            tracing::info!(cache_key = %cache_key, "lecture: general cache hit");
            return record.payload;
        }
        tracing::info!(cache_key = %cache_key, "lecture: general cache miss");

        match self
            .generate_general(topic_name, topic_context, level, style_version)
            .await
        {
            Ok(Some(content)) => {
                let record = GeneralCacheRecord {
                    cache_key: cache_key.clone(),
                    topic_name: topic_name.to_string(),
                    normalized_topic: normalized,
                    level,
                    style_version: style_version.to_string(),
                    payload: content.clone(),
                    created_at: Utc::now(),
                };
                self.general.store(&cache_key, &record);
                content
            }
            Ok(None) => {
                tracing::warn!("lecture: generation failed validation twice, stub fallback");
                stub_lecture(topic_name, level, ContentSource::StubFallback)
            }
            Err(e) => {
                tracing::warn!("lecture: backend unreachable ({e}), stub fallback");
                stub_lecture(topic_name, level, ContentSource::StubFallback)
            }
        }
    }

    /// One generate/repair cycle for general content. `Ok(None)` means both
    /// attempts failed validation; the caller decides the fallback.
    async fn generate_general(
        &self,
        topic_name: &str,
        topic_context: &str,
        level: LectureLevel,
        style_version: &str,
    ) -> LecternResult<Option<GeneralLectureContent>> {
        let request = GenerationRequest {
            model: self.model.clone(),
            system_instruction: GENERAL_SYSTEM_INSTRUCTION.to_string(),
            parts: vec![PromptPart::Text(general_lecture_prompt(
                topic_name,
                topic_context,
                level,
                style_version,
            ))],
            temperature: 0.2,
            max_output_tokens: 8192,
            structured_json: true,
            kind: RequestKind::Lecture {
                topic_name: topic_name.to_string(),
                level,
            },
        };

        let build_repair = |raw: &str, errors: &[String]| lecture_repair_prompt(raw, errors);
        let spec = RepairRequest {
            primary: request,
            repair_system_instruction: LECTURE_REPAIR_SYSTEM_INSTRUCTION,
            build_repair_prompt: &build_repair,
        };
        let mut validate = validate_general_lecture;

        let outcome = run_json_with_repair(&self.backend, spec, &mut validate).await?;
        Ok(outcome.result.map(|mut content| {
            let total: usize = content
                .chunks
                .iter()
                .map(|c| c.narration.split_whitespace().count())
                .sum();
            let diagnostics = content.diagnostics.get_or_insert_with(Default::default);
            diagnostics.repaired = Some(outcome.repaired);
            diagnostics.total_word_count.get_or_insert(total);
            content
        }))
    }

    // -----------------------------------------------------------------------
    // Tie-ins
    // -----------------------------------------------------------------------

    /// Generate one course-specific tie-in per lecture chunk.
    ///
    /// Caching lives in the package flow (the tie-in key needs a course id);
    /// this is the raw generation cycle with a stub fallback.
    pub async fn generate_tie_ins(
        &self,
        course_name: &str,
        topic_name: &str,
        topic_context: &str,
        topic_ordering: &str,
        chunk_count: usize,
        tie_in_version: &str,
    ) -> Vec<String> {
        let request = GenerationRequest {
            model: self.model.clone(),
            system_instruction: TIE_IN_SYSTEM_INSTRUCTION.to_string(),
            parts: vec![PromptPart::Text(tie_in_prompt(
                course_name,
                topic_name,
                topic_context,
                topic_ordering,
                chunk_count,
                tie_in_version,
            ))],
            temperature: 0.2,
            max_output_tokens: 1024,
            structured_json: true,
            kind: RequestKind::TieIns {
                course_name: course_name.to_string(),
                topic_name: topic_name.to_string(),
                chunk_count,
            },
        };

        let build_repair =
            |raw: &str, errors: &[String]| tie_in_repair_prompt(raw, errors, chunk_count);
        let spec = RepairRequest {
            primary: request,
            repair_system_instruction: TIE_IN_REPAIR_SYSTEM_INSTRUCTION,
            build_repair_prompt: &build_repair,
        };
        let mut validate = |value: &Value| validate_tie_ins(value, chunk_count);

        match run_json_with_repair(&self.backend, spec, &mut validate).await {
            Ok(outcome) => outcome.result.unwrap_or_else(|| {
                tracing::warn!("tie-ins: generation failed validation twice, stub fallback");
                stub_tie_ins(course_name, topic_name, topic_ordering, chunk_count)
            }),
            Err(e) => {
                tracing::warn!("tie-ins: backend unreachable ({e}), stub fallback");
                stub_tie_ins(course_name, topic_name, topic_ordering, chunk_count)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Q&A
    // -----------------------------------------------------------------------

    /// Answer a learner question compactly. Lecture context (chunk titles)
    /// is pulled from the general tier when already generated.
    pub async fn answer_question(
        &self,
        course_name: &str,
        topic_name: &str,
        topic_context: &str,
        question: &str,
    ) -> LectureQuestionAnswer {
        let normalized = normalize_topic(topic_context);
        let cache_key =
            general_cache_key(&normalized, LectureLevel::Intro.as_str(), STYLE_VERSION);
        let chunk_titles: Vec<String> = self
            .general
            .lookup(&cache_key)
            .map(|record| {
                record
                    .payload
                    .chunks
                    .iter()
                    .map(|c| c.chunk_title.clone())
                    .collect()
            })
            .unwrap_or_default();

        let request = GenerationRequest {
            model: self.model.clone(),
            system_instruction: QUESTION_SYSTEM_INSTRUCTION.to_string(),
            parts: vec![PromptPart::Text(question_prompt(
                course_name,
                topic_name,
                topic_context,
                question,
                &chunk_titles,
                &[],
            ))],
            temperature: 0.2,
            max_output_tokens: 1024,
            structured_json: true,
            kind: RequestKind::Question {
                topic_name: topic_name.to_string(),
            },
        };

        let build_repair = |raw: &str, errors: &[String]| question_repair_prompt(raw, errors);
        let spec = RepairRequest {
            primary: request,
            repair_system_instruction: QUESTION_REPAIR_SYSTEM_INSTRUCTION,
            build_repair_prompt: &build_repair,
        };
        let mut validate = validate_answer;

        match run_json_with_repair(&self.backend, spec, &mut validate).await {
            Ok(outcome) => outcome.result.unwrap_or_else(|| {
                tracing::warn!("question: generation failed validation twice, stub fallback");
                stub_answer(topic_name, question)
            }),
            Err(e) => {
                tracing::warn!("question: backend unreachable ({e}), stub fallback");
                stub_answer(topic_name, question)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Visuals
    // -----------------------------------------------------------------------

    /// Generate grounded visuals for one transcript chunk.
    ///
    /// Anchors extracted from the chunk steer the prompt and bound the
    /// validator. A batch that cannot be grounded comes back as a
    /// `needs_clarification` payload — a first-class answer, not an error.
    pub async fn generate_visuals(
        &self,
        transcript_chunk: &str,
        code_snippets: &[String],
    ) -> VisualsResult {
        let transcript = transcript_chunk.trim().to_string();
        let snippets: Vec<String> = code_snippets
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let anchor_set = extract_visual_anchors(&transcript, &snippets);
        let anchors: Vec<String> = anchor_set
            .anchors
            .into_iter()
            .take(MAX_VISUAL_ANCHORS)
            .collect();
        let example_count = anchor_set.example_count.min(MAX_VISUAL_ANCHORS);
        let detection = detect_domains(&transcript, &snippets);

        let prompt_input = VisualsPromptInput {
            transcript_chunk: &transcript,
            code_snippets: &snippets,
            anchors: &anchors,
            example_count,
            selected_domains: &detection.selected,
        };

        let request = GenerationRequest {
            model: self.model.clone(),
            system_instruction: BASE_VISUAL_CONTRACT.to_string(),
            parts: vec![PromptPart::Text(visuals_prompt(&prompt_input))],
            temperature: 0.2,
            max_output_tokens: 2048,
            structured_json: true,
            kind: RequestKind::Visuals,
        };

        let build_repair =
            |raw: &str, errors: &[String]| visuals_repair_prompt(raw, &prompt_input, errors);
        let spec = RepairRequest {
            primary: request,
            repair_system_instruction: VISUALS_REPAIR_SYSTEM_INSTRUCTION,
            build_repair_prompt: &build_repair,
        };

        // Normalize (strip fabricated addresses) before judging; the typed
        // payload handed back reflects the normalized value.
        let mut validate = |value: &Value| {
            let mut normalized = value.clone();
            normalize_visual_output(&mut normalized, &transcript, &snippets);
            validate_visual_output(&normalized, &transcript, &anchors, example_count)
        };

        match run_json_with_repair(&self.backend, spec, &mut validate).await {
            Ok(outcome) => outcome.result.unwrap_or_else(|| {
                tracing::warn!("visuals: generation failed validation twice");
                VisualsResult::NeedsClarification(NeedsClarification::new(
                    "visual_generation_failed",
                    vec![
                        "Which specific example or mechanism should be visualized first?"
                            .to_string(),
                        "Are there any concrete values or code lines that must appear in a diagram?"
                            .to_string(),
                    ],
                ))
            }),
            Err(e) => {
                tracing::warn!("visuals: backend unreachable ({e})");
                VisualsResult::NeedsClarification(NeedsClarification::new(
                    "backend_unreachable",
                    vec!["Retry once the generation backend is reachable.".to_string()],
                ))
            }
        }
    }

    // -----------------------------------------------------------------------
    // Package assembly
    // -----------------------------------------------------------------------

    /// Build (or fetch) the fully assembled package for one
    /// (user, course, topic, level).
    ///
    /// Sequence: general cycle, tie-in cycle, then a concurrent visuals
    /// fan-out across chunks. Stale version stamps regenerate only the
    /// stale field; the narration is never invalidated by a visuals bump.
    pub async fn generate_lecture_package(
        &self,
        user_id: &str,
        topic: &TopicRef,
        level: LectureLevel,
    ) -> LecturePackage {
        let user_key = user_cache_key(user_id, &topic.course_id, &topic.topic_id, level.as_str());

        if let Some(record) = self.users.lookup(&user_key) {
            if record.visuals_version == VISUALS_VERSION
                && record.whiteboard_version == WHITEBOARD_VERSION
            {
                tracing::info!(user_key = %user_key, "lecture: user cache hit");
                return record.package;
            }
            tracing::info!(user_key = %user_key, "lecture: user cache stale, refreshing fields");
            return self.refresh_package(&user_key, record).await;
        }
        tracing::info!(user_key = %user_key, "lecture: user cache miss");

        let general = self
            .generate_lecture(&topic.topic_name, &topic.topic_context, level, STYLE_VERSION)
            .await;
        let (tie_in_key, tie_ins) = self.cached_tie_ins(topic, general.chunks.len()).await;

        let narrations: Vec<&str> = general.chunks.iter().map(|c| c.narration.as_str()).collect();
        let visuals = self.visuals_for_narrations(&narrations).await;

        let package = assemble_package(&topic.topic_id, level, &general, &tie_ins, visuals);

        let normalized = normalize_topic(&topic.topic_context);
        let record = UserCacheRecord {
            user_id: user_id.to_string(),
            course_id: topic.course_id.clone(),
            topic_id: topic.topic_id.clone(),
            level,
            general_cache_key: general_cache_key(&normalized, level.as_str(), STYLE_VERSION),
            tie_in_cache_key: tie_in_key,
            visuals_version: VISUALS_VERSION.to_string(),
            whiteboard_version: WHITEBOARD_VERSION.to_string(),
            package: package.clone(),
            updated_at: Utc::now(),
        };
        self.users.store(&user_key, &record);

        package
    }

    /// Tie-in tier check-then-generate-then-upsert. Returns the tie-in key
    /// alongside the sentences so the user record can reference it.
    async fn cached_tie_ins(&self, topic: &TopicRef, chunk_count: usize) -> (String, Vec<String>) {
        let normalized = normalize_topic(&topic.topic_context);
        let context_hash = topic_context_hash(&normalized);
        let cache_key = tie_in_cache_key(&topic.course_id, &context_hash, TIE_IN_VERSION);

        if let Some(record) = self.tie_ins.lookup(&cache_key) {
            tracing::info!(cache_key = %cache_key, "lecture: tie-in cache hit");
            return (cache_key, record.tie_ins);
        }
        tracing::info!(cache_key = %cache_key, "lecture: tie-in cache miss");

        let tie_ins = self
            .generate_tie_ins(
                &topic.course_name,
                &topic.topic_name,
                &topic.topic_context,
                &topic.topic_ordering,
                chunk_count,
                TIE_IN_VERSION,
            )
            .await;

        let record = TieInCacheRecord {
            cache_key: cache_key.clone(),
            course_id: topic.course_id.clone(),
            topic_id: topic.topic_id.clone(),
            topic_context_hash: context_hash,
            tie_in_version: TIE_IN_VERSION.to_string(),
            tie_ins: tie_ins.clone(),
            created_at: Utc::now(),
        };
        self.tie_ins.store(&cache_key, &record);

        (cache_key, tie_ins)
    }

    /// Concurrent visuals fan-out, one independent cycle per chunk.
    async fn visuals_for_narrations(&self, narrations: &[&str]) -> Vec<VisualsResult> {
        let futures = narrations
            .iter()
            .map(|narration| self.generate_visuals(narration, &[]));
        join_all(futures).await
    }

    /// Regenerate only the fields whose version stamps went stale.
    async fn refresh_package(&self, user_key: &str, mut record: UserCacheRecord) -> LecturePackage {
        if record.visuals_version != VISUALS_VERSION {
            tracing::info!("lecture: visuals stamp stale, regenerating visuals only");
            let narrations: Vec<&str> = record
                .package
                .chunks
                .iter()
                .map(|c| c.narration.as_str())
                .collect();
            let visuals = self.visuals_for_narrations(&narrations).await;
            record.package.visuals = Some(visuals);
            record.visuals_version = VISUALS_VERSION.to_string();
        }

        if record.whiteboard_version != WHITEBOARD_VERSION {
            tracing::info!("lecture: whiteboard stamp stale, refreshing board ops");
            if let Some(general) = self.general.lookup(&record.general_cache_key) {
                for (chunk, fresh) in record
                    .package
                    .chunks
                    .iter_mut()
                    .zip(general.payload.chunks)
                {
                    chunk.board_ops = fresh.board_ops;
                }
                record.package.confusion_mode.board_ops = general.payload.confusion_mode.board_ops;
            }
            record.whiteboard_version = WHITEBOARD_VERSION.to_string();
        }

        record.updated_at = Utc::now();
        self.users.store(user_key, &record);
        record.package
    }

    // -----------------------------------------------------------------------
    // Syllabus
    // -----------------------------------------------------------------------

    /// Parse an uploaded syllabus document. Falls back to heuristic
    /// extraction whenever the backend cannot produce a valid result.
    pub async fn parse_syllabus(&self, bytes: &[u8], mime_type: &str) -> Syllabus {
        parse_syllabus_from_bytes(&self.backend, &self.model, bytes, mime_type).await
    }
}

/// Zip general chunks with tie-ins and per-chunk visuals into the final
/// per-user package.
fn assemble_package(
    topic_id: &str,
    level: LectureLevel,
    general: &GeneralLectureContent,
    tie_ins: &[String],
    visuals: Vec<VisualsResult>,
) -> LecturePackage {
    let chunks = general
        .chunks
        .iter()
        .enumerate()
        .map(|(index, chunk)| PackageChunk {
            chunk_title: chunk.chunk_title.clone(),
            narration: chunk.narration.clone(),
            tie_in: tie_ins.get(index).cloned(),
            board_ops: chunk.board_ops.clone(),
        })
        .collect();

    LecturePackage {
        topic_id: topic_id.to_string(),
        level,
        chunks,
        confusion_mode: general.confusion_mode.clone(),
        visuals: Some(visuals),
        source: general.source,
    }
}
