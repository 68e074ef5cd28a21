//! Version stamps and structural floors shared across the pipeline.

/// Style version baked into general-tier cache keys. Bumping it retires every
/// cached general lecture; old entries stay behind as harmless orphans.
pub const STYLE_VERSION: &str = "v1";

/// Tie-in prompt version, part of the tie-in cache key.
pub const TIE_IN_VERSION: &str = "v1";

/// Visuals pipeline version stamped on user-tier records.
pub const VISUALS_VERSION: &str = "v1";

/// Whiteboard pipeline version stamped on user-tier records.
pub const WHITEBOARD_VERSION: &str = "v1";

/// Minimum chunk count for a general lecture.
pub const MIN_LECTURE_CHUNKS: usize = 8;

/// Minimum words of narration per chunk.
pub const MIN_CHUNK_WORDS: usize = 120;

/// Minimum words of narration summed across all chunks.
pub const MIN_TOTAL_WORDS: usize = 1_200;

/// A confusion-mode summary restates one idea. Anything past this word count
/// is treated as new material and rejected.
pub const MAX_CONFUSION_SUMMARY_WORDS: usize = 120;

/// Visual batch size bounds per transcript chunk.
pub const MIN_VISUALS_PER_CHUNK: usize = 2;
pub const MAX_VISUALS_PER_CHUNK: usize = 6;

/// Anchors handed to the visuals prompt and the coverage check.
pub const MAX_VISUAL_ANCHORS: usize = 6;

/// Caption length ceiling, in sentences.
pub const MAX_CAPTION_SENTENCES: usize = 2;

/// Board ops allowed on a Q&A answer.
pub const MAX_ANSWER_BOARD_OPS: usize = 3;

/// Hard cap on heuristic schedule extraction.
pub const MAX_SCHEDULE_ENTRIES: usize = 200;
