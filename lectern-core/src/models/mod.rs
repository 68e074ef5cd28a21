//! Shared data model for generated content, syllabi, and cache records.

pub mod cache_record;
pub mod lecture;
pub mod syllabus;
pub mod visual;

pub use cache_record::{GeneralCacheRecord, TieInCacheRecord, UserCacheRecord};
pub use lecture::{
    ConfusionMode, ContentSource, Diagnostics, GeneralLectureContent, LectureChunk, LectureLevel,
    LecturePackage, LectureQuestionAnswer, PackageChunk, WhiteboardOp,
};
pub use syllabus::{GradingComponent, ScheduleEntry, Syllabus, SyllabusPolicies};
pub use visual::{
    ClarificationBody, DiagramArrow, DiagramCell, DiagramVariable, NeedsClarification, VariableKind,
    Visual, VisualType, VisualsResult,
};
