//! Syllabus types: the full record the calling layer expects, and the
//! schedule entries both extraction paths produce.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Entry type assigned to everything the extractors produce.
pub const SCHEDULE_ENTRY_LESSON: &str = "lesson";

/// One dated (or undated) line of a course schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Normalized to a real calendar date when derivable, else `None`.
    pub date: Option<NaiveDate>,
    pub title: String,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub details: Option<String>,
}

/// A grade category and its weight, when explicitly stated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingComponent {
    pub component: String,
    pub weight_percent: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyllabusPolicies {
    pub late_work: Option<String>,
    pub attendance: Option<String>,
    pub academic_integrity: Option<String>,
}

/// The full syllabus shape handed back to the calling layer. Only the
/// minimal fields are ever extracted; everything else is a null/[] default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Syllabus {
    pub course_code: Option<String>,
    pub course_title: Option<String>,
    pub term: Option<String>,
    pub instructor_name: Option<String>,
    pub instructor_email: Option<String>,
    pub meeting_times: Option<String>,
    pub location: Option<String>,
    pub office_hours: Option<String>,
    pub description: Option<String>,
    pub grading_breakdown: Vec<GradingComponent>,
    pub major_assignments: Vec<String>,
    pub policies: SyllabusPolicies,
    pub schedule_entries: Vec<ScheduleEntry>,
}
