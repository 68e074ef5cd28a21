//! Prompts for minimal syllabus extraction.

pub const SYLLABUS_SYSTEM_INSTRUCTION: &str = "You are a parser that extracts minimal \
structured data from a university course syllabus. Only return the course code, course \
title, grading components with weights, and dated lesson titles according to the provided \
MinimalSyllabus schema.";

pub const SYLLABUS_REPAIR_SYSTEM_INSTRUCTION: &str = "You receive malformed JSON for a \
minimal syllabus. Repair it to match the MinimalSyllabus schema. Return JSON only.";

/// The minimal shape the backend is asked to produce. Everything else in the
/// full syllabus record is filled with null/[] defaults by the parser.
pub const MINIMAL_SYLLABUS_SCHEMA: &str = r#"
Type MinimalSyllabus = {
  course_code: string | null;
  course_title: string | null;
  grading_breakdown: {
    component: string;             // e.g. "Exams", "Projects", "Homework"
    weight_percent: number | null; // 0-100 when explicitly given
  }[];
  schedule_entries: {
    date: string | null;           // YYYY-MM-DD when possible, otherwise null
    title: string;                 // short lesson title, e.g. "Arrays and pointers"
  }[];
};

Rules:
- Extract only what is explicitly present in the syllabus.
- Missing fields are null; missing arrays are [].
- grading_breakdown: only clear grade categories; weight_percent null unless stated.
- schedule_entries: only lessons/lectures with specific dates; keep titles to one line.
- Do NOT include policies, long descriptions, or reading lists.
- Return ONLY one JSON object matching the MinimalSyllabus shape.
- No markdown, code fences, comments, or natural-language explanation.
"#;

pub fn syllabus_repair_prompt(raw: &str, errors: &[String]) -> String {
    let error_lines = errors
        .iter()
        .map(|e| format!("- {e}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "The JSON below does not match the MinimalSyllabus schema:\n{error_lines}\n\
         \n\
         Broken JSON:\n{raw}\n\
         \n\
         Schema:\n{schema}",
        error_lines = error_lines,
        raw = raw,
        schema = MINIMAL_SYLLABUS_SCHEMA,
    )
}
