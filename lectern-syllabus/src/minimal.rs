//! The minimal syllabus shape the backend is asked for, and its validator.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A grading row as extracted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinimalGradingComponent {
    pub component: String,
    pub weight_percent: Option<f64>,
}

/// A schedule row as extracted. Dates stay strings here; normalization to
/// calendar dates happens during expansion to the full record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinimalScheduleEntry {
    pub date: Option<String>,
    pub title: String,
}

/// What the backend returns for a syllabus document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinimalSyllabus {
    pub course_code: Option<String>,
    pub course_title: Option<String>,
    #[serde(default)]
    pub grading_breakdown: Vec<MinimalGradingComponent>,
    #[serde(default)]
    pub schedule_entries: Vec<MinimalScheduleEntry>,
}

/// Validate a minimal syllabus payload.
///
/// Light checks on shape and inner item types; nulls are fine everywhere
/// the schema allows them.
pub fn validate_minimal_syllabus(value: &Value) -> Result<MinimalSyllabus, Vec<String>> {
    let mut errors = Vec::new();

    let Some(root) = value.as_object() else {
        return Err(vec!["output must be a JSON object".to_string()]);
    };

    match root.get("grading_breakdown") {
        Some(Value::Array(rows)) => {
            for (index, row) in rows.iter().enumerate() {
                let Some(obj) = row.as_object() else {
                    errors.push(format!("grading_breakdown {index} must be an object"));
                    continue;
                };
                if !obj.get("component").map_or(false, Value::is_string) {
                    errors.push(format!("grading_breakdown {index} component must be a string"));
                }
                match obj.get("weight_percent") {
                    None | Some(Value::Null) | Some(Value::Number(_)) => {}
                    Some(_) => errors.push(format!(
                        "grading_breakdown {index} weight_percent must be a number or null"
                    )),
                }
            }
        }
        _ => errors.push("grading_breakdown must be an array".to_string()),
    }

    match root.get("schedule_entries") {
        Some(Value::Array(rows)) => {
            for (index, row) in rows.iter().enumerate() {
                let Some(obj) = row.as_object() else {
                    errors.push(format!("schedule_entries {index} must be an object"));
                    continue;
                };
                if !obj.get("title").map_or(false, Value::is_string) {
                    errors.push(format!("schedule_entries {index} title must be a string"));
                }
                match obj.get("date") {
                    None | Some(Value::Null) | Some(Value::String(_)) => {}
                    Some(_) => errors.push(format!(
                        "schedule_entries {index} date must be a string or null"
                    )),
                }
            }
        }
        _ => errors.push("schedule_entries must be an array".to_string()),
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    serde_json::from_value::<MinimalSyllabus>(value.clone())
        .map_err(|e| vec![format!("minimal syllabus failed to deserialize: {e}")])
}
