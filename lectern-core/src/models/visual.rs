//! Transcript-grounded visual types.
//!
//! A visual's `anchor_quote` must be a verbatim substring of the transcript
//! chunk it illustrates; that contract is enforced by the visuals validator,
//! not here. `content` stays schemaless except for memory diagrams, whose
//! inner shape the validator needs to inspect.

use serde::{Deserialize, Serialize};

/// The six permitted visual types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualType {
    MemoryDiagram,
    Table,
    Flowchart,
    Timeline,
    Graph,
    CodeTrace,
}

impl VisualType {
    pub const ALL: [VisualType; 6] = [
        VisualType::MemoryDiagram,
        VisualType::Table,
        VisualType::Flowchart,
        VisualType::Timeline,
        VisualType::Graph,
        VisualType::CodeTrace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VisualType::MemoryDiagram => "memory_diagram",
            VisualType::Table => "table",
            VisualType::Flowchart => "flowchart",
            VisualType::Timeline => "timeline",
            VisualType::Graph => "graph",
            VisualType::CodeTrace => "code_trace",
        }
    }
}

/// One generated visual, tied to its transcript evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visual {
    pub id: String,
    #[serde(rename = "type")]
    pub visual_type: VisualType,
    pub anchor_quote: String,
    pub title: String,
    pub caption: String,
    /// Type-specific body. Table headers/rows, flowchart nodes, memory
    /// diagram variables — validated per type, stored as-is.
    #[serde(default)]
    pub content: serde_json::Value,
}

/// Variable kind inside a memory diagram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableKind {
    Array,
    Pointer,
    Scalar,
    #[serde(other)]
    #[default]
    Other,
}

/// One cell of an array variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramCell {
    #[serde(default)]
    pub index: Option<i64>,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// A variable drawn in a memory diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramVariable {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kind: VariableKind,
    #[serde(default)]
    pub cells: Vec<DiagramCell>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_to: Option<String>,
}

/// An arrow from a pointer variable to a target address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramArrow {
    #[serde(default)]
    pub from: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Body of a clarification request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClarificationBody {
    pub reason: String,
    pub questions: Vec<String>,
}

/// The alternate terminal variant: "I don't know how to visualize this."
/// A first-class response, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeedsClarification {
    pub needs_clarification: ClarificationBody,
}

impl NeedsClarification {
    pub fn new(reason: impl Into<String>, questions: Vec<String>) -> Self {
        Self {
            needs_clarification: ClarificationBody {
                reason: reason.into(),
                questions,
            },
        }
    }
}

/// What a visuals generation cycle produces for one transcript chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VisualsResult {
    Visuals(Vec<Visual>),
    NeedsClarification(NeedsClarification),
}

impl VisualsResult {
    pub fn is_clarification(&self) -> bool {
        matches!(self, VisualsResult::NeedsClarification(_))
    }
}
