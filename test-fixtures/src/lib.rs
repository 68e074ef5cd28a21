//! Shared fixtures for pipeline tests: sample transcripts and builders for
//! contract-valid (and deliberately broken) payloads.

use serde_json::{json, Value};

/// A transcript chunk with one example phrase, inline code, and a bracketed
/// sequence — three example-type anchors for the extractor to find.
pub fn sample_transcript() -> &'static str {
    "Pointers confuse people because the address and the value live in different places. \
     For example, suppose we declare `int arr[3] = {1, 2, 3};` and walk it with a pointer. \
     The array sits on the stack and each cell has its own address. \
     Watch out: a common mistake is assuming the pointer moves by one byte per step. \
     The sequence [1, 2, 3] stays put while the pointer does the walking."
}

/// Repeat filler words until the narration clears `words` exactly.
pub fn narration_of(words: usize) -> String {
    let mut narration = String::new();
    for index in 0..words {
        if index > 0 {
            narration.push(' ');
        }
        narration.push_str("word");
    }
    narration
}

/// A lecture payload with the requested shape. Valid when `chunks >= 8` and
/// `words_per_chunk >= 150` (clearing both the per-chunk and total floors).
pub fn lecture_value(chunks: usize, words_per_chunk: usize) -> Value {
    let chunk_values: Vec<Value> = (0..chunks)
        .map(|index| {
            json!({
                "chunkTitle": format!("Chunk {index}"),
                "narration": narration_of(words_per_chunk),
                "boardOps": [ { "op": "text", "x": 10.0, "y": 20.0, "text": "note" } ],
            })
        })
        .collect();

    json!({
        "chunks": chunk_values,
        "confusionMode": {
            "summary": "One core idea, restated plainly.",
            "boardOps": [ { "op": "text", "x": 10.0, "y": 20.0, "text": "idea" } ],
        },
    })
}

/// A minimal valid non-diagram visual anchored on `anchor_quote`.
pub fn table_visual(id: &str, anchor_quote: &str) -> Value {
    json!({
        "id": id,
        "type": "table",
        "anchor_quote": anchor_quote,
        "title": "Example",
        "caption": "Shows the example.",
        "content": { "headers": ["a"], "rows": [["1"]] },
    })
}

/// A memory-diagram visual with caller-supplied variables and arrows.
pub fn memory_diagram_visual(id: &str, anchor_quote: &str, content: Value) -> Value {
    json!({
        "id": id,
        "type": "memory_diagram",
        "anchor_quote": anchor_quote,
        "title": "Memory layout",
        "caption": "Shows the layout.",
        "content": content,
    })
}
