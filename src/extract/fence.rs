//! Fenced-payload extraction from raw LLM output.
//!
//! Model responses mix prose with ```json fences. We scan every fence,
//! parse leniently, and apply shape checks so that a JSON-LD payload or a
//! concept list is recognized wherever it appears in the response.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

// Capture:
// 1) fence body (anything up to the closing fence)
const JSON_BLOCK: &str = r"(?s)```json\s*\n(.*?)```";

// "Suggested Concepts" heading, tolerating markdown heading marks,
// numbering, bold markup, and a trailing colon in any arrangement.
// Capture:
// 1) the fenced JSON array right after the heading
const CONCEPT_HEADING: &str =
    r"(?si)(?:#{1,4}\s*)?(?:\d+\)\s*)?(?:\*\*)?Suggested[_ ]Concepts[\s:*]*```json\s*\n(\[.*?\])\s*```";

// Any fenced JSON array, for the heading-less fallback.
// Capture:
// 1) the array text including brackets
const ARRAY_BLOCK: &str = r"(?s)```json\s*\n(\[.*?\])\s*```";

fn json_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(JSON_BLOCK).unwrap())
}

fn concept_heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(CONCEPT_HEADING).unwrap())
}

fn array_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(ARRAY_BLOCK).unwrap())
}

/// First fenced JSON block that parses and looks like JSON-LD.
///
/// Blocks that fail to parse or fail the shape check are skipped, so a
/// response can carry other JSON payloads before the graph.
pub fn find_jsonld(text: &str) -> Option<Value> {
    for caps in json_block_re().captures_iter(text) {
        let Ok(value) = serde_json::from_str::<Value>(&caps[1]) else {
            continue;
        };
        if looks_like_jsonld(&value) {
            return Some(value);
        }
    }
    None
}

/// Shape check: an object with any JSON-LD marker key, or a list with at
/// least one typed object member.
fn looks_like_jsonld(value: &Value) -> bool {
    match value {
        Value::Object(map) => ["@context", "@graph", "@type"]
            .iter()
            .any(|key| map.contains_key(*key)),
        Value::Array(items) => items
            .iter()
            .any(|item| item.as_object().is_some_and(|node| node.contains_key("@type"))),
        _ => false,
    }
}

/// Concept names suggested by the model, as a list of strings.
///
/// Prefers the fenced array under a "Suggested Concepts" heading; when no
/// heading matches, falls back to the first fenced array whose members
/// are all strings. Returns an empty list when neither is found.
pub fn suggested_concepts(text: &str) -> Vec<String> {
    if let Some(caps) = concept_heading_re().captures(text) {
        if let Ok(names) = serde_json::from_str::<Vec<String>>(&caps[1]) {
            return names;
        }
    }
    for caps in array_block_re().captures_iter(text) {
        if let Ok(names) = serde_json::from_str::<Vec<String>>(&caps[1]) {
            return names;
        }
    }
    Vec::new()
}
