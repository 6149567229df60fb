//! Extraction of structured payloads from raw LLM responses.

pub mod fence;
pub mod report;

pub use fence::{find_jsonld, suggested_concepts};
pub use report::{ReportSections, extract_sections};
