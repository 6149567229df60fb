//! Extraction and repair of schema.org JSON-LD proposed by an LLM.
//!
//! LLM audit responses mix prose sections with fenced JSON payloads. This
//! crate pulls the payloads out (`extract`), runs the JSON-LD graph
//! through an ordered set of repair transforms that record everything
//! they change (`repair`), and renders the repaired graph as prose for
//! embeddings (`flatten`). The `schema` module carries the node model and
//! the modeled subset of the schema.org vocabulary the repairs rely on.
//!
//! Extraction and repair are total: malformed payloads degrade to "not
//! found" or pass through unrepaired, they never abort a run.

pub mod extract;
pub mod flatten;
pub mod repair;
pub mod schema;

pub use extract::{ReportSections, extract_sections, find_jsonld, suggested_concepts};
pub use flatten::{BEST_PRACTICES, flatten_graph};
pub use repair::{Correction, run_pipeline};
