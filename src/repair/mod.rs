//! Graph repair pipeline.
//!
//! Transforms run in a fixed order over a flattened node list: structural
//! repairs first so later stages see the final shape, property validation
//! next, and the read-only reference check last so it sees everything the
//! earlier stages added. Every change is recorded as a `Correction`; the
//! pipeline never fails, it repairs what it can and reports what it did.

pub mod structure;
pub mod validate;

pub use structure::{ensure_website_node, fix_about_placement, normalize_logo, set_main_entity};
pub use validate::{validate_id_refs, validate_properties};

use crate::schema::{Node, rewrap, to_nodes};
use serde::Serialize;
use serde_json::Value;

/// One automated repair, in audit-trail form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Correction {
    /// Name of the transform that made the change.
    pub transform: String,
    /// `@id` of the affected node, or "?" when it has none.
    pub node_id: String,
    /// Human-readable description of the change.
    pub detail: String,
}

impl Correction {
    pub(crate) fn of(transform: &str, node_id: &str, detail: String) -> Self {
        Correction {
            transform: transform.to_string(),
            node_id: node_id.to_string(),
            detail,
        }
    }
}

/// A pipeline stage: repairs the node list in place and reports what it
/// changed. Stages that only inspect the graph share the signature.
pub type Transform = fn(&mut Vec<Node>) -> Vec<Correction>;

/// Stages in execution order.
pub const TRANSFORMS: [Transform; 6] = [
    normalize_logo,
    ensure_website_node,
    fix_about_placement,
    set_main_entity,
    validate_properties,
    validate_id_refs,
];

/// Run every transform over a JSON-LD document.
///
/// The input is left untouched; the repaired document comes back in the
/// same container shape, along with all corrections in stage order.
pub fn run_pipeline(document: &Value) -> (Value, Vec<Correction>) {
    let mut graph = to_nodes(document);
    let mut corrections = Vec::new();
    for transform in TRANSFORMS {
        corrections.extend(transform(&mut graph));
    }
    (rewrap(graph, document), corrections)
}
