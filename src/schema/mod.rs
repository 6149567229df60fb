//! Node model and the modeled schema.org subset.

pub mod node;
pub mod rules;

pub use node::{
    Node, find_by_type, has_type, is_blank, node_id, node_types, rewrap, to_nodes, type_label,
};
pub use rules::{META_KEYS, PropertyFix, allowed_properties, is_meta_key, property_fix};
