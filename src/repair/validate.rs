//! Property validation against the modeled schema.org subset, and the
//! advisory dangling-reference check.

use crate::repair::Correction;
use crate::schema::rules::{PropertyFix, allowed_properties, is_meta_key, property_fix};
use crate::schema::{Node, node_id, type_label};
use serde_json::Value;
use std::collections::BTreeSet;

/// Drop or rename properties that are invalid for a node's types.
///
/// Nodes whose types are all unknown are skipped entirely. For nodes with
/// several known types a property survives if any of them allows it.
/// Known-bad pairs from the fix table are handled first so they report
/// their specific reason, and each property is corrected at most once.
pub fn validate_properties(graph: &mut Vec<Node>) -> Vec<Correction> {
    let mut corrections = Vec::new();
    for node in graph.iter_mut() {
        let types: Vec<String> = node_types_owned(node);
        let known: Vec<&str> = types
            .iter()
            .map(String::as_str)
            .filter(|t| allowed_properties(t).is_some())
            .collect();
        if known.is_empty() {
            continue;
        }
        let label = type_label(node);
        let id = node_id(node).unwrap_or("?").to_string();

        for ty in &known {
            let keys: Vec<String> = node.keys().cloned().collect();
            for key in keys {
                match property_fix(ty, &key) {
                    Some(PropertyFix::Remove) => {
                        if node.remove(&key).is_some() {
                            corrections.push(Correction::of(
                                "validate_properties",
                                &id,
                                format!("Removed invalid property '{key}' (not valid on {ty})"),
                            ));
                        }
                    }
                    Some(PropertyFix::Rename(replacement)) => {
                        if let Some(value) = node.remove(&key) {
                            node.entry(replacement.to_string()).or_insert(value);
                            corrections.push(Correction::of(
                                "validate_properties",
                                &id,
                                format!("Renamed property '{key}' to '{replacement}' on {ty}"),
                            ));
                        }
                    }
                    None => {}
                }
            }
        }

        let allowed: BTreeSet<&str> = known
            .iter()
            .flat_map(|t| allowed_properties(t))
            .flatten()
            .copied()
            .collect();
        let extra: Vec<String> = node
            .keys()
            .filter(|key| !is_meta_key(key) && !allowed.contains(key.as_str()))
            .cloned()
            .collect();
        for key in extra {
            node.remove(&key);
            corrections.push(Correction::of(
                "validate_properties",
                &id,
                format!("Removed property '{key}' not valid for type(s) {label} (not in schema.org spec)"),
            ));
        }
    }
    corrections
}

fn node_types_owned(node: &Node) -> Vec<String> {
    crate::schema::node_types(node)
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Report `{"@id": ...}` stubs that point at no node in the graph.
///
/// Never mutates; it shares the transform signature so it can sit in the
/// stage table. Paths in the detail read like "page-id.about[0]".
pub fn validate_id_refs(graph: &mut Vec<Node>) -> Vec<Correction> {
    let mut corrections = Vec::new();
    let defined: BTreeSet<&str> = graph
        .iter()
        .filter_map(node_id)
        .filter(|id| !id.is_empty())
        .collect();

    for node in graph.iter() {
        let path = node_id(node).unwrap_or("root");
        check_object(node, path, &defined, &mut corrections);
    }
    corrections
}

fn check_object(
    object: &Node,
    path: &str,
    defined: &BTreeSet<&str>,
    corrections: &mut Vec<Correction>,
) {
    // A single-key {"@id": ...} object is a reference stub.
    if object.len() == 1 {
        if let Some(reference) = object.get("@id") {
            let target = match reference.as_str() {
                Some(s) => s.to_string(),
                None => reference.to_string(),
            };
            if !defined.contains(target.as_str()) {
                corrections.push(Correction::of(
                    "validate_id_refs",
                    "?",
                    format!("Dangling @id reference: {target} (at {path})"),
                ));
            }
        }
    }
    for (key, value) in object {
        check_value(value, &format!("{path}.{key}"), defined, corrections);
    }
}

fn check_value(
    value: &Value,
    path: &str,
    defined: &BTreeSet<&str>,
    corrections: &mut Vec<Correction>,
) {
    match value {
        Value::Object(object) => check_object(object, path, defined, corrections),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                check_value(item, &format!("{path}[{i}]"), defined, corrections);
            }
        }
        _ => {}
    }
}
