//! JSON-LD node and graph helpers.
//!
//! A node is a plain JSON object map. Graphs arrive in three container
//! shapes, all normalized to a flat node list:
//!
//! [ {...}, {...} ]                      // bare list of nodes
//! { "@context": ..., "@graph": [...] }  // envelope with @graph
//! { "@type": "WebPage", ... }           // single bare node
//!
//! `to_nodes` flattens any of these; `rewrap` restores the original
//! container kind so callers get back the shape they passed in.

use serde_json::{Map, Value};

/// One JSON-LD node: a JSON object map.
pub type Node = Map<String, Value>;

/// Type names on a node, as a list.
///
/// `@type` may be a single string or a list of strings; non-string
/// entries are ignored. Missing `@type` yields an empty list.
pub fn node_types(node: &Node) -> Vec<&str> {
    match node.get("@type") {
        Some(Value::String(t)) => vec![t.as_str()],
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

/// True if any of the node's types is in `names`.
pub fn has_type(node: &Node, names: &[&str]) -> bool {
    node_types(node).iter().any(|t| names.contains(t))
}

/// All type names joined for display, e.g. "Organization, LocalBusiness".
pub fn type_label(node: &Node) -> String {
    node_types(node).join(", ")
}

/// The node's `@id` if it is a string.
pub fn node_id(node: &Node) -> Option<&str> {
    node.get("@id").and_then(Value::as_str)
}

/// Indexes of all nodes whose type matches any of `names`, in graph order.
///
/// Indexes rather than references so callers can mutate one node while
/// holding positions of others.
pub fn find_by_type(graph: &[Node], names: &[&str]) -> Vec<usize> {
    graph
        .iter()
        .enumerate()
        .filter(|(_, node)| has_type(node, names))
        .map(|(i, _)| i)
        .collect()
}

/// True for values that count as absent: null, empty string, empty
/// list, empty object, false.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Number(_) => false,
    }
}

/// Flatten any accepted container shape into a node list.
///
/// Non-object graph members are dropped. A scalar document, or an
/// envelope whose `@graph` is not a list, yields an empty graph.
pub fn to_nodes(document: &Value) -> Vec<Node> {
    match document {
        Value::Array(items) => object_members(items),
        Value::Object(map) => match map.get("@graph") {
            Some(Value::Array(items)) => object_members(items),
            Some(_) => Vec::new(),
            None => vec![map.clone()],
        },
        _ => Vec::new(),
    }
}

fn object_members(items: &[Value]) -> Vec<Node> {
    items
        .iter()
        .filter_map(|item| item.as_object().cloned())
        .collect()
}

/// Wrap a node list back into the container kind of `original`.
///
/// Envelopes keep their sibling keys (`@context` and friends) and get a
/// fresh `@graph`; lists stay lists; a single node stays a bare object.
/// Anything else becomes a minimal `{"@graph": [...]}` envelope.
pub fn rewrap(nodes: Vec<Node>, original: &Value) -> Value {
    if let Value::Object(envelope) = original {
        if envelope.contains_key("@graph") {
            let mut out = envelope.clone();
            out.insert("@graph".to_string(), node_array(nodes));
            return Value::Object(out);
        }
    }
    if original.is_array() {
        return node_array(nodes);
    }
    let mut nodes = nodes;
    if nodes.len() == 1 {
        return Value::Object(nodes.remove(0));
    }
    let mut envelope = Map::new();
    envelope.insert("@graph".to_string(), node_array(nodes));
    Value::Object(envelope)
}

fn node_array(nodes: Vec<Node>) -> Value {
    Value::Array(nodes.into_iter().map(Value::Object).collect())
}
