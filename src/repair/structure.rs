//! Structural transforms: logo shape, WebSite synthesis, `about`
//! placement, and mainEntity wiring.

use crate::repair::Correction;
use crate::schema::{Node, find_by_type, is_blank, node_id};
use serde_json::{Value, json};
use url::Url;

/// Organization-family types that anchor a site.
const ORG_TYPES: &[&str] = &["Organization", "ProfessionalService"];

/// Page-like types that get site-level links.
const PAGE_TYPES: &[&str] = &[
    "WebPage",
    "ServicePage",
    "AboutPage",
    "ContactPage",
    "CollectionPage",
];

/// Service-family types; `about` never belongs on these.
const SERVICE_TYPES: &[&str] = &["Service", "ProfessionalService", "FinancialService"];

/// Rewrite bare string `logo` values into ImageObject nodes.
pub fn normalize_logo(graph: &mut Vec<Node>) -> Vec<Correction> {
    let mut corrections = Vec::new();
    for node in graph.iter_mut() {
        let Some(Value::String(logo)) = node.get("logo") else {
            continue;
        };
        let logo = logo.clone();
        node.insert(
            "logo".to_string(),
            json!({"@type": "ImageObject", "url": logo.clone()}),
        );
        corrections.push(Correction::of(
            "normalize_logo",
            node_id(node).unwrap_or("?"),
            format!("Converted bare logo string to ImageObject: {logo}"),
        ));
    }
    corrections
}

/// Synthesize a WebSite node when the graph has none, and point every
/// page-like node's `isPartOf` at it.
///
/// The site base comes from the first organization with a usable URL,
/// falling back to the first page-like node. When no candidate parses as
/// an absolute URL the graph is left alone. If a WebSite already exists
/// nothing happens, existing page links included.
pub fn ensure_website_node(graph: &mut Vec<Node>) -> Vec<Correction> {
    let mut corrections = Vec::new();
    if !find_by_type(graph, &["WebSite"]).is_empty() {
        return corrections;
    }

    let pages = find_by_type(graph, PAGE_TYPES);

    let mut base = None;
    let mut org_id = None;
    for index in find_by_type(graph, ORG_TYPES) {
        if let Some(site) = site_base(&graph[index]) {
            org_id = node_id(&graph[index])
                .filter(|id| !id.is_empty())
                .map(str::to_string);
            base = Some(site);
            break;
        }
    }
    if base.is_none() {
        for &index in &pages {
            if let Some(site) = site_base(&graph[index]) {
                base = Some(site);
                break;
            }
        }
    }
    let Some((base_url, host)) = base else {
        return corrections;
    };

    let website_id = format!("{base_url}/#website");
    let mut website = Node::new();
    website.insert("@type".to_string(), Value::String("WebSite".to_string()));
    website.insert("@id".to_string(), Value::String(website_id.clone()));
    website.insert("url".to_string(), Value::String(base_url));
    website.insert("name".to_string(), Value::String(host));
    if let Some(org_id) = org_id {
        website.insert("publisher".to_string(), json!({"@id": org_id}));
    }
    graph.push(website);
    corrections.push(Correction::of(
        "ensure_website_node",
        "?",
        format!("Added missing WebSite node: {website_id}"),
    ));

    for index in pages {
        let page = &mut graph[index];
        let needs_link = match page.get("isPartOf") {
            None => true,
            Some(value) if is_blank(value) => true,
            Some(Value::Object(link)) => {
                link.get("@id").and_then(Value::as_str) != Some(website_id.as_str())
            }
            Some(_) => false,
        };
        if needs_link {
            page.insert("isPartOf".to_string(), json!({"@id": website_id.clone()}));
            corrections.push(Correction::of(
                "ensure_website_node",
                node_id(page).unwrap_or("?"),
                format!("Set WebPage.isPartOf to {website_id}"),
            ));
        }
    }
    corrections
}

/// Derive `scheme://host` and the bare host from a node's `url`, falling
/// back to its `@id`. Candidates that do not parse as absolute URLs with
/// a host are rejected.
fn site_base(node: &Node) -> Option<(String, String)> {
    let candidate = node
        .get("url")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .or_else(|| node_id(node).filter(|s| !s.is_empty()))?;
    let parsed = Url::parse(candidate).ok()?;
    let host = parsed.host_str()?;
    let authority = match parsed.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };
    Some((format!("{}://{}", parsed.scheme(), authority), authority))
}

/// Strip `about` from service-family nodes and collect the entries onto
/// the first page-like node.
///
/// A null `about` is dropped silently; anything else is recorded. Moved
/// entries merge after whatever the page already lists. With no page in
/// the graph the entries are removed and not re-homed.
pub fn fix_about_placement(graph: &mut Vec<Node>) -> Vec<Correction> {
    let mut corrections = Vec::new();
    let mut moved: Vec<Value> = Vec::new();

    for index in find_by_type(graph, SERVICE_TYPES) {
        let node = &mut graph[index];
        match node.remove("about") {
            None | Some(Value::Null) => {}
            Some(about) => {
                corrections.push(Correction::of(
                    "fix_about_placement",
                    node_id(node).unwrap_or("?"),
                    "Removed 'about' from Service node".to_string(),
                ));
                match about {
                    Value::Array(entries) => moved.extend(entries),
                    single => moved.push(single),
                }
            }
        }
    }

    if moved.is_empty() {
        return corrections;
    }
    let pages = find_by_type(graph, PAGE_TYPES);
    let Some(&index) = pages.first() else {
        return corrections;
    };

    let page = &mut graph[index];
    let mut merged = match page.get("about") {
        Some(Value::Array(entries)) => entries.clone(),
        Some(value) if !is_blank(value) => vec![value.clone()],
        _ => Vec::new(),
    };
    let count = moved.len();
    merged.append(&mut moved);
    page.insert("about".to_string(), Value::Array(merged));
    corrections.push(Correction::of(
        "fix_about_placement",
        node_id(page).unwrap_or("?"),
        format!("Moved {count} about entries to WebPage"),
    ));
    corrections
}

/// Point the first WebPage/ServicePage's `mainEntity` at the first
/// service-family node, provided that node carries a non-empty `@id`.
pub fn set_main_entity(graph: &mut Vec<Node>) -> Vec<Correction> {
    let mut corrections = Vec::new();
    let pages = find_by_type(graph, &["WebPage", "ServicePage"]);
    let services = find_by_type(graph, SERVICE_TYPES);
    let (Some(&page_index), Some(&service_index)) = (pages.first(), services.first()) else {
        return corrections;
    };
    let Some(service_id) = node_id(&graph[service_index])
        .filter(|id| !id.is_empty())
        .map(str::to_string)
    else {
        return corrections;
    };

    let page = &mut graph[page_index];
    let already_linked = matches!(
        page.get("mainEntity"),
        Some(Value::Object(link))
            if link.get("@id").and_then(Value::as_str) == Some(service_id.as_str())
    );
    if !already_linked {
        page.insert("mainEntity".to_string(), json!({"@id": service_id.clone()}));
        corrections.push(Correction::of(
            "set_main_entity",
            node_id(page).unwrap_or("?"),
            format!("Set WebPage.mainEntity to {service_id}"),
        ));
    }
    corrections
}
