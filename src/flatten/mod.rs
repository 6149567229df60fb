//! Flatten a JSON-LD graph into natural-language prose for embeddings
//! and vector search. No JSON syntax in the output, just sentences.
//!
//! Sentence templates are fixed per type bucket and nodes are visited in
//! graph order, so the same graph always flattens to the same text.

use crate::schema::{Node, has_type, to_nodes, type_label};
use serde_json::Value;

const ORG_TYPES: &[&str] = &[
    "Organization",
    "ProfessionalService",
    "Corporation",
    "LocalBusiness",
];

const PAGE_TYPES: &[&str] = &[
    "WebPage",
    "ServicePage",
    "AboutPage",
    "ContactPage",
    "CollectionPage",
    "ItemPage",
    "FAQPage",
];

const SERVICE_TYPES: &[&str] = &["Service", "FinancialService"];

const ARTICLE_TYPES: &[&str] = &["BlogPosting", "Article", "NewsArticle"];

/// Guidance shipped alongside every audit report.
pub const BEST_PRACTICES: &str = r#"Implementation Best Practices:

1. JSON-LD Markup (for crawlers): Place the full JSON-LD in a <script type="application/ld+json"> tag inside <head>. This is what Google, Bing, and other search engines read for rich results and knowledge graph entries.

2. Flattened Text (for vector search): Use the natural-language version of your structured data for embeddings and semantic retrieval (RAG pipelines, vector databases). This version contains the same information but in a format that embedding models understand well — no JSON syntax, just descriptive sentences.

3. Keep Both in Sync: When you update your JSON-LD schema, regenerate the flattened text. They should always represent the same underlying data.

4. Avoid Duplicate Content: The flattened text can supplement your meta description or be placed in a semantically relevant location on the page, but do not create visible duplicate content blocks that would confuse users or trigger duplicate content issues."#;

/// Render a JSON-LD document as prose.
///
/// Buckets run in a fixed order: organizations, services, pages,
/// articles. A node with several types can appear in more than one
/// bucket. Graphs with nothing to say yield an empty string.
pub fn flatten_graph(document: &Value) -> String {
    let graph = to_nodes(document);
    let mut sentences: Vec<String> = Vec::new();

    for org in graph.iter().filter(|n| has_type(n, ORG_TYPES)) {
        let name = property_text(org, "name", "the organization");
        let url = property_text(org, "url", "");
        let description = property_text(org, "description", "");
        let mut s = format!("{name} is a {}", type_label(org));
        if !url.is_empty() {
            s.push_str(&format!(" located at {url}"));
        }
        if !description.is_empty() {
            s.push_str(&format!(". {description}"));
        }
        let area = property_text(org, "areaServed", "");
        if !area.is_empty() {
            s.push_str(&format!(". They serve {area}"));
        }
        sentences.push(end_sentence(s));

        let labels = about_labels(org);
        if !labels.is_empty() {
            sentences.push(format!("{name} relates to {}.", labels.join(", ")));
        }
    }

    for service in graph.iter().filter(|n| has_type(n, SERVICE_TYPES)) {
        let name = property_text(service, "name", "a service");
        let description = property_text(service, "description", "");
        let url = property_text(service, "url", "");
        let mut s = format!("They provide {name}");
        if !description.is_empty() {
            s.push_str(&format!(": {description}"));
        }
        if !url.is_empty() {
            s.push_str(&format!(" The service is available at {url}."));
        }
        sentences.push(end_sentence(s));

        if let Some(Value::Object(catalog)) = service.get("hasOfferCatalog") {
            let names = offer_names(catalog);
            if !names.is_empty() {
                sentences.push(format!("Service offerings include {}.", names.join(", ")));
            }
        }
    }

    for page in graph.iter().filter(|n| has_type(n, PAGE_TYPES)) {
        let name = property_text(page, "name", "");
        let url = property_text(page, "url", "");
        if !name.is_empty() && !url.is_empty() {
            sentences.push(format!("This page ({url}) covers {name}."));
        } else if !url.is_empty() {
            sentences.push(format!("This page is at {url}."));
        }

        let labels = about_labels(page);
        if !labels.is_empty() {
            sentences.push(format!("Key topics: {}.", labels.join(", ")));
        }
    }

    for post in graph.iter().filter(|n| has_type(n, ARTICLE_TYPES)) {
        let mut title = property_text(post, "headline", "");
        if title.is_empty() {
            title = property_text(post, "name", "");
        }
        if title.is_empty() {
            continue;
        }
        let author = property_text(post, "author", "");
        let mut s = format!("Article: {title}");
        if !author.is_empty() {
            s.push_str(&format!(" by {author}"));
        }
        sentences.push(s + ".");
    }

    sentences.join(" ")
}

/// Human-readable text for a property: objects collapse to their name,
/// url, or @id; lists join their members with commas; scalars print
/// as-is. `default` covers missing or empty values.
fn property_text(node: &Node, key: &str, default: &str) -> String {
    let Some(value) = node.get(key) else {
        return default.to_string();
    };
    match value {
        Value::Object(map) => {
            object_label(map, &["name", "url", "@id"]).unwrap_or_else(|| value.to_string())
        }
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Object(map) => {
                    Some(object_label(map, &["name", "@id"]).unwrap_or_else(|| item.to_string()))
                }
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(", "),
        Value::String(s) if !s.is_empty() => s.clone(),
        Value::Null | Value::String(_) => default.to_string(),
        other => other.to_string(),
    }
}

fn object_label(map: &Node, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        map.get(*key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

/// Concept names from an `about` value, skipping unnamed entries.
fn about_labels(node: &Node) -> Vec<String> {
    let entries: Vec<&Value> = match node.get("about") {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(single) => vec![single],
        None => Vec::new(),
    };
    let mut labels = Vec::new();
    for entry in entries {
        match entry {
            Value::Object(map) => {
                if let Some(name) = map.get("name").and_then(Value::as_str) {
                    if !name.is_empty() {
                        labels.push(name.to_string());
                    }
                }
            }
            Value::String(s) => labels.push(s.clone()),
            _ => {}
        }
    }
    labels
}

/// Named entries of an offer catalog's itemListElement.
fn offer_names(catalog: &Node) -> Vec<String> {
    let Some(Value::Array(offers)) = catalog.get("itemListElement") else {
        return Vec::new();
    };
    offers
        .iter()
        .filter_map(Value::as_object)
        .map(|offer| property_text(offer, "name", ""))
        .filter(|name| !name.is_empty())
        .collect()
}

fn end_sentence(s: String) -> String {
    format!("{}.", s.trim_end_matches('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn organization_sentence_collects_url_description_and_area() {
        let document = json!([{
            "@type": "ProfessionalService",
            "name": "Acme Accounting",
            "url": "https://acme.test",
            "description": "Tax and bookkeeping for small firms",
            "areaServed": ["Denver", "Boulder"],
        }]);
        assert_eq!(
            flatten_graph(&document),
            "Acme Accounting is a ProfessionalService located at https://acme.test. \
             Tax and bookkeeping for small firms. They serve Denver, Boulder."
        );
    }

    #[test]
    fn org_about_becomes_relates_to() {
        let document = json!([{
            "@type": "Organization",
            "name": "Acme",
            "about": [{"name": "compliance"}, "payroll", {"noName": true}],
        }]);
        assert_eq!(
            flatten_graph(&document),
            "Acme is a Organization. Acme relates to compliance, payroll."
        );
    }

    #[test]
    fn service_with_catalog_lists_named_offers() {
        let document = json!([{
            "@type": "Service",
            "name": "Advisory",
            "description": "Quarterly planning",
            "url": "https://acme.test/advisory",
            "hasOfferCatalog": {
                "@type": "OfferCatalog",
                "itemListElement": [
                    {"@type": "Offer", "name": "Starter"},
                    {"@type": "Offer"},
                    {"@type": "Offer", "name": "Growth"},
                ],
            },
        }]);
        assert_eq!(
            flatten_graph(&document),
            "They provide Advisory: Quarterly planning The service is available at \
             https://acme.test/advisory. Service offerings include Starter, Growth."
        );
    }

    #[test]
    fn page_sentences_depend_on_url() {
        let document = json!([
            {"@type": "WebPage", "name": "Services", "url": "https://acme.test/services"},
            {"@type": "FAQPage", "url": "https://acme.test/faq"},
            {"@type": "AboutPage", "name": "unnamed url, no sentence"},
        ]);
        assert_eq!(
            flatten_graph(&document),
            "This page (https://acme.test/services) covers Services. This page is at https://acme.test/faq."
        );
    }

    #[test]
    fn page_topics_come_from_about() {
        let document = json!([
            {"@type": "WebPage", "url": "https://acme.test/", "about": [{"name": "tax"}, {"name": "audit"}]},
        ]);
        assert_eq!(
            flatten_graph(&document),
            "This page is at https://acme.test/. Key topics: tax, audit."
        );
    }

    #[test]
    fn article_prefers_headline_over_name() {
        let document = json!([
            {"@type": "BlogPosting", "headline": "Year-end checklist", "name": "ignored", "author": {"@type": "Person", "name": "J. Smith"}},
            {"@type": "Article"},
        ]);
        assert_eq!(
            flatten_graph(&document),
            "Article: Year-end checklist by J. Smith."
        );
    }

    #[test]
    fn multi_type_nodes_join_every_matching_bucket() {
        let document = json!([{
            "@type": ["Organization", "LocalBusiness"],
            "name": "Acme",
            "url": "https://acme.test",
        }]);
        // One org bucket pass only, but the full type list in the sentence.
        assert_eq!(
            flatten_graph(&document),
            "Acme is a Organization, LocalBusiness located at https://acme.test."
        );
    }

    #[test]
    fn object_values_collapse_to_their_label() {
        let document = json!([{
            "@type": "Organization",
            "name": "Acme",
            "areaServed": {"@type": "State", "name": "Colorado"},
        }]);
        assert_eq!(flatten_graph(&document), "Acme is a Organization. They serve Colorado.");
    }

    #[test]
    fn empty_graphs_flatten_to_nothing() {
        assert_eq!(flatten_graph(&json!([])), "");
        assert_eq!(flatten_graph(&json!([{"@type": "Thing", "name": "x"}])), "");
    }

    #[test]
    fn same_graph_same_prose() {
        let document = json!({
            "@graph": [
                {"@type": "Organization", "name": "Acme", "url": "https://acme.test"},
                {"@type": "Service", "name": "Advisory"},
                {"@type": "WebPage", "name": "Home", "url": "https://acme.test/"},
            ],
        });
        let first = flatten_graph(&document);
        assert_eq!(first, flatten_graph(&document));
        assert_eq!(
            first,
            "Acme is a Organization located at https://acme.test. They provide Advisory. This page (https://acme.test/) covers Home."
        );
    }
}
