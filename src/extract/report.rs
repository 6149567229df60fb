//! Prose report sectioning.
//!
//! Audit responses open with three prose sections in a fixed order:
//! Page Intent, Visibility Diagnosis, Fix Plan. Headings vary run to run
//! (markdown hashes, numbering, bold, trailing colons), so each section
//! is cut out with a tolerant heading pattern rather than a fixed string.
//! The heading set is closed, so every pattern compiles once.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// The three prose sections of an audit response. Missing sections are
/// empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportSections {
    pub page_intent: String,
    pub visibility_diagnosis: String,
    pub fix_plan: String,
}

/// Cut the prose sections out of a raw response.
///
/// Fix Plan has no following prose heading, so it is taken up to the
/// JSON-LD heading when one exists and up to the first fence otherwise.
pub fn extract_sections(text: &str) -> ReportSections {
    ReportSections {
        page_intent: capture(page_intent_re(), text).unwrap_or_default(),
        visibility_diagnosis: capture(diagnosis_re(), text).unwrap_or_default(),
        fix_plan: capture(fix_plan_re(), text)
            .filter(|section| !section.is_empty())
            .or_else(|| capture(fix_plan_tail_re(), text))
            .unwrap_or_default(),
    }
}

// Heading pattern: optional markdown hashes, optional "1)" numbering,
// optional bold marks, then the label and any colon/whitespace tail.
fn heading(label: &str) -> String {
    format!(r"(?:#{{1,4}}\s*)?(?:\d+\)\s*)?(?:\*\*)?{label}(?:\*\*)?[\s:*]*")
}

// Section body between two headings.
fn between(start: &str, end: &str) -> Regex {
    Regex::new(&format!("(?si){}(.+?){}", heading(start), heading(end))).unwrap()
}

// Section body from a heading up to the first code fence or end of input.
fn after(start: &str) -> Regex {
    Regex::new(&format!("(?si){}(.+?)(?:```|\\z)", heading(start))).unwrap()
}

fn page_intent_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| between("Page Intent", "Visibility Diagnosis"))
}

fn diagnosis_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| between("Visibility Diagnosis", "Fix Plan"))
}

fn fix_plan_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| between("Fix Plan", "JSON-LD"))
}

fn fix_plan_tail_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| after("Fix Plan"))
}

/// First capture of `re` in `text`, trimmed. None when the section is
/// absent.
fn capture(re: &Regex, text: &str) -> Option<String> {
    let caps = re.captures(text)?;
    Some(caps[1].trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_headings() {
        let text = "Page Intent: attract local clients.\nVisibility Diagnosis: weak markup.\nFix Plan: add a WebSite node.\nJSON-LD:\n```json\n{}\n```";
        let sections = extract_sections(text);
        assert_eq!(sections.page_intent, "attract local clients.");
        assert_eq!(sections.visibility_diagnosis, "weak markup.");
        assert_eq!(sections.fix_plan, "add a WebSite node.");
    }

    #[test]
    fn markdown_and_numbered_headings() {
        let text = concat!(
            "## 1) Page Intent\nConvert visitors.\n\n",
            "### 2) **Visibility Diagnosis**\nNo structured data.\n\n",
            "#### 3) Fix Plan:\nAdd structured data markup.\n\n",
            "**JSON-LD**\n```json\n{}\n```",
        );
        let sections = extract_sections(text);
        assert_eq!(sections.page_intent, "Convert visitors.");
        assert_eq!(sections.visibility_diagnosis, "No structured data.");
        assert_eq!(sections.fix_plan, "Add structured data markup.");
    }

    #[test]
    fn fix_plan_without_json_ld_heading_stops_at_fence() {
        let text = "Fix Plan: tighten titles.\n```json\n[\"x\"]\n```";
        let sections = extract_sections(text);
        assert_eq!(sections.fix_plan, "tighten titles.");
        assert_eq!(sections.page_intent, "");
    }

    #[test]
    fn fix_plan_at_end_of_text() {
        let sections = extract_sections("Fix Plan: just publish more.");
        assert_eq!(sections.fix_plan, "just publish more.");
    }

    #[test]
    fn missing_headings_yield_empty_sections() {
        let sections = extract_sections("free-form rambling with no structure");
        assert_eq!(sections, ReportSections::default());
    }

    #[test]
    fn extraction_is_stable_across_calls() {
        let text = "Page Intent: grow signups.\nVisibility Diagnosis: thin content.\nFix Plan: expand copy.";
        let first = extract_sections(text);
        let second = extract_sections(text);
        assert_eq!(first, second);
        assert_eq!(second.fix_plan, "expand copy.");
    }
}
