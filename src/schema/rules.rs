//! Modeled subset of the schema.org vocabulary.
//!
//! Each supported type gets a flat allow-list of properties, inherited
//! entries already folded in (Organization carries the Thing set,
//! LocalBusiness carries the Organization set, and so on). Types outside
//! this table are unknown and never validated.
//!
//! A second table names properties that are outright wrong on a type and
//! how to fix them, keyed (type, property). Today every entry is a
//! removal; renames are supported so a wrong-but-salvageable property can
//! be mapped to its correct name without touching the callers.

/// JSON-LD structural keys, always kept regardless of type.
pub const META_KEYS: &[&str] = &[
    "@context",
    "@type",
    "@id",
    "@graph",
    "@vocab",
    "@reverse",
    "@language",
];

const THING: &[&str] = &["name", "description", "url", "sameAs", "image", "identifier"];

const ORGANIZATION: &[&str] = &[
    "name",
    "description",
    "url",
    "sameAs",
    "image",
    "identifier",
    "logo",
    "address",
    "telephone",
    "email",
    "areaServed",
    "parentOrganization",
];

const LOCAL_BUSINESS: &[&str] = &[
    "name",
    "description",
    "url",
    "sameAs",
    "image",
    "identifier",
    "logo",
    "address",
    "telephone",
    "email",
    "areaServed",
    "parentOrganization",
    "geo",
    "priceRange",
    "openingHours",
];

const SERVICE: &[&str] = &[
    "name",
    "description",
    "url",
    "sameAs",
    "image",
    "identifier",
    "provider",
    "serviceType",
    "areaServed",
    "offers",
    "category",
    "hasOfferCatalog",
];

const WEB_SITE: &[&str] = &[
    "name",
    "description",
    "url",
    "sameAs",
    "image",
    "identifier",
    "publisher",
    "inLanguage",
];

const WEB_PAGE: &[&str] = &[
    "name",
    "description",
    "url",
    "sameAs",
    "image",
    "identifier",
    "isPartOf",
    "mainEntity",
    "about",
    "breadcrumb",
    "datePublished",
    "dateModified",
];

const IMAGE_OBJECT: &[&str] = &[
    "name",
    "description",
    "url",
    "sameAs",
    "image",
    "identifier",
    "caption",
    "contentUrl",
    "width",
    "height",
];

/// Allowed properties for a modeled type, or None for unknown types.
///
/// The table covers exactly: Thing, Organization, LocalBusiness,
/// ProfessionalService, Service, WebSite, WebPage, ImageObject. Subtypes
/// the other components recognize (page subtypes, Corporation,
/// FinancialService) are deliberately absent: nodes typed only with those
/// pass validation untouched.
pub fn allowed_properties(type_name: &str) -> Option<&'static [&'static str]> {
    let props = match type_name {
        "Thing" => THING,
        "Organization" => ORGANIZATION,
        "LocalBusiness" | "ProfessionalService" => LOCAL_BUSINESS,
        "Service" => SERVICE,
        "WebSite" => WEB_SITE,
        "WebPage" => WEB_PAGE,
        "ImageObject" => IMAGE_OBJECT,
        _ => return None,
    };
    Some(props)
}

/// What to do with a known-bad (type, property) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyFix {
    Remove,
    Rename(&'static str),
}

/// (type, property, replacement). A None replacement means removal.
const PROPERTY_FIXES: &[(&str, &str, Option<&str>)] = &[
    ("Organization", "provider", None),
    ("LocalBusiness", "provider", None),
    ("ProfessionalService", "provider", None),
    ("Service", "about", None),
];

/// Fix for a property that is wrong on this type, if one is known.
pub fn property_fix(type_name: &str, property: &str) -> Option<PropertyFix> {
    PROPERTY_FIXES
        .iter()
        .find(|(t, p, _)| *t == type_name && *p == property)
        .map(|(_, _, replacement)| match replacement {
            Some(name) => PropertyFix::Rename(name),
            None => PropertyFix::Remove,
        })
}

pub fn is_meta_key(key: &str) -> bool {
    META_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn known_types_have_allow_lists() {
        assert!(allowed_properties("WebPage").is_some_and(|p| p.contains(&"mainEntity")));
        assert!(allowed_properties("Service").is_some_and(|p| p.contains(&"hasOfferCatalog")));
        assert!(allowed_properties("WebSite").is_some_and(|p| p.contains(&"publisher")));
        assert_eq!(
            allowed_properties("ProfessionalService"),
            allowed_properties("LocalBusiness")
        );
    }

    #[test]
    fn unmodeled_types_stay_unknown() {
        assert_eq!(allowed_properties("Person"), None);
        // Recognized elsewhere in the pipeline, but not validated.
        assert_eq!(allowed_properties("ServicePage"), None);
        assert_eq!(allowed_properties("FinancialService"), None);
        assert_eq!(allowed_properties("Corporation"), None);
    }

    #[test]
    fn inheritance_is_folded_flat() {
        let org = allowed_properties("Organization").unwrap();
        for prop in THING {
            assert!(org.contains(prop), "Organization missing Thing prop {prop}");
        }
        let lb = allowed_properties("LocalBusiness").unwrap();
        for prop in org {
            assert!(lb.contains(prop), "LocalBusiness missing Organization prop {prop}");
        }
        // geo belongs to LocalBusiness, not plain Organization.
        assert!(!org.contains(&"geo"));
        assert!(lb.contains(&"geo"));
    }

    #[test]
    fn provider_and_service_about_are_known_bad() {
        assert_eq!(property_fix("Organization", "provider"), Some(PropertyFix::Remove));
        assert_eq!(property_fix("LocalBusiness", "provider"), Some(PropertyFix::Remove));
        assert_eq!(property_fix("ProfessionalService", "provider"), Some(PropertyFix::Remove));
        assert_eq!(property_fix("Service", "about"), Some(PropertyFix::Remove));
        assert_eq!(property_fix("Service", "provider"), None);
        assert_eq!(property_fix("WebPage", "about"), None);
    }

    #[test]
    fn meta_keys_are_recognized() {
        assert!(is_meta_key("@type"));
        assert!(is_meta_key("@context"));
        assert!(!is_meta_key("name"));
    }
}
