//! The static tag registry.
//!
//! Tag metadata (void tags, required/recommended attributes, permitted
//! parents and children) lives in an embedded JSON document, parsed once on
//! first use. Keeping the rules as data means exercises can be reasoned
//! about without reading validator code.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;

/// Validation metadata for one HTML tag.
#[derive(Debug, Default, Deserialize)]
pub struct TagSpec {
    /// The closing tag is omitted entirely (e.g. `<meta>`, `<img>`).
    #[serde(default)]
    pub void_tag: bool,
    /// Attributes that must be present; their absence is an error.
    #[serde(default)]
    pub required_attributes: Vec<String>,
    /// Attributes that should be present; their absence is a warning.
    #[serde(default)]
    pub recommended_attributes: Vec<String>,
    /// When present, the direct parent must be one of these tags. An empty
    /// list means the tag may not have a parent at all (only `html`).
    #[serde(default)]
    pub permitted_parents: Option<Vec<String>>,
    /// When present, only these tags may appear as direct children.
    #[serde(default)]
    pub permitted_children: Option<Vec<String>>,
}

static REGISTRY: Lazy<HashMap<String, TagSpec>> = Lazy::new(|| {
    serde_json::from_str(include_str!("tags.json")).expect("embedded tag registry is valid JSON")
});

/// Look up the spec for a (lowercased) tag name. `None` means the tag is
/// unknown and therefore invalid.
pub fn tag_spec(tag: &str) -> Option<&'static TagSpec> {
    REGISTRY.get(tag)
}
