//! # Element Query API
//!
//! A thin wrapper over `scraper::ElementRef` that check predicates are
//! written against. The important property is totality: a query that
//! matches nothing yields an *empty* element on which every assertion
//! returns `false` instead of panicking, so a missing prerequisite shows up
//! as a failed check, never a crash.

use crate::css;
use crate::document::Document;
use regex::Regex;
use scraper::ElementRef;

/// A possibly-absent element of a parsed document.
///
/// `Copy` so predicates can capture it freely.
#[derive(Clone, Copy, Debug)]
pub struct Element<'a> {
    inner: Option<ElementRef<'a>>,
}

impl<'a> From<ElementRef<'a>> for Element<'a> {
    fn from(element: ElementRef<'a>) -> Self {
        Element {
            inner: Some(element),
        }
    }
}

impl<'a> Element<'a> {
    /// The element every failed query resolves to.
    pub fn empty() -> Self {
        Element { inner: None }
    }

    pub fn exists(&self) -> bool {
        self.inner.is_some()
    }

    pub fn tag_name(&self) -> Option<&'a str> {
        self.inner.map(|element| element.value().name())
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag_name() == Some(tag)
    }

    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.inner.and_then(|element| element.value().attr(name))
    }

    pub fn attribute_exists(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    pub fn attribute_contains(&self, name: &str, needle: &str) -> bool {
        self.attribute(name)
            .is_some_and(|value| value.contains(needle))
    }

    /// Whether the attribute value matches a regex. An unparsable pattern
    /// fails the assertion (and is logged) rather than panicking, since
    /// patterns come from exercise authors.
    pub fn attribute_matches(&self, name: &str, pattern: &str) -> bool {
        let Some(value) = self.attribute(name) else {
            return false;
        };
        match Regex::new(pattern) {
            Ok(regex) => regex.is_match(value),
            Err(error) => {
                log::warn!("invalid attribute pattern '{pattern}': {error}");
                false
            }
        }
    }

    /// All descendant text joined, un-normalised.
    pub fn text(&self) -> String {
        self.inner
            .map(|element| element.text().collect())
            .unwrap_or_default()
    }

    /// Text directly inside this element, excluding child elements' text.
    pub fn direct_text(&self) -> String {
        let Some(element) = self.inner else {
            return String::new();
        };
        element
            .children()
            .filter_map(|node| node.value().as_text())
            .map(|text| text.to_string())
            .collect()
    }

    /// Whether the element has any non-whitespace text content at all.
    pub fn has_content(&self) -> bool {
        self.exists() && !self.text().trim().is_empty()
    }

    /// Whitespace-normalised content comparison.
    pub fn content_matches(&self, expected: &str, case_insensitive: bool) -> bool {
        if !self.exists() {
            return false;
        }
        let actual = normalize_whitespace(&self.text());
        let expected = normalize_whitespace(expected);
        if case_insensitive {
            actual.to_lowercase() == expected.to_lowercase()
        } else {
            actual == expected
        }
    }

    /// True when no non-whitespace text sits directly between this
    /// element's children. Used for container tags (`<ul>`, `<table>`)
    /// where loose text is almost always a structural mistake.
    pub fn no_loose_text(&self) -> bool {
        self.exists() && self.direct_text().trim().is_empty()
    }

    pub fn has_parent(&self, tag: &str) -> bool {
        self.inner
            .and_then(|element| element.parent())
            .and_then(ElementRef::wrap)
            .is_some_and(|parent| parent.value().name() == tag)
    }

    /// First direct child with the given tag name, or the empty element.
    pub fn get_child(&self, tag: &str) -> Element<'a> {
        self.get_children(tag).into_iter().next().unwrap_or_default()
    }

    /// All direct children with the given tag name.
    pub fn get_children(&self, tag: &str) -> Vec<Element<'a>> {
        self.collect(tag, false, &[])
    }

    /// Direct children with the given tag name carrying all the given
    /// attribute values.
    pub fn get_children_with(&self, tag: &str, attributes: &[(&str, &str)]) -> Vec<Element<'a>> {
        self.collect(tag, false, attributes)
    }

    /// First descendant with the given tag name, in document order.
    pub fn get_descendant(&self, tag: &str) -> Element<'a> {
        self.get_descendants(tag)
            .into_iter()
            .next()
            .unwrap_or_default()
    }

    /// All descendants with the given tag name, in document order.
    pub fn get_descendants(&self, tag: &str) -> Vec<Element<'a>> {
        self.collect(tag, true, &[])
    }

    /// Descendants with the given tag name carrying all the given
    /// attribute values.
    pub fn get_descendants_with(&self, tag: &str, attributes: &[(&str, &str)]) -> Vec<Element<'a>> {
        self.collect(tag, true, attributes)
    }

    fn collect(&self, tag: &str, recursive: bool, attributes: &[(&str, &str)]) -> Vec<Element<'a>> {
        let Some(element) = self.inner else {
            return Vec::new();
        };
        let matches = |candidate: &ElementRef<'a>| {
            candidate.value().name() == tag
                && attributes
                    .iter()
                    .all(|(name, value)| candidate.value().attr(name) == Some(*value))
        };
        if recursive {
            element
                .descendants()
                .filter(|node| node.id() != element.id())
                .filter_map(ElementRef::wrap)
                .filter(matches)
                .map(Element::from)
                .collect()
        } else {
            element
                .children()
                .filter_map(ElementRef::wrap)
                .filter(matches)
                .map(Element::from)
                .collect()
        }
    }

    /// Whether this `<table>` has a header row with exactly the given cell
    /// texts (whitespace-normalised). The header row is the first row of
    /// `<thead>` when present, otherwise the table's first row.
    pub fn has_table_header(&self, headers: &[&str]) -> bool {
        if !self.has_tag("table") {
            return false;
        }
        let thead = self.get_descendant("thead");
        let row = if thead.exists() {
            thead.get_descendant("tr")
        } else {
            self.get_descendant("tr")
        };
        let cells = row.get_children("th");
        cells.len() == headers.len()
            && cells
                .iter()
                .zip(headers)
                .all(|(cell, header)| cell.content_matches(header, false))
    }

    /// Whether the document's stylesheet resolves `property` for this
    /// element to a value equal to `expected` (color-aware).
    pub fn has_style(&self, document: &Document, property: &str, expected: &str) -> bool {
        let Some(element) = self.inner else {
            return false;
        };
        document
            .styles()
            .resolve(document.html(), element, property)
            .is_some_and(|declaration| css::values_equal(property, &declaration.value, expected))
    }

    /// Like [`Element::has_style`], but also requires the winning
    /// declaration to be marked `!important`.
    pub fn has_important_style(&self, document: &Document, property: &str, expected: &str) -> bool {
        let Some(element) = self.inner else {
            return false;
        };
        document
            .styles()
            .resolve(document.html(), element, property)
            .is_some_and(|declaration| {
                declaration.important
                    && css::values_equal(property, &declaration.value, expected)
            })
    }

    /// Color assertion against any color-valued property.
    pub fn has_color(&self, document: &Document, property: &str, expected: &str) -> bool {
        self.has_style(document, property, expected)
    }
}

impl Default for Element<'_> {
    fn default() -> Self {
        Element::empty()
    }
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "<html><body>\
        <div id=\"wrap\" class=\"outer main\">\
          <p>First</p>\
          <p class=\"note\">Second  line</p>\
          <ul><li>a</li><li>b</li></ul>\
        </div>\
        <table>\
          <thead><tr><th>Name</th><th>Age</th></tr></thead>\
          <tbody><tr><td>Ann</td><td>7</td></tr></tbody>\
        </table>\
        </body></html>";

    fn page() -> Document {
        Document::parse(PAGE)
    }

    #[test]
    fn test_empty_element_fails_every_assertion() {
        let element = Element::empty();
        assert!(!element.exists());
        assert!(!element.has_tag("p"));
        assert!(!element.has_content());
        assert!(!element.content_matches("x", true));
        assert!(!element.attribute_exists("id"));
        assert!(!element.has_parent("body"));
        assert!(!element.no_loose_text());
        assert!(element.get_children("p").is_empty());
        assert!(!element.get_child("p").exists());
    }

    #[test]
    fn test_get_child_and_children() {
        let document = page();
        let body = document.root().get_child("body");
        let div = body.get_child("div");
        assert!(div.has_tag("div"));
        assert_eq!(div.get_children("p").len(), 2);
        // Direct lookup does not recurse.
        assert!(body.get_children("p").is_empty());
        assert_eq!(body.get_descendants("p").len(), 2);
    }

    #[test]
    fn test_get_children_with_attributes() {
        let document = page();
        let div = document.root().get_descendant("div");
        let notes = div.get_children_with("p", &[("class", "note")]);
        assert_eq!(notes.len(), 1);
        assert!(notes[0].content_matches("Second line", false));
        assert!(
            div.get_children_with("p", &[("class", "missing")])
                .is_empty()
        );
    }

    #[test]
    fn test_content_matching() {
        let document = page();
        let div = document.root().get_descendant("div");
        let note = div.get_child("p");
        assert!(note.has_content());
        assert!(note.content_matches("First", false));
        assert!(note.content_matches("first", true));
        assert!(!note.content_matches("first", false));
    }

    #[test]
    fn test_direct_text_and_loose_text() {
        let document = Document::parse("<html><body><ul>loose<li>a</li></ul></body></html>");
        let ul = document.root().get_descendant("ul");
        assert_eq!(ul.direct_text(), "loose");
        assert!(!ul.no_loose_text());
        let li = ul.get_child("li");
        assert!(li.no_loose_text());
    }

    #[test]
    fn test_attribute_assertions() {
        let document = page();
        let div = document.root().get_descendant("div");
        assert!(div.attribute_exists("id"));
        assert_eq!(div.attribute("id"), Some("wrap"));
        assert!(div.attribute_contains("class", "outer"));
        assert!(div.attribute_matches("id", r"^w.*p$"));
        assert!(!div.attribute_matches("id", r"^\d+$"));
        assert!(!div.attribute_matches("id", r"(unclosed"));
    }

    #[test]
    fn test_has_parent() {
        let document = page();
        let li = document.root().get_descendant("li");
        assert!(li.has_parent("ul"));
        assert!(!li.has_parent("ol"));
    }

    #[test]
    fn test_table_header() {
        let document = page();
        let table = document.root().get_descendant("table");
        assert!(table.has_table_header(&["Name", "Age"]));
        assert!(!table.has_table_header(&["Name"]));
        assert!(!table.has_table_header(&["Name", "Size"]));
        assert!(!document.root().has_table_header(&["Name", "Age"]));
    }

    #[test]
    fn test_has_style() {
        let document = Document::parse(
            "<html><head><style>\
             p { color: red; } .note { color: #00f !important; }\
             </style></head>\
             <body><p>a</p><p class=\"note\">b</p></body></html>",
        );
        let paragraphs = document.root().get_descendants("p");
        assert!(paragraphs[0].has_style(&document, "color", "rgb(255, 0, 0)"));
        assert!(!paragraphs[0].has_important_style(&document, "color", "red"));
        assert!(paragraphs[1].has_color(&document, "color", "blue"));
        assert!(paragraphs[1].has_important_style(&document, "color", "#0000ff"));
        assert!(!paragraphs[0].has_style(&document, "margin", "0"));
    }
}
