//! The parsed submission document.
//!
//! Owns the tag tree (built by `scraper`) and the stylesheet extracted from
//! it. Checks never build or mutate trees themselves; they borrow
//! [`Element`](crate::element::Element) views out of a `Document`.

use crate::css::{self, StyleSheet};
use crate::element::Element;
use crate::error::ChecksError;
use scraper::{ElementRef, Html};
use validator::{HtmlValidator, ValidationReport};

/// One parsed HTML document plus its extracted style rules.
#[derive(Debug)]
pub struct Document {
    html: Html,
    styles: StyleSheet,
    empty: bool,
}

impl Document {
    /// Parse a document without structural validation. The parser is
    /// forgiving, so this always succeeds; use [`Document::parse_checked`]
    /// when the submission has not been validated yet.
    pub fn parse(text: &str) -> Document {
        let html = Html::parse_document(text);
        let styles = StyleSheet::extract(&html);
        Document {
            html,
            styles,
            empty: text.trim().is_empty(),
        }
    }

    /// Validate `text` first and only parse it when no blocking error was
    /// found. Warnings do not prevent parsing. On failure the full
    /// validation report is returned so it can be rendered as feedback.
    pub fn parse_checked(text: &str) -> Result<Document, ValidationReport> {
        let report = HtmlValidator::new().validate(text);
        if report.errors.is_empty() {
            Ok(Document::parse(text))
        } else {
            log::info!(
                "submission rejected before parsing: {} structural error(s)",
                report.errors.len()
            );
            Err(report)
        }
    }

    /// The source text was empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// The `<html>` element.
    pub fn root(&self) -> Element<'_> {
        Element::from(self.html.root_element())
    }

    /// All elements matching a CSS selector, in document order.
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'_>>, ChecksError> {
        let selector = css::parse_selector(selector)?;
        Ok(self.html.select(&selector).map(Element::from).collect())
    }

    pub fn styles(&self) -> &StyleSheet {
        &self.styles
    }

    pub(crate) fn html(&self) -> &Html {
        &self.html
    }

    pub(crate) fn root_ref(&self) -> ElementRef<'_> {
        self.html.root_element()
    }
}
