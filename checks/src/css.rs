//! # CSS Rule Layer
//!
//! A small cascade implementation for grading styling exercises: parse the
//! `<style>` sheets of a document into flat `selector { property: value; }`
//! rules, match elements with [`scraper::Selector`], and resolve the
//! winning declaration per property by `!important`, then specificity, then
//! source order.
//!
//! This is not a full CSS engine. At-rules, shorthand expansion and
//! inheritance are out of scope; exercise stylesheets are flat rule lists,
//! which is all the assertions need. Color values are normalised before
//! comparison so `red`, `#f00`, `#ff0000` and `rgb(255, 0, 0)` compare
//! equal.

use crate::error::ChecksError;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::{BTreeSet, HashMap};

/// One `property: value` declaration, with its `!important` flag split off.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub value: String,
    pub important: bool,
}

#[derive(Debug)]
struct Rule {
    selector: Selector,
    specificity: u32,
    order: usize,
    declarations: HashMap<String, Declaration>,
}

/// All style rules of one document, in source order.
#[derive(Debug, Default)]
pub struct StyleSheet {
    rules: Vec<Rule>,
}

static STYLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("style").expect("style selector compiles"));

static COMMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("comment regex compiles"));

impl StyleSheet {
    /// Gather and parse every `<style>` element of a parsed document.
    pub fn extract(html: &Html) -> StyleSheet {
        let mut css = String::new();
        for style in html.select(&STYLE_SELECTOR) {
            for text in style.text() {
                css.push_str(text);
                css.push('\n');
            }
        }
        StyleSheet::parse(&css)
    }

    /// Parse a flat stylesheet. Unparsable selectors are skipped with a
    /// warning rather than failing the whole sheet, since one broken rule
    /// should not make every styling check vacuously fail.
    pub fn parse(css: &str) -> StyleSheet {
        let css = COMMENT_RE.replace_all(css, "");
        let mut rules = Vec::new();
        let mut order = 0;
        for block in css.split('}') {
            let Some((selectors, body)) = block.split_once('{') else {
                continue;
            };
            let declarations = parse_declarations(body);
            if declarations.is_empty() {
                continue;
            }
            // A selector list is equivalent to one rule per selector, each
            // with its own specificity.
            for selector_text in selectors.split(',') {
                let selector_text = selector_text.trim();
                if selector_text.is_empty() {
                    continue;
                }
                match Selector::parse(selector_text) {
                    Ok(selector) => {
                        rules.push(Rule {
                            selector,
                            specificity: specificity(selector_text),
                            order,
                            declarations: declarations.clone(),
                        });
                        order += 1;
                    }
                    Err(error) => {
                        log::warn!("skipping unparsable selector '{selector_text}': {error}");
                    }
                }
            }
        }
        StyleSheet { rules }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The winning declaration of `property` for `element`, or `None` when
    /// no matching rule declares it. `!important` beats specificity,
    /// specificity beats source order.
    pub fn resolve<'a>(
        &'a self,
        html: &Html,
        element: ElementRef<'_>,
        property: &str,
    ) -> Option<&'a Declaration> {
        let property = property.trim().to_lowercase();
        let mut best: Option<(&Rule, &Declaration)> = None;
        for rule in &self.rules {
            let Some(declaration) = rule.declarations.get(&property) else {
                continue;
            };
            if !matches_element(html, &rule.selector, element) {
                continue;
            }
            let wins = match best {
                None => true,
                Some((best_rule, best_declaration)) => {
                    (declaration.important, rule.specificity, rule.order)
                        > (best_declaration.important, best_rule.specificity, best_rule.order)
                }
            };
            if wins {
                best = Some((rule, declaration));
            }
        }
        best.map(|(_, declaration)| declaration)
    }

    /// Every property some matching rule declares for `element`, sorted.
    pub fn properties_for(&self, html: &Html, element: ElementRef<'_>) -> BTreeSet<String> {
        self.rules
            .iter()
            .filter(|rule| matches_element(html, &rule.selector, element))
            .flat_map(|rule| rule.declarations.keys().cloned())
            .collect()
    }
}

/// `scraper` has no per-element "does this selector match" call, so we run
/// the selector over the document and compare node ids.
fn matches_element(html: &Html, selector: &Selector, element: ElementRef<'_>) -> bool {
    html.select(selector).any(|found| found.id() == element.id())
}

fn parse_declarations(body: &str) -> HashMap<String, Declaration> {
    let mut declarations = HashMap::new();
    for part in body.split(';') {
        let Some((property, value)) = part.split_once(':') else {
            continue;
        };
        let property = property.trim().to_lowercase();
        let mut value = value.trim().to_string();
        if property.is_empty() || value.is_empty() {
            continue;
        }
        let important = value.to_lowercase().ends_with("!important");
        if important {
            value.truncate(value.len() - "!important".len());
            value = value.trim_end().to_string();
        }
        // Later declarations of the same property within a rule win.
        declarations.insert(property, Declaration { value, important });
    }
    declarations
}

/// Approximate (ids, classes/attributes/pseudo-classes, types) specificity,
/// collapsed into one integer. Exercise selectors are simple enough that
/// counting marker characters is accurate.
fn specificity(selector: &str) -> u32 {
    let ids = selector.matches('#').count() as u32;
    let classes = (selector.matches('.').count()
        + selector.matches('[').count()
        + selector.matches(':').count()) as u32;
    let types = selector
        .split_whitespace()
        .flat_map(|token| token.split(['>', '+', '~']))
        .filter(|token| {
            token
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic())
        })
        .count() as u32;
    ids * 10_000 + classes * 100 + types
}

static NAMED_COLORS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("black", "#000000"),
        ("white", "#ffffff"),
        ("red", "#ff0000"),
        ("green", "#008000"),
        ("lime", "#00ff00"),
        ("blue", "#0000ff"),
        ("yellow", "#ffff00"),
        ("orange", "#ffa500"),
        ("purple", "#800080"),
        ("pink", "#ffc0cb"),
        ("brown", "#a52a2a"),
        ("gray", "#808080"),
        ("grey", "#808080"),
        ("cyan", "#00ffff"),
        ("aqua", "#00ffff"),
        ("magenta", "#ff00ff"),
        ("fuchsia", "#ff00ff"),
        ("silver", "#c0c0c0"),
        ("maroon", "#800000"),
        ("navy", "#000080"),
        ("teal", "#008080"),
        ("olive", "#808000"),
    ])
});

/// Normalise a color value to `#rrggbb` where possible, so equivalent
/// notations compare equal. Unrecognised values are returned trimmed and
/// lowercased.
pub fn normalize_color(value: &str) -> String {
    let value = value.trim().to_lowercase();
    if let Some(hex) = NAMED_COLORS.get(value.as_str()) {
        return (*hex).to_string();
    }
    if let Some(hex) = value.strip_prefix('#') {
        if hex.len() == 3 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            let mut expanded = String::from("#");
            for c in hex.chars() {
                expanded.push(c);
                expanded.push(c);
            }
            return expanded;
        }
        return value;
    }
    if let Some(args) = value
        .strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let channels: Vec<u8> = args
            .split(',')
            .filter_map(|channel| channel.trim().parse().ok())
            .collect();
        if let [r, g, b] = channels[..] {
            return format!("#{r:02x}{g:02x}{b:02x}");
        }
    }
    value
}

/// Value equality for styling assertions: color-valued properties go
/// through [`normalize_color`], everything else compares trimmed and
/// lowercased.
pub fn values_equal(property: &str, left: &str, right: &str) -> bool {
    if property.to_lowercase().contains("color") {
        normalize_color(left) == normalize_color(right)
    } else {
        left.trim().to_lowercase() == right.trim().to_lowercase()
    }
}

/// Parse a selector the exercise author supplied, surfacing the parse error
/// instead of silently matching nothing.
pub fn parse_selector(css: &str) -> Result<Selector, ChecksError> {
    Selector::parse(css).map_err(|error| ChecksError::InvalidSelector(error.to_string()))
}
