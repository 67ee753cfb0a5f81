//! # HTML Validation
//!
//! Validates the tag structure of a submission: every opening tag needs a
//! matching closing tag (void tags excepted), tags must exist in the
//! registry, nesting must respect permitted parents/children, and
//! attributes are checked for the judge's house rules (no inline style,
//! sane ids, no absolute paths, required/recommended attributes).
//!
//! The delimiter pass always runs first; a submission with unbalanced
//! brackets or quotes is reported on that basis alone and the tag pass is
//! skipped. Tag and attribute errors are fail-fast: the first one found
//! blocks the rest, since later findings over a broken tag tree are noise.
//! Recommended-attribute warnings never block and are gathered for the
//! whole document.

pub mod registry;
pub mod scanner;

use crate::aggregator::{ErrorAggregator, ValidationReport};
use crate::delimiters;
use crate::error::{Position, StructuralError, ValidationWarning};
use scanner::{Attribute, TagEvent};
use std::collections::{HashMap, HashSet};

/// Validates submitted HTML against the tag registry.
///
/// The check toggles default to fully enabled; exercises that only care
/// about structure can switch the attribute and nesting checks off.
#[derive(Clone, Debug)]
pub struct HtmlValidator {
    check_required: bool,
    check_recommended: bool,
    check_nesting: bool,
}

impl Default for HtmlValidator {
    fn default() -> Self {
        HtmlValidator {
            check_required: true,
            check_recommended: true,
            check_nesting: true,
        }
    }
}

impl HtmlValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the check toggles from the process-wide judge config.
    pub fn from_config(config: &common::Config) -> Self {
        HtmlValidator {
            check_required: config.check_required,
            check_recommended: config.check_recommended,
            check_nesting: true,
        }
    }

    /// Enable or disable the required-attribute check.
    pub fn with_required(mut self, check: bool) -> Self {
        self.check_required = check;
        self
    }

    /// Enable or disable the recommended-attribute check.
    pub fn with_recommended(mut self, check: bool) -> Self {
        self.check_recommended = check;
        self
    }

    /// Enable or disable the nesting check.
    pub fn with_nesting(mut self, check: bool) -> Self {
        self.check_nesting = check;
        self
    }

    /// Validate `text` and produce the full report.
    ///
    /// Pass order: delimiters first (all findings reported together), then
    /// the tag stream (fail-fast). Warnings appear only on an otherwise
    /// clean document.
    pub fn validate(&self, text: &str) -> ValidationReport {
        let mut aggregator = ErrorAggregator::new();

        let delimiter_errors = delimiters::scan(text);
        if !delimiter_errors.is_empty() {
            log::debug!(
                "delimiter pass found {} error(s), skipping tag pass",
                delimiter_errors.len()
            );
            aggregator.errors(delimiter_errors);
            return aggregator.into_report();
        }

        if let Err(error) = self.check_tag_stream(text, &mut aggregator) {
            aggregator.error(error);
        }
        aggregator.into_report()
    }

    fn check_tag_stream(
        &self,
        text: &str,
        aggregator: &mut ErrorAggregator,
    ) -> Result<(), StructuralError> {
        let mut stack: Vec<(String, Position)> = Vec::new();
        let mut seen_ids: HashSet<String> = HashSet::new();

        for event in scanner::scan_tags(text) {
            match event {
                TagEvent::Start {
                    tag,
                    attributes,
                    self_closing,
                    position,
                } => self.handle_start(
                    &tag,
                    &attributes,
                    self_closing,
                    position,
                    &mut stack,
                    &mut seen_ids,
                    aggregator,
                )?,
                TagEvent::End { tag, position } => {
                    Self::handle_end(&tag, position, &mut stack)?;
                }
            }
        }

        if let Some((tag, _)) = stack.pop() {
            return Err(StructuralError::MissingClosingTag {
                tag,
                position: scanner::end_position(text),
            });
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn handle_start(
        &self,
        tag: &str,
        attributes: &[Attribute],
        self_closing: bool,
        position: Position,
        stack: &mut Vec<(String, Position)>,
        seen_ids: &mut HashSet<String>,
        aggregator: &mut ErrorAggregator,
    ) -> Result<(), StructuralError> {
        let spec = registry::tag_spec(tag).ok_or_else(|| StructuralError::InvalidTag {
            tag: tag.to_string(),
            position,
        })?;

        if self_closing && !spec.void_tag {
            return Err(StructuralError::NoSelfClosingTag {
                tag: tag.to_string(),
                position,
            });
        }

        if self.check_nesting {
            Self::check_nesting(tag, position, stack)?;
        }

        if !spec.void_tag {
            stack.push((tag.to_string(), position));
        }

        self.check_attributes(tag, attributes, position, seen_ids, aggregator)
    }

    fn handle_end(
        tag: &str,
        position: Position,
        stack: &mut Vec<(String, Position)>,
    ) -> Result<(), StructuralError> {
        let spec = registry::tag_spec(tag).ok_or_else(|| StructuralError::InvalidTag {
            tag: tag.to_string(),
            position,
        })?;

        if spec.void_tag {
            return Err(StructuralError::UnexpectedClosingTag {
                tag: tag.to_string(),
                position,
            });
        }

        match stack.pop() {
            Some((open, _)) if open == tag => Ok(()),
            // Close for a different tag: whatever was on top was never
            // closed.
            Some((unclosed, _)) => Err(StructuralError::MissingClosingTag {
                tag: unclosed,
                position,
            }),
            None => Err(StructuralError::MissingOpeningTag {
                tag: tag.to_string(),
                position,
            }),
        }
    }

    fn check_nesting(
        tag: &str,
        position: Position,
        stack: &[(String, Position)],
    ) -> Result<(), StructuralError> {
        let spec = match registry::tag_spec(tag) {
            Some(spec) => spec,
            None => return Ok(()),
        };
        let parent = stack.last().map(|(tag, _)| tag.as_str());

        if let Some(parents) = &spec.permitted_parents {
            let allowed = match parent {
                // An explicitly empty parent list means the tag may not be
                // nested at all.
                None => parents.is_empty(),
                Some(parent) => parents.iter().any(|p| p == parent),
            };
            if !allowed {
                return Err(StructuralError::UnexpectedTag {
                    tag: tag.to_string(),
                    position,
                });
            }
        }

        if let Some(parent) = parent {
            if let Some(parent_spec) = registry::tag_spec(parent) {
                if let Some(children) = &parent_spec.permitted_children {
                    if !children.iter().any(|c| c == tag) {
                        return Err(StructuralError::UnexpectedTag {
                            tag: tag.to_string(),
                            position,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn check_attributes(
        &self,
        tag: &str,
        attributes: &[Attribute],
        position: Position,
        seen_ids: &mut HashSet<String>,
        aggregator: &mut ErrorAggregator,
    ) -> Result<(), StructuralError> {
        let attrs: HashMap<&str, Option<&str>> = attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
            .collect();

        // Inline CSS is never allowed in these exercises.
        if attrs.contains_key("style") {
            return Err(StructuralError::InvalidAttribute {
                tag: tag.to_string(),
                attribute: "style".to_string(),
                position,
            });
        }

        if let Some(id) = attrs.get("id") {
            let id = id.unwrap_or("");
            if id.contains(char::is_whitespace) {
                return Err(StructuralError::AttributeValue {
                    message: "The value of attribute 'id' may not contain whitespace".to_string(),
                    position,
                });
            }
            if !seen_ids.insert(id.to_string()) {
                return Err(StructuralError::DuplicateId {
                    tag: tag.to_string(),
                    id: id.to_string(),
                    position,
                });
            }
        }

        for attr in ["id", "class"] {
            if let Some(value) = attrs.get(attr) {
                if value.unwrap_or("").is_empty() {
                    return Err(StructuralError::AttributeValue {
                        message: format!(
                            "The value of attribute '{attr}' must be at least one character long"
                        ),
                        position,
                    });
                }
            }
        }

        if let Some(Some(src)) = attrs.get("src") {
            if is_absolute_path(src) {
                return Err(StructuralError::AttributeValue {
                    message: "Absolute paths are not allowed".to_string(),
                    position,
                });
            }
        }

        let spec = match registry::tag_spec(tag) {
            Some(spec) => spec,
            None => return Ok(()),
        };

        if self.check_required {
            let missing: Vec<&str> = spec
                .required_attributes
                .iter()
                .map(String::as_str)
                .filter(|required| !attrs.contains_key(required))
                .collect();
            if !missing.is_empty() {
                return Err(StructuralError::MissingRequiredAttribute {
                    tag: tag.to_string(),
                    attributes: missing.join(", "),
                    position,
                });
            }
        }

        if self.check_recommended {
            let missing: Vec<&str> = spec
                .recommended_attributes
                .iter()
                .map(String::as_str)
                .filter(|recommended| !attrs.contains_key(recommended))
                .collect();
            if !missing.is_empty() {
                aggregator.warning(ValidationWarning::MissingRecommendedAttribute {
                    tag: tag.to_string(),
                    attributes: missing.join(", "),
                    position,
                });
            }
        }

        Ok(())
    }
}

/// Filesystem-absolute `src` values (Unix or Windows style) are rejected:
/// they cannot resolve on the grading host or the student's page.
fn is_absolute_path(value: &str) -> bool {
    if value.starts_with('/') || value.starts_with('\\') {
        return true;
    }
    let mut chars = value.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(drive), Some(':'), Some('/' | '\\')) if drive.is_ascii_alphabetic()
    )
}
