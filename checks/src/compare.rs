//! # Document Comparison
//!
//! Lockstep comparison of a submission against a reference solution: both
//! trees are walked breadth-first as a queue of element pairs, and the
//! first mismatch fails the comparison (later mismatches would mostly be
//! consequences of the first). The literal value `DUMMY` in the solution
//! acts as a wildcard for an attribute value or a text content, so
//! solutions can pin structure without pinning every word.

use crate::css;
use crate::document::Document;
use scraper::ElementRef;
use std::collections::{BTreeMap, VecDeque};
use std::fmt;

/// Wildcard marker in solution documents.
pub const DUMMY: &str = "DUMMY";

/// Which aspects of the trees to compare besides tag names and child
/// counts, which are always compared.
#[derive(Clone, Copy, Debug, Default)]
pub struct CompareOptions {
    /// Attribute sets must be exactly equal.
    pub attributes: bool,
    /// The solution's attributes must be present; extras are allowed.
    /// Ignored when `attributes` is set.
    pub minimal_attributes: bool,
    /// Direct text content must be equal (whitespace-normalised).
    pub contents: bool,
    /// Every style property the solution resolves for an element must
    /// resolve to an equal value for the submission's counterpart.
    pub styles: bool,
}

impl CompareOptions {
    pub fn attributes(mut self) -> Self {
        self.attributes = true;
        self
    }

    pub fn minimal_attributes(mut self) -> Self {
        self.minimal_attributes = true;
        self
    }

    pub fn contents(mut self) -> Self {
        self.contents = true;
        self
    }

    pub fn styles(mut self) -> Self {
        self.styles = true;
        self
    }
}

/// The first structural difference found between solution and submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompareError {
    EmptySubmission,
    TagMismatch { expected: String, actual: String },
    AttributeMismatch { tag: String },
    ContentMismatch { tag: String },
    ChildCountMismatch { tag: String, expected: usize, actual: usize },
    StyleMismatch { tag: String, property: String },
}

impl fmt::Display for CompareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareError::EmptySubmission => write!(f, "The submission is empty"),
            CompareError::TagMismatch { expected, actual } => {
                write!(f, "Expected tag <{expected}> but found <{actual}>")
            }
            CompareError::AttributeMismatch { tag } => {
                write!(f, "The attributes of <{tag}> do not match the expected ones")
            }
            CompareError::ContentMismatch { tag } => {
                write!(f, "The content of <{tag}> does not match the expected content")
            }
            CompareError::ChildCountMismatch {
                tag,
                expected,
                actual,
            } => write!(
                f,
                "Expected <{tag}> to have {expected} child element(s) but found {actual}"
            ),
            CompareError::StyleMismatch { tag, property } => {
                write!(f, "The styling of <{tag}> differs for property '{property}'")
            }
        }
    }
}

/// Compare `submission` against `solution`. `Ok(())` means the submission
/// is structurally equivalent under the given options.
pub fn compare(
    solution: &Document,
    submission: &Document,
    options: CompareOptions,
) -> Result<(), CompareError> {
    if submission.is_empty() {
        return Err(CompareError::EmptySubmission);
    }

    let mut queue: VecDeque<(ElementRef, ElementRef)> = VecDeque::new();
    queue.push_back((solution.root_ref(), submission.root_ref()));

    while let Some((expected, actual)) = queue.pop_front() {
        let tag = expected.value().name().to_string();
        if actual.value().name() != tag {
            return Err(CompareError::TagMismatch {
                expected: tag,
                actual: actual.value().name().to_string(),
            });
        }

        if options.attributes {
            if !attributes_equal(expected, actual) {
                return Err(CompareError::AttributeMismatch { tag });
            }
        } else if options.minimal_attributes && !attributes_subset(expected, actual) {
            return Err(CompareError::AttributeMismatch { tag });
        }

        if options.contents && !contents_equal(expected, actual) {
            return Err(CompareError::ContentMismatch { tag });
        }

        if options.styles {
            check_styles(solution, submission, expected, actual, &tag)?;
        }

        let expected_children = element_children(expected);
        let actual_children = element_children(actual);
        if expected_children.len() != actual_children.len() {
            return Err(CompareError::ChildCountMismatch {
                tag,
                expected: expected_children.len(),
                actual: actual_children.len(),
            });
        }
        queue.extend(expected_children.into_iter().zip(actual_children));
    }
    Ok(())
}

fn element_children<'a>(element: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    element.children().filter_map(ElementRef::wrap).collect()
}

fn attribute_map<'a>(element: ElementRef<'a>) -> BTreeMap<&'a str, &'a str> {
    element.value().attrs().collect()
}

fn attributes_equal(expected: ElementRef<'_>, actual: ElementRef<'_>) -> bool {
    let expected = attribute_map(expected);
    let actual = attribute_map(actual);
    expected.len() == actual.len()
        && expected.iter().all(|(name, value)| {
            actual
                .get(name)
                .is_some_and(|found| *value == DUMMY || found == value)
        })
}

fn attributes_subset(expected: ElementRef<'_>, actual: ElementRef<'_>) -> bool {
    let actual = attribute_map(actual);
    attribute_map(expected).iter().all(|(name, value)| {
        actual
            .get(name)
            .is_some_and(|found| *value == DUMMY || found == value)
    })
}

fn contents_equal(expected: ElementRef<'_>, actual: ElementRef<'_>) -> bool {
    let expected = normalize_whitespace(&direct_text(expected));
    if expected == DUMMY {
        return true;
    }
    expected == normalize_whitespace(&direct_text(actual))
}

fn check_styles(
    solution: &Document,
    submission: &Document,
    expected: ElementRef<'_>,
    actual: ElementRef<'_>,
    tag: &str,
) -> Result<(), CompareError> {
    for property in solution.styles().properties_for(solution.html(), expected) {
        let Some(declaration) = solution.styles().resolve(solution.html(), expected, &property)
        else {
            continue;
        };
        let matches = submission
            .styles()
            .resolve(submission.html(), actual, &property)
            .is_some_and(|found| css::values_equal(&property, &found.value, &declaration.value));
        if !matches {
            return Err(CompareError::StyleMismatch {
                tag: tag.to_string(),
                property,
            });
        }
    }
    Ok(())
}

fn direct_text(element: ElementRef<'_>) -> String {
    element
        .children()
        .filter_map(|node| node.value().as_text())
        .map(|text| text.to_string())
        .collect()
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(solution: &str, submission: &str) -> (Document, Document) {
        (Document::parse(solution), Document::parse(submission))
    }

    #[test]
    fn test_identical_documents_pass_in_all_modes() {
        let text = "<html><body><p class=\"a\">Hello</p></body></html>";
        let (solution, submission) = docs(text, text);
        let options = CompareOptions::default()
            .attributes()
            .contents()
            .styles();
        assert_eq!(compare(&solution, &submission, options), Ok(()));
    }

    #[test]
    fn test_empty_submission_fails_immediately() {
        let (solution, submission) = docs("<html></html>", "   ");
        assert_eq!(
            compare(&solution, &submission, CompareOptions::default()),
            Err(CompareError::EmptySubmission)
        );
    }

    #[test]
    fn test_tag_mismatch() {
        let (solution, submission) = docs(
            "<html><body><p>x</p></body></html>",
            "<html><body><div>x</div></body></html>",
        );
        assert_eq!(
            compare(&solution, &submission, CompareOptions::default()),
            Err(CompareError::TagMismatch {
                expected: "p".into(),
                actual: "div".into(),
            })
        );
    }

    #[test]
    fn test_child_count_mismatch() {
        let (solution, submission) = docs(
            "<html><body><ul><li>a</li><li>b</li></ul></body></html>",
            "<html><body><ul><li>a</li></ul></body></html>",
        );
        assert_eq!(
            compare(&solution, &submission, CompareOptions::default()),
            Err(CompareError::ChildCountMismatch {
                tag: "ul".into(),
                expected: 2,
                actual: 1,
            })
        );
    }

    #[test]
    fn test_attributes_exact_rejects_extras() {
        let (solution, submission) = docs(
            "<html><body><p class=\"a\">x</p></body></html>",
            "<html><body><p class=\"a\" id=\"extra\">x</p></body></html>",
        );
        let exact = CompareOptions::default().attributes();
        assert!(matches!(
            compare(&solution, &submission, exact),
            Err(CompareError::AttributeMismatch { .. })
        ));
        let minimal = CompareOptions::default().minimal_attributes();
        assert_eq!(compare(&solution, &submission, minimal), Ok(()));
    }

    #[test]
    fn test_dummy_attribute_value_is_a_wildcard() {
        let (solution, submission) = docs(
            "<html><body><a href=\"DUMMY\">link</a></body></html>",
            "<html><body><a href=\"https://example.com\">link</a></body></html>",
        );
        let options = CompareOptions::default().attributes();
        assert_eq!(compare(&solution, &submission, options), Ok(()));
    }

    #[test]
    fn test_contents_compared_normalised() {
        let (solution, submission) = docs(
            "<html><body><p>hello   world</p></body></html>",
            "<html><body><p>hello world</p></body></html>",
        );
        let options = CompareOptions::default().contents();
        assert_eq!(compare(&solution, &submission, options), Ok(()));

        let (solution, submission) = docs(
            "<html><body><p>hello</p></body></html>",
            "<html><body><p>goodbye</p></body></html>",
        );
        assert_eq!(
            compare(&solution, &submission, options),
            Err(CompareError::ContentMismatch { tag: "p".into() })
        );
    }

    #[test]
    fn test_dummy_content_is_a_wildcard() {
        let (solution, submission) = docs(
            "<html><body><p>DUMMY</p></body></html>",
            "<html><body><p>anything at all</p></body></html>",
        );
        let options = CompareOptions::default().contents();
        assert_eq!(compare(&solution, &submission, options), Ok(()));
    }

    #[test]
    fn test_contents_ignored_without_the_option() {
        let (solution, submission) = docs(
            "<html><body><p>hello</p></body></html>",
            "<html><body><p>goodbye</p></body></html>",
        );
        assert_eq!(
            compare(&solution, &submission, CompareOptions::default()),
            Ok(())
        );
    }

    #[test]
    fn test_styles_compared_when_enabled() {
        let (solution, submission) = docs(
            "<html><head><style>p { color: red; }</style></head>\
             <body><p>x</p></body></html>",
            "<html><head><style>p { color: rgb(255, 0, 0); }</style></head>\
             <body><p>x</p></body></html>",
        );
        let options = CompareOptions::default().styles();
        assert_eq!(compare(&solution, &submission, options), Ok(()));

        let (solution, submission) = docs(
            "<html><head><style>p { color: red; }</style></head>\
             <body><p>x</p></body></html>",
            "<html><head><style>p { color: blue; }</style></head>\
             <body><p>x</p></body></html>",
        );
        assert_eq!(
            compare(&solution, &submission, options),
            Err(CompareError::StyleMismatch {
                tag: "p".into(),
                property: "color".into(),
            })
        );
    }
}
