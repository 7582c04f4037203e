// ABOUTME: Optional validation pass over parsed slides
// ABOUTME: Reports empty slides, unsupported directives and malformed images as warnings

use crate::directives::SUPPORTED_DIRECTIVES;
use crate::parser::Slide;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static IMAGE_SYNTAX: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[.*?\]\(.*?\)").unwrap());

/// Findings for a single slide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SlideValidation {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl SlideValidation {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Findings for a whole deck. `errors` and `warnings` hold the flattened
/// messages prefixed with the 1-based slide number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub slide_results: Vec<SlideValidation>,
}

impl ValidationReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

pub fn validate_slide(slide: &Slide) -> SlideValidation {
    let mut result = SlideValidation::default();

    if slide.markdown.trim().is_empty() {
        result.warnings.push("Empty slide detected".to_string());
    }

    for name in slide.directives.keys() {
        if !SUPPORTED_DIRECTIVES.contains(&name) {
            result
                .warnings
                .push(format!("Unsupported directive: {}", name));
        }
    }

    if slide.markdown.contains("![") && !IMAGE_SYNTAX.is_match(&slide.markdown) {
        result
            .warnings
            .push("Invalid image syntax detected".to_string());
    }

    result
}

pub fn validate(slides: &[Slide]) -> ValidationReport {
    let mut report = ValidationReport::default();

    for slide in slides {
        let result = validate_slide(slide);
        let number = slide.index + 1;
        report
            .errors
            .extend(result.errors.iter().map(|e| format!("Slide {}: {}", number, e)));
        report
            .warnings
            .extend(result.warnings.iter().map(|w| format!("Slide {}: {}", number, w)));
        report.slide_results.push(result);
    }

    report
}
