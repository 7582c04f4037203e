// ABOUTME: Parsed deck with its global directives
// ABOUTME: Lookup helpers plus JSON, markdown and validation output

use crate::directives::Directives;
use crate::errors::Result;
use crate::outline::LineKind;
use crate::parser::Slide;
use crate::validate::{ValidationReport, validate};
use serde::Serialize;

/// Output of one parse call: the slides and the directives taken from the
/// document's frontmatter.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    pub slides: Vec<Slide>,
    pub global_directives: Directives,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeckJson<'a> {
    slides: &'a [Slide],
    global_directives: &'a Directives,
    slide_count: usize,
}

impl Deck {
    pub fn new(slides: Vec<Slide>, global_directives: Directives) -> Self {
        Self {
            slides,
            global_directives,
        }
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn global_directives(&self) -> &Directives {
        &self.global_directives
    }

    pub fn slides_by_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a Slide> + 'a {
        self.slides.iter().filter(move |slide| slide.has_class(class))
    }

    /// Text of the first heading in the deck, if any.
    pub fn title(&self) -> Option<String> {
        self.slides.iter().find_map(|slide| {
            slide
                .outline()
                .into_iter()
                .find(|line| matches!(line.kind, LineKind::Heading { .. }))
                .map(|line| line.text)
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.as_json())?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.as_json())?)
    }

    fn as_json(&self) -> DeckJson<'_> {
        DeckJson {
            slides: &self.slides,
            global_directives: &self.global_directives,
            slide_count: self.slides.len(),
        }
    }

    /// Rebuild a markdown document from the global directives and the
    /// stripped slide markdown. Slide-local directives are not written back.
    pub fn to_markdown(&self) -> String {
        let mut markdown = String::new();

        if !self.global_directives.is_empty() {
            markdown.push_str("---\n");
            for (key, value) in self.global_directives.iter() {
                markdown.push_str(&format!("{}: {}\n", key, value));
            }
            markdown.push_str("---\n\n");
        }

        for (i, slide) in self.slides.iter().enumerate() {
            if i > 0 {
                markdown.push_str("\n---\n\n");
            }
            markdown.push_str(&slide.markdown);
        }

        markdown
    }

    pub fn validate(&self) -> ValidationReport {
        validate(&self.slides)
    }
}
