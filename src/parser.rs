// ABOUTME: Marp-compatible markdown parser for the marp-slides library
// ABOUTME: Splits a document into slides and runs each through directives, classes and HTML

use crate::deck::Deck;
use crate::directives::{
    Directives, extract_frontmatter, extract_slide_directives, is_break_marker,
    lines_with_offsets,
};
use crate::outline::{OutlineLine, outline};
use crate::renderer::{ComrakRenderer, MarkdownRenderer};
use crate::transform::{BACKGROUND_MARKER, post_process_html, process_marp_features};
use log::{debug, info};
use serde::Serialize;

/// Theme used when the caller does not name one.
pub const DEFAULT_THEME: &str = "default";

pub const TITLE_SLIDE_CLASS: &str = "title-slide";
pub const SECTION_SLIDE_CLASS: &str = "section-slide";

/// A single parsed slide. Built once per parse call and never updated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slide {
    /// Zero-based position in the deck
    pub index: usize,
    /// Slide content with frontmatter and directive comments removed
    pub markdown: String,
    pub html: String,
    /// Global directives overlaid with this slide's own
    pub directives: Directives,
    pub classes: Vec<String>,
    pub theme: String,
}

impl Slide {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Image URLs declared with `![bg](url)` on this slide.
    pub fn background_images(&self) -> Vec<&str> {
        BACKGROUND_MARKER
            .captures_iter(&self.html)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect()
    }

    /// Line-level structure of the slide markdown, for text exporters.
    pub fn outline(&self) -> Vec<OutlineLine> {
        outline(&self.markdown)
    }
}

/// Parser turning a Marp-style markdown document into slides.
///
/// The parser keeps no state between calls: every `parse` rebuilds the
/// whole slide sequence from the input text. The markdown renderer is the
/// only shared piece and is read-only.
pub struct MarpParser<R = ComrakRenderer> {
    renderer: R,
}

impl MarpParser<ComrakRenderer> {
    pub fn new() -> Self {
        Self::with_renderer(ComrakRenderer::new())
    }
}

impl Default for MarpParser<ComrakRenderer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: MarkdownRenderer> MarpParser<R> {
    pub fn with_renderer(renderer: R) -> Self {
        Self { renderer }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Parse `markdown` into an ordered list of slides.
    pub fn parse(&self, markdown: &str, theme: &str) -> Vec<Slide> {
        self.parse_deck(markdown, theme).slides
    }

    /// Parse `markdown` and keep the global directives next to the slides.
    pub fn parse_deck(&self, markdown: &str, theme: &str) -> Deck {
        let frontmatter = extract_frontmatter(markdown);
        let global_directives = frontmatter.directives;

        let slides: Vec<Slide> = split_into_slides(frontmatter.body)
            .into_iter()
            .enumerate()
            .map(|(index, text)| self.parse_slide(text, index, theme, &global_directives))
            .collect();

        info!(
            "Parsed {} slides with {} global directives",
            slides.len(),
            global_directives.len()
        );

        Deck::new(slides, global_directives)
    }

    fn parse_slide(&self, text: &str, index: usize, theme: &str, global: &Directives) -> Slide {
        let (markdown, local) = extract_slide_directives(text);
        let directives = global.merged_with(&local);

        let theme = directives
            .theme()
            .map(|value| value.to_string())
            .unwrap_or_else(|| theme.to_string());

        let classes = determine_slide_classes(&markdown, &directives);

        let intermediate = process_marp_features(&markdown);
        let rendered = self.renderer.render(&intermediate);
        let html = post_process_html(&rendered, index, &directives, &classes);

        debug!(
            "Slide {}: {} local directives, classes {:?}, theme {}",
            index + 1,
            local.len(),
            classes,
            theme
        );

        Slide {
            index,
            markdown,
            html,
            directives,
            classes,
            theme,
        }
    }
}

/// Split document text on break-marker lines. Markers are dropped, and so are
/// segments holding only whitespace.
pub fn split_into_slides(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;

    for (offset, line) in lines_with_offsets(text) {
        if is_break_marker(line) {
            segments.push(&text[start..offset]);
            start = offset + line.len();
        }
    }
    segments.push(&text[start..]);

    segments
        .into_iter()
        .filter(|segment| !segment.trim().is_empty())
        .collect()
}

/// Structural classes for a slide, from its stripped markdown and directives.
///
/// A level-1 heading opening a slide of at most four non-blank lines marks a
/// title slide; a lone level-1 heading or `class: section` marks a section
/// slide; an explicit `class` directive is appended verbatim.
pub fn determine_slide_classes(markdown: &str, directives: &Directives) -> Vec<String> {
    let mut classes = Vec::new();

    let lines: Vec<&str> = markdown
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect();
    let opens_with_heading = lines
        .first()
        .is_some_and(|first| first.starts_with("# "));

    if opens_with_heading && lines.len() <= 4 {
        classes.push(TITLE_SLIDE_CLASS.to_string());
    }

    let section_directive =
        directives.get("class").and_then(|value| value.as_str()) == Some("section");
    if section_directive || (opens_with_heading && lines.len() == 1) {
        classes.push(SECTION_SLIDE_CLASS.to_string());
    }

    if let Some(class) = directives.class() {
        classes.push(class.to_string());
    }

    classes
}
