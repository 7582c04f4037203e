// ABOUTME: Markdown-to-HTML capability used by the slide parser
// ABOUTME: Wraps comrak with GFM extensions and raw HTML passthrough

use comrak::{ComrakOptions, markdown_to_html};

/// Converts markdown to HTML. Implementations must leave raw HTML (the
/// `<div>`, `<img>` and comment markers produced by the feature pass) intact.
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, markdown: &str) -> String;
}

impl<F> MarkdownRenderer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn render(&self, markdown: &str) -> String {
        self(markdown)
    }
}

/// CommonMark + GFM renderer backed by comrak. Options are fixed at
/// construction.
pub struct ComrakRenderer {
    options: ComrakOptions,
}

impl ComrakRenderer {
    pub fn new() -> Self {
        let mut options = ComrakOptions::default();
        options.render.unsafe_ = true; // Raw HTML from the feature pass
        options.render.hardbreaks = true;
        options.extension.table = true;
        options.extension.autolink = true;
        options.extension.strikethrough = true;
        options.extension.tasklist = true;
        Self { options }
    }

    /// Use caller-supplied comrak options as-is.
    pub fn with_options(options: ComrakOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ComrakOptions {
        &self.options
    }
}

impl Default for ComrakRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer for ComrakRenderer {
    fn render(&self, markdown: &str) -> String {
        markdown_to_html(markdown, &self.options)
    }
}
