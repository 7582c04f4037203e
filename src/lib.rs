// ABOUTME: Library module for the marp-slides program.
// ABOUTME: Parses Marp-style markdown into slide records and exports them as HTML or JSON.

pub mod config;
pub mod deck;
pub mod directives;
pub mod errors;
pub mod html;
pub mod outline;
pub mod parser;
pub mod renderer;
pub mod resources;
pub mod transform;
pub mod utils;
pub mod validate;
pub mod watch;

pub use config::Config;
pub use deck::Deck;
pub use directives::{DirectiveValue, Directives, SUPPORTED_DIRECTIVES};
pub use errors::{MarpError, Result};
pub use html::{HtmlOptions, generate_html, render_deck_html, write_html_to_file};
pub use outline::{LineKind, OutlineLine, outline};
pub use parser::{DEFAULT_THEME, MarpParser, Slide};
pub use renderer::{ComrakRenderer, MarkdownRenderer};
pub use resources::{ResourceFile, ResourceKind};
pub use validate::{SlideValidation, ValidationReport, validate, validate_slide};
pub use watch::{WatchConfig, watch_markdown};

/// Parse `markdown` into slides with the default comrak renderer.
pub fn parse(markdown: &str, theme: &str) -> Vec<Slide> {
    MarpParser::new().parse(markdown, theme)
}
