// ABOUTME: Standalone HTML document generation for parsed slide decks
// ABOUTME: Combines slide HTML with the base stylesheet and extra CSS/JS resources

use crate::deck::Deck;
use crate::errors::Result;
use crate::parser::{DEFAULT_THEME, MarpParser};
use crate::resources::{ResourceFile, ResourceKind};
use crate::utils;
use html_escape::{encode_double_quoted_attribute, encode_text};
use log::{info, warn};
use std::fs;
use std::path::Path;

/// Styles for the classes and containers the parser emits.
pub const BASE_CSS: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; background: #f8f9fa; }
.slide { position: relative; width: 960px; height: 540px; margin: 2rem auto; padding: 60px; background: white; box-shadow: 0 4px 12px rgba(0,0,0,0.15); overflow: hidden; }
.slide h1 { font-size: 2.4rem; margin-bottom: 1rem; }
.slide h2 { font-size: 1.8rem; margin-bottom: 0.8rem; }
.slide p, .slide ul, .slide ol { font-size: 1.2rem; margin-bottom: 1rem; }
.slide li { margin-left: 1.5rem; }
.title-slide { display: flex; flex-direction: column; justify-content: center; align-items: center; text-align: center; height: 100%; }
.section-slide h1 { font-size: 3rem; }
.columns { display: grid; grid-template-columns: 1fr 1fr; gap: 2rem; }
.center { text-align: center; }
.large { font-size: 1.5em; }
.xlarge { font-size: 2em; }
.pagination { position: absolute; bottom: 20px; right: 60px; font-size: 0.9rem; opacity: 0.7; }
.warning, .success, .highlight { border-left: 4px solid; border-radius: 4px; padding: 1rem; margin-bottom: 1rem; }
.warning { border-color: #f0ad4e; background: #fdf6ec; }
.success { border-color: #5cb85c; background: #eef8ee; }
.highlight { border-color: #4a90e2; background: #f0f7ff; }
@media print {
  body { background: white; }
  .slide { margin: 0; box-shadow: none; page-break-after: always; }
  .slide:last-child { page-break-after: avoid; }
}
"#;

/// Settings for a standalone deck document
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Document title; defaults to the deck's first heading
    pub title: Option<String>,
    pub theme: String,
    pub css_files: Vec<ResourceFile>,
    pub js_files: Vec<ResourceFile>,
    pub embed_resources: bool,
    pub auto_reload_script: Option<String>,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            title: None,
            theme: DEFAULT_THEME.to_string(),
            css_files: Vec::new(),
            js_files: Vec::new(),
            embed_resources: true,
            auto_reload_script: None,
        }
    }
}

/// Parse a markdown file and build a standalone HTML deck from it
pub fn generate_html(markdown_path: &Path, options: &HtmlOptions) -> Result<String> {
    info!("Generating HTML from markdown: {:?}", markdown_path);

    let markdown = utils::read_markdown_file(markdown_path)?;
    let deck = MarpParser::new().parse_deck(&markdown, &options.theme);

    Ok(render_deck_html(&deck, options))
}

/// Build a standalone HTML document from a parsed deck. Resources that fail
/// to load are logged and left out.
pub fn render_deck_html(deck: &Deck, options: &HtmlOptions) -> String {
    let title = options
        .title
        .clone()
        .or_else(|| deck.title())
        .unwrap_or_else(|| "Presentation".to_string());

    let mut html_doc = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html_doc.push_str("<meta charset=\"UTF-8\">\n");
    html_doc.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html_doc.push_str(&format!("<title>{}</title>\n", encode_text(&title)));
    html_doc.push_str(&format!("<style>{}</style>\n", BASE_CSS));
    push_resources(&mut html_doc, &options.css_files, ResourceKind::Stylesheet, options);
    html_doc.push_str("</head>\n<body>\n");

    for slide in &deck.slides {
        let active = if slide.index == 0 { " active" } else { "" };
        html_doc.push_str(&format!(
            "<div class=\"slide{}\" data-theme=\"{}\" data-index=\"{}\">\n{}\n</div>\n",
            active,
            encode_double_quoted_attribute(&slide.theme),
            slide.index,
            slide.html
        ));
    }

    push_resources(&mut html_doc, &options.js_files, ResourceKind::Script, options);

    if let Some(script) = &options.auto_reload_script {
        html_doc.push_str(script);
        html_doc.push('\n');
    }

    html_doc.push_str("</body>\n</html>");
    html_doc
}

fn push_resources(
    html_doc: &mut String,
    resources: &[ResourceFile],
    kind: ResourceKind,
    options: &HtmlOptions,
) {
    for resource in resources {
        match resource.tag(kind, options.embed_resources) {
            Ok(tag) => {
                html_doc.push_str(&tag);
                html_doc.push('\n');
            }
            Err(e) => warn!("Skipping {:?} resource {}: {}", kind, resource.path, e),
        }
    }
}

pub fn write_html_to_file(html_content: &str, output_path: &Path) -> Result<()> {
    info!("Writing HTML to file: {:?}", output_path);
    utils::ensure_parent_directory_exists(output_path)?;
    fs::write(output_path, html_content)?;
    Ok(())
}
