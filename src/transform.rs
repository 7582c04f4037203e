// ABOUTME: Marp syntax rewriting before markdown rendering and HTML wrapping after it
// ABOUTME: Handles image sizing, backgrounds, columns, alignment markers and callout boxes

use crate::directives::Directives;
use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Column split marker; must occur exactly once in a slide to take effect.
pub const SPLIT_MARKER: &str = "<!-- split -->";

static IMAGE_WIDTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\]]*?)w:(\d+)([^\]]*?)\]\(([^)]+)\)").unwrap());

static IMAGE_HEIGHT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\]]*?)h:(\d+)([^\]]*?)\]\(([^)]+)\)").unwrap());

static BACKGROUND_IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[bg([^\]]*?)\]\(([^)]+)\)").unwrap());

static FIT_IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[fit([^\]]*?)\]\(([^)]+)\)").unwrap());

/// `<!-- background: url -->` markers left in the rendered HTML.
pub(crate) static BACKGROUND_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<!-- background: (.+?) -->").unwrap());

static WRAPPERS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    ["center", "large", "xlarge"]
        .into_iter()
        .map(|class| {
            let pattern = format!(r"(?s)<!--\s*{0}\s*-->(.*?)<!--\s*/{0}\s*-->", class);
            (class, Regex::new(&pattern).unwrap())
        })
        .collect()
});

static CALLOUTS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        ("Warning", r#"<div class="warning"><h3>⚠️ Warning</h3><p>${1}</p></div>"#),
        ("Success", r#"<div class="success"><h3>✅ Success</h3><p>${1}</p></div>"#),
        ("Info", r#"<div class="highlight"><h3>ℹ️ Info</h3><p>${1}</p></div>"#),
    ]
    .into_iter()
    .map(|(label, replacement)| {
        let pattern = format!(
            r"(?i)<blockquote>\s*<p><strong>{}:</strong>\s*(.*?)</p>\s*</blockquote>",
            label
        );
        (Regex::new(&pattern).unwrap(), replacement)
    })
    .collect()
});

/// Rewrite Marp-specific syntax into markup the generic renderer passes through.
pub fn process_marp_features(markdown: &str) -> String {
    let processed = IMAGE_WIDTH.replace_all(
        markdown,
        r#"<img src="${4}" alt="${1}${3}" style="width: ${2}px;">"#,
    );
    let processed = IMAGE_HEIGHT.replace_all(
        &processed,
        r#"<img src="${4}" alt="${1}${3}" style="height: ${2}px;">"#,
    );
    let processed = BACKGROUND_IMAGE.replace_all(&processed, "<!-- background: ${2} -->");
    let processed = FIT_IMAGE.replace_all(
        &processed,
        r#"<img src="${2}" alt="${1}" style="width: 100%; height: 100%; object-fit: contain;">"#,
    );

    split_columns(&processed)
}

/// Wrappers are paired within each column, so a pair that spans the split
/// marker is left literal on both sides.
fn split_columns(markdown: &str) -> String {
    match markdown.matches(SPLIT_MARKER).count() {
        1 => {
            let (left, right) = markdown
                .split_once(SPLIT_MARKER)
                .unwrap_or((markdown, ""));
            format!(
                "<div class=\"columns\">\n<div>\n\n{}\n\n</div>\n<div>\n\n{}\n\n</div>\n</div>",
                apply_wrappers(left.trim()),
                apply_wrappers(right.trim())
            )
        }
        0 => apply_wrappers(markdown),
        count => {
            debug!("Skipping column layout: {} split markers in one slide", count);
            apply_wrappers(markdown)
        }
    }
}

/// Replace `<!-- class -->...<!-- /class -->` pairs with `<div>` wrappers.
///
/// Pairs of the same kind do not nest: an opening marker closes at the
/// first matching closing marker, so an inner opening marker stays literal
/// inside the wrapper and the outer closing marker is left over.
fn apply_wrappers(markdown: &str) -> String {
    let mut processed = markdown.to_string();
    for (class, pattern) in WRAPPERS.iter() {
        processed = pattern
            .replace_all(&processed, |caps: &Captures| {
                format!("<div class=\"{}\">\n\n{}\n\n</div>", class, caps[1].trim())
            })
            .into_owned();
    }
    processed
}

/// Wrap rendered slide HTML with the directive-driven containers, in order:
/// pagination, background color, background image, text color, classes,
/// then callout boxes.
pub fn post_process_html(
    html: &str,
    index: usize,
    directives: &Directives,
    classes: &[String],
) -> String {
    let mut processed = html.to_string();

    if directives.is_truthy("paginate") {
        processed.push_str(&format!("<div class=\"pagination\">{}</div>", index + 1));
    }

    if let Some(color) = directives.background_color() {
        processed = format!(
            "<div style=\"background-color: {}; width: 100%; height: 100%; padding: inherit;\">{}</div>",
            color, processed
        );
    }

    if let Some(image) = directives.background_image() {
        processed = format!(
            "<div style=\"background-image: url({}); background-size: cover; background-position: center; width: 100%; height: 100%; padding: inherit;\">{}</div>",
            image, processed
        );
    }

    if let Some(color) = directives.text_color() {
        processed = format!("<div style=\"color: {};\">{}</div>", color, processed);
    }

    if !classes.is_empty() {
        processed = format!("<div class=\"{}\">{}</div>", classes.join(" "), processed);
    }

    process_special_boxes(&processed)
}

/// Turn `> **Warning:** ...`, `> **Success:** ...` and `> **Info:** ...`
/// blockquotes into labelled callout boxes.
pub fn process_special_boxes(html: &str) -> String {
    let mut processed = html.to_string();
    for (pattern, replacement) in CALLOUTS.iter() {
        if pattern.is_match(&processed) {
            trace!("Rewriting callout boxes matching {}", pattern);
            processed = pattern.replace_all(&processed, *replacement).into_owned();
        }
    }
    processed
}
