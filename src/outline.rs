// ABOUTME: Plain-text line classification of slide markdown
// ABOUTME: Lets PDF/PPTX exporters rebuild slide text without the HTML

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.*)$").unwrap());
static BULLET_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[-*+]\s+(.*)$").unwrap());
static ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\d+[.)]\s+(.*)$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LineKind {
    Heading { level: u8 },
    ListItem { ordered: bool },
    Paragraph,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineLine {
    pub kind: LineKind,
    pub text: String,
}

/// Classify each non-blank line of slide markdown as a heading, list item or
/// paragraph text, with the markdown markers stripped.
pub fn outline(markdown: &str) -> Vec<OutlineLine> {
    markdown
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(classify_line)
        .collect()
}

fn classify_line(line: &str) -> OutlineLine {
    if let Some(caps) = HEADING.captures(line) {
        return OutlineLine {
            kind: LineKind::Heading {
                level: caps[1].len() as u8,
            },
            text: caps[2].trim().to_string(),
        };
    }

    if let Some(caps) = BULLET_ITEM.captures(line) {
        return OutlineLine {
            kind: LineKind::ListItem { ordered: false },
            text: caps[1].trim().to_string(),
        };
    }

    if let Some(caps) = ORDERED_ITEM.captures(line) {
        return OutlineLine {
            kind: LineKind::ListItem { ordered: true },
            text: caps[1].trim().to_string(),
        };
    }

    OutlineLine {
        kind: LineKind::Paragraph,
        text: line.trim().to_string(),
    }
}
