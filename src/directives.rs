// ABOUTME: Directive values and directive maps for Marp-style decks
// ABOUTME: Parses the frontmatter block and inline `<!-- key: value -->` comments

use indexmap::IndexMap;
use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;

/// Directive names understood by the renderer and exporters.
pub const SUPPORTED_DIRECTIVES: &[&str] = &[
    "theme",
    "paginate",
    "size",
    "backgroundColor",
    "bg",
    "backgroundImage",
    "bgImage",
    "color",
    "class",
    "footer",
    "header",
];

static KEY_VALUE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z0-9_]+):\s*(.+)$").unwrap());

static INLINE_DIRECTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<!--\s*([A-Za-z0-9_]+):\s*(.+?)\s*-->").unwrap());

/// A resolved directive value.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectiveValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl DirectiveValue {
    /// Coerce a raw directive value: `true`/`false` become booleans, a value
    /// that parses fully as a finite number becomes numeric, anything else
    /// is kept as trimmed text.
    pub fn coerce(raw: &str) -> Self {
        let value = raw.trim();
        match value {
            "true" => DirectiveValue::Bool(true),
            "false" => DirectiveValue::Bool(false),
            _ => match value.parse::<f64>() {
                Ok(number) if number.is_finite() => DirectiveValue::Number(number),
                _ => DirectiveValue::Text(value.to_string()),
            },
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            DirectiveValue::Bool(flag) => *flag,
            DirectiveValue::Number(number) => *number != 0.0 && !number.is_nan(),
            DirectiveValue::Text(text) => !text.is_empty(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DirectiveValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DirectiveValue::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            DirectiveValue::Number(number) => Some(*number),
            _ => None,
        }
    }

    fn integral(number: f64) -> Option<i64> {
        if number.fract() == 0.0 && number.abs() < 1e15 {
            Some(number as i64)
        } else {
            None
        }
    }
}

impl fmt::Display for DirectiveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectiveValue::Bool(flag) => write!(f, "{}", flag),
            DirectiveValue::Number(number) => match Self::integral(*number) {
                Some(integer) => write!(f, "{}", integer),
                None => write!(f, "{}", number),
            },
            DirectiveValue::Text(text) => f.write_str(text),
        }
    }
}

impl Serialize for DirectiveValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DirectiveValue::Bool(flag) => serializer.serialize_bool(*flag),
            DirectiveValue::Number(number) => match Self::integral(*number) {
                Some(integer) => serializer.serialize_i64(integer),
                None => serializer.serialize_f64(*number),
            },
            DirectiveValue::Text(text) => serializer.serialize_str(text),
        }
    }
}

impl From<bool> for DirectiveValue {
    fn from(flag: bool) -> Self {
        DirectiveValue::Bool(flag)
    }
}

impl From<f64> for DirectiveValue {
    fn from(number: f64) -> Self {
        DirectiveValue::Number(number)
    }
}

impl From<&str> for DirectiveValue {
    fn from(text: &str) -> Self {
        DirectiveValue::Text(text.to_string())
    }
}

/// Insertion-ordered directive map. Re-inserting a key overwrites the value
/// but keeps the key's original position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Directives(IndexMap<String, DirectiveValue>);

impl Directives {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&DirectiveValue> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<DirectiveValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DirectiveValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// A fresh map holding `self` overlaid with `local`; local wins on collision.
    pub fn merged_with(&self, local: &Directives) -> Directives {
        let mut merged = self.clone();
        for (key, value) in local.iter() {
            merged.insert(key, value.clone());
        }
        merged
    }

    /// The value for `key` when it is present and truthy.
    pub fn truthy(&self, key: &str) -> Option<&DirectiveValue> {
        self.get(key).filter(|value| value.is_truthy())
    }

    pub fn is_truthy(&self, key: &str) -> bool {
        self.truthy(key).is_some()
    }

    pub fn theme(&self) -> Option<&DirectiveValue> {
        self.truthy("theme")
    }

    pub fn background_color(&self) -> Option<&DirectiveValue> {
        self.truthy("backgroundColor").or_else(|| self.truthy("bg"))
    }

    pub fn background_image(&self) -> Option<&DirectiveValue> {
        self.truthy("backgroundImage")
            .or_else(|| self.truthy("bgImage"))
    }

    pub fn text_color(&self) -> Option<&DirectiveValue> {
        self.truthy("color")
    }

    pub fn class(&self) -> Option<&DirectiveValue> {
        self.truthy("class")
    }
}

impl<K: Into<String>> FromIterator<(K, DirectiveValue)> for Directives {
    fn from_iter<I: IntoIterator<Item = (K, DirectiveValue)>>(iter: I) -> Self {
        let mut directives = Directives::new();
        for (key, value) in iter {
            directives.insert(key, value);
        }
        directives
    }
}

/// Result of scanning a document head for a frontmatter block.
#[derive(Debug, Clone, PartialEq)]
pub struct Frontmatter<'a> {
    /// Global directives; empty when the document has no frontmatter.
    pub directives: Directives,
    /// Document text following the frontmatter's closing marker.
    pub body: &'a str,
}

/// True for a line made only of three or more hyphens once trimmed.
pub fn is_break_marker(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 3 && trimmed.bytes().all(|b| b == b'-')
}

/// Lines of `text` with the byte offset where each starts. Line terminators
/// stay attached to their line.
pub(crate) fn lines_with_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split_inclusive('\n').scan(0usize, |offset, line| {
        let start = *offset;
        *offset += line.len();
        Some((start, line))
    })
}

/// Extract the frontmatter block from the head of a document.
///
/// The block opens with a break marker (after optional blank lines) and
/// runs to the next break marker. It only counts as frontmatter when at
/// least one of its lines is a `key: value` pair; otherwise the document is
/// returned untouched and the leading marker is left for slide splitting.
/// Once a block qualifies, its other lines (headings, prose) are discarded
/// with it and never reach a slide.
pub fn extract_frontmatter(document: &str) -> Frontmatter<'_> {
    let none = Frontmatter {
        directives: Directives::new(),
        body: document,
    };

    let mut lines = lines_with_offsets(document).skip_while(|(_, line)| line.trim().is_empty());

    match lines.next() {
        Some((_, line)) if is_break_marker(line) => {}
        _ => return none,
    }

    let mut block_start = None;
    for (offset, line) in lines {
        let start = *block_start.get_or_insert(offset);
        if is_break_marker(line) {
            let directives = parse_frontmatter(&document[start..offset]);
            if directives.is_empty() {
                debug!("Leading block has no key/value lines, treating it as a slide");
                return none;
            }
            debug!("Parsed {} global directives from frontmatter", directives.len());
            return Frontmatter {
                directives,
                body: &document[offset + line.len()..],
            };
        }
    }

    none
}

/// Parse `key: value` lines of a frontmatter block. Lines that do not have
/// that shape are ignored.
pub fn parse_frontmatter(block: &str) -> Directives {
    let mut directives = Directives::new();
    for line in block.lines() {
        match KEY_VALUE_LINE.captures(line) {
            Some(caps) => {
                directives.insert(caps[1].trim(), DirectiveValue::coerce(&caps[2]));
            }
            None => trace!("Ignoring frontmatter line {:?}", line),
        }
    }
    directives
}

/// Remove every `<!-- key: value -->` comment from a slide and collect the
/// directives in scan order; a repeated key keeps its last value.
pub fn extract_slide_directives(text: &str) -> (String, Directives) {
    let mut directives = Directives::new();
    for caps in INLINE_DIRECTIVE.captures_iter(text) {
        directives.insert(&caps[1], DirectiveValue::coerce(&caps[2]));
    }
    let content = INLINE_DIRECTIVE.replace_all(text, "");
    (content.trim().to_string(), directives)
}
