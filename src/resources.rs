// ABOUTME: Stylesheet and script resources for exported slide decks
// ABOUTME: Reads local files or fetches remote URLs, then links or inlines them

use crate::errors::{MarpError, Result};
use log::info;
use reqwest::blocking::Client;
use std::fs;
use std::path::Path;
use std::time::Duration;

const FETCH_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Stylesheet,
    Script,
}

impl ResourceKind {
    fn link_tag(self, href: &str) -> String {
        match self {
            ResourceKind::Stylesheet => format!(r#"<link rel="stylesheet" href="{}">"#, href),
            ResourceKind::Script => format!(r#"<script src="{}"></script>"#, href),
        }
    }

    fn inline_tag(self, content: &str) -> String {
        match self {
            ResourceKind::Stylesheet => format!("<style>{}</style>", content),
            ResourceKind::Script => format!("<script>{}</script>", content),
        }
    }
}

/// A stylesheet or script given either as a local path or an http(s) URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFile {
    pub path: String,
    pub is_remote: bool,
}

impl ResourceFile {
    pub fn new(path: &str) -> Self {
        let is_remote = path.starts_with("http://") || path.starts_with("https://");
        Self {
            path: path.to_string(),
            is_remote,
        }
    }

    pub fn from_paths<S: AsRef<str>>(paths: &[S]) -> Vec<Self> {
        paths
            .iter()
            .map(|path| path.as_ref().trim())
            .filter(|path| !path.is_empty())
            .map(Self::new)
            .collect()
    }

    pub fn content(&self) -> Result<String> {
        if self.is_remote {
            self.fetch_remote_content()
        } else {
            self.read_local_content()
        }
    }

    /// Fetch with a 10s timeout, retrying with exponential backoff
    fn fetch_remote_content(&self) -> Result<String> {
        info!("Fetching remote resource: {}", self.path);

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        let mut retry_delay = 1000;
        let mut last_error = None;

        for attempt in 1..=FETCH_ATTEMPTS {
            match client.get(&self.path).send() {
                Ok(response) if response.status().is_success() => {
                    return Ok(response.text()?);
                }
                Ok(response) => {
                    last_error = Some(MarpError::RemoteStatusError {
                        url: self.path.clone(),
                        status: response.status().as_u16(),
                    });
                }
                Err(e) => last_error = Some(MarpError::FetchError(e)),
            }

            if attempt < FETCH_ATTEMPTS {
                info!(
                    "Fetch attempt {} failed, retrying in {} ms",
                    attempt, retry_delay
                );
                std::thread::sleep(Duration::from_millis(retry_delay));
                retry_delay *= 2;
            }
        }

        Err(last_error.unwrap_or_else(|| {
            MarpError::ValidationError(format!("Could not fetch {}", self.path))
        }))
    }

    fn read_local_content(&self) -> Result<String> {
        info!("Reading local resource: {}", self.path);
        let path = Path::new(&self.path);
        if !path.exists() {
            return Err(MarpError::PathNotFoundError(path.to_path_buf()));
        }

        Ok(fs::read_to_string(path)?)
    }

    /// HTML tag for the resource: inlined content when `embed` is set
    /// (fetching remote URLs), a link otherwise.
    pub fn tag(&self, kind: ResourceKind, embed: bool) -> Result<String> {
        if embed {
            Ok(kind.inline_tag(&self.content()?))
        } else {
            Ok(kind.link_tag(&self.path))
        }
    }
}
