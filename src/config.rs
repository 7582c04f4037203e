// ABOUTME: Configuration module for the marp-slides application
// ABOUTME: Provides defaults, environment variable handling and per-command option builders

use crate::errors::{MarpError, Result};
use crate::html::HtmlOptions;
use crate::parser::DEFAULT_THEME;
use crate::resources::ResourceFile;
use crate::watch::WatchConfig;
use std::env;
use std::path::PathBuf;

/// Application-wide defaults
#[derive(Debug, Clone)]
pub struct Config {
    pub default_theme: String,
    pub css_files: Vec<String>,
    pub js_files: Vec<String>,
    pub embed_resources: bool,
    pub debounce_ms: u64,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_theme: DEFAULT_THEME.to_string(),
            css_files: Vec::new(),
            js_files: Vec::new(),
            embed_resources: true,
            debounce_ms: 300,
            port: 8080,
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let default_theme = env::var("MARP_THEME")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.default_theme);
        let css_files = env::var("MARP_CSS")
            .map(|s| split_list(&s))
            .unwrap_or_default();
        let js_files = env::var("MARP_JS")
            .map(|s| split_list(&s))
            .unwrap_or_default();
        let embed_resources = env::var("EMBED_RESOURCES")
            .ok()
            .map(|s| s.to_lowercase() != "false")
            .unwrap_or(defaults.embed_resources);
        let debounce_ms = env::var("WATCH_DEBOUNCE_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(defaults.debounce_ms);
        let port = env::var("MARP_PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(defaults.port);

        Self {
            default_theme,
            css_files,
            js_files,
            embed_resources,
            debounce_ms,
            port,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_theme.trim().is_empty() {
            return Err(MarpError::ConfigError("theme name must not be empty".into()));
        }
        if self.port == 0 {
            return Err(MarpError::ConfigError("port must be non-zero".into()));
        }
        Ok(())
    }

    /// HTML export options, command-line values taking precedence
    pub fn html_options(
        &self,
        title: Option<String>,
        theme: Option<String>,
        css: Option<Vec<String>>,
        js: Option<Vec<String>>,
        embed_resources: Option<bool>,
    ) -> HtmlOptions {
        HtmlOptions {
            title,
            theme: theme.unwrap_or_else(|| self.default_theme.clone()),
            css_files: ResourceFile::from_paths(&css.unwrap_or_else(|| self.css_files.clone())),
            js_files: ResourceFile::from_paths(&js.unwrap_or_else(|| self.js_files.clone())),
            embed_resources: embed_resources.unwrap_or(self.embed_resources),
            auto_reload_script: None,
        }
    }

    pub fn watch_config(
        &self,
        markdown_path: PathBuf,
        html_output: PathBuf,
        html_options: HtmlOptions,
        serve: bool,
        port: Option<u16>,
    ) -> WatchConfig {
        WatchConfig {
            markdown_path,
            html_output,
            html_options,
            debounce_ms: self.debounce_ms,
            serve,
            port: port.unwrap_or(self.port),
        }
    }
}
