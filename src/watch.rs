// ABOUTME: Watch mode that rebuilds the HTML deck whenever the markdown source changes
// ABOUTME: Optionally serves the output over HTTP with a polling auto-reload script

use log::{debug, error, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

use notify::{RecursiveMode, Watcher};
use notify_debouncer_full::new_debouncer;
use tiny_http::{Header, Response, Server, StatusCode};

use crate::errors::{MarpError, Result};
use crate::html::{self, HtmlOptions};
use crate::utils;

/// Endpoint returning a counter bumped on every rebuild.
pub const VERSION_PATH: &str = "/__marp_version";

/// Configuration for watch mode
pub struct WatchConfig {
    /// Markdown document to watch
    pub markdown_path: PathBuf,

    pub html_output: PathBuf,

    pub html_options: HtmlOptions,

    /// Debounce time in milliseconds
    pub debounce_ms: u64,

    /// Serve the output directory over HTTP
    pub serve: bool,

    pub port: u16,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            markdown_path: PathBuf::new(),
            html_output: PathBuf::new(),
            html_options: HtmlOptions::default(),
            debounce_ms: 300,
            serve: false,
            port: 8080,
        }
    }
}

/// Script that reloads the page once the server reports a newer build.
pub fn auto_reload_script() -> String {
    format!(
        r#"<script>
(function() {{
    var seen = null;
    setInterval(function() {{
        fetch('{}', {{ cache: 'no-store' }})
            .then(function(r) {{ return r.text(); }})
            .then(function(v) {{
                if (seen !== null && v !== seen) {{ location.reload(); }}
                seen = v;
            }})
            .catch(function() {{}});
    }}, 1000);
}})();
</script>"#,
        VERSION_PATH
    )
}

fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "html" => "text/html; charset=utf-8",
        "css" => "text/css",
        "js" => "application/javascript",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Serve the directory holding the generated deck
fn start_server(html_path: PathBuf, port: u16, version: Arc<AtomicU64>) -> Result<()> {
    let server = Server::http(format!("0.0.0.0:{}", port))
        .map_err(|e| MarpError::WatchError(format!("Failed to start HTTP server: {}", e)))?;

    let html_dir = match html_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let html_file_name = html_path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    thread::spawn(move || {
        info!("HTTP server listening on http://localhost:{}", port);

        for request in server.incoming_requests() {
            let url_path = request.url().split('?').next().unwrap_or("/").to_string();

            if url_path == VERSION_PATH {
                let response = Response::from_string(version.load(Ordering::SeqCst).to_string());
                if let Err(e) = request.respond(response) {
                    error!("Failed to send response: {}", e);
                }
                continue;
            }

            let file_path = if url_path == "/" {
                html_dir.join(&html_file_name)
            } else {
                html_dir.join(url_path.trim_start_matches('/'))
            };

            debug!("Request for {:?} -> {:?}", url_path, file_path);

            let response = if url_path.contains("..") || !file_path.is_file() {
                Response::from_string("404 Not Found").with_status_code(StatusCode(404))
            } else {
                match fs::read(&file_path) {
                    Ok(content) => {
                        let mut response = Response::from_data(content);
                        if let Ok(header) =
                            Header::from_bytes(&b"Content-Type"[..], content_type(&file_path))
                        {
                            response = response.with_header(header);
                        }
                        response
                    }
                    Err(e) => {
                        error!("Failed to read file {:?}: {}", file_path, e);
                        Response::from_string(format!("Failed to read file: {}", e))
                            .with_status_code(StatusCode(500))
                    }
                }
            };

            if let Err(e) = request.respond(response) {
                error!("Failed to send response: {}", e);
            }
        }
    });

    Ok(())
}

/// Watch a markdown file and rebuild the HTML deck on every relevant change.
/// Blocks until the watcher channel closes.
pub fn watch_markdown(mut config: WatchConfig) -> Result<()> {
    utils::validate_file_exists(&config.markdown_path)?;
    utils::ensure_parent_directory_exists(&config.html_output)?;

    if config.serve {
        config.html_options.auto_reload_script = Some(auto_reload_script());
    }

    let version = Arc::new(AtomicU64::new(0));

    regenerate_outputs(&config)?;
    version.fetch_add(1, Ordering::SeqCst);

    if config.serve {
        start_server(config.html_output.clone(), config.port, version.clone())?;
    }

    let (tx, rx) = mpsc::channel();

    let mut debouncer = new_debouncer(Duration::from_millis(config.debounce_ms), None, tx)
        .map_err(|e| MarpError::WatchError(format!("Failed to create file watcher: {}", e)))?;

    let watch_path = match config.markdown_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let abs_watch_path = utils::get_absolute_path(watch_path)?;

    debouncer
        .watcher()
        .watch(&abs_watch_path, RecursiveMode::Recursive)
        .map_err(|e| {
            MarpError::WatchError(format!(
                "Failed to start watching {:?}: {}",
                abs_watch_path, e
            ))
        })?;

    info!(
        "Watching for changes in {:?} (Press Ctrl+C to stop)",
        abs_watch_path
    );

    for result in rx {
        match result {
            Ok(events) => {
                let relevant = events.iter().any(|event| {
                    event.paths.iter().any(|path| {
                        let is_relevant = is_relevant_path(path, &config);
                        if is_relevant {
                            debug!("Detected relevant change in {:?}", path);
                        }
                        is_relevant
                    })
                });

                if relevant {
                    match regenerate_outputs(&config) {
                        Ok(()) => {
                            version.fetch_add(1, Ordering::SeqCst);
                        }
                        Err(e) => error!("Failed to regenerate outputs: {}", e),
                    }
                }
            }
            Err(errors) => error!("Watch error: {:?}", errors),
        }
    }

    Ok(())
}

/// The markdown source, a local CSS/JS resource, or any markdown/CSS/JS file
fn is_relevant_path(path: &Path, config: &WatchConfig) -> bool {
    let path_abs = match utils::get_absolute_path(path) {
        Ok(p) => p,
        Err(_) => return false,
    };

    let md_path_abs = utils::get_absolute_path(&config.markdown_path)
        .unwrap_or_else(|_| config.markdown_path.clone());

    if path_abs == md_path_abs || path == config.markdown_path {
        return true;
    }

    let path_str = path.to_string_lossy();
    let path_abs_str = path_abs.to_string_lossy();
    let options = &config.html_options;
    let is_resource = options
        .css_files
        .iter()
        .chain(options.js_files.iter())
        .filter(|resource| !resource.is_remote)
        .any(|resource| resource.path == path_str || resource.path == path_abs_str);
    if is_resource {
        return true;
    }

    match path.extension() {
        Some(ext) => {
            let ext = ext.to_string_lossy().to_lowercase();
            ext == "md" || ext == "css" || ext == "js"
        }
        None => false,
    }
}

fn regenerate_outputs(config: &WatchConfig) -> Result<()> {
    info!("Regenerating {:?}", config.html_output);

    let html_content = html::generate_html(&config.markdown_path, &config.html_options)?;
    html::write_html_to_file(&html_content, &config.html_output)?;

    info!("HTML regenerated: {:?}", config.html_output);
    Ok(())
}
