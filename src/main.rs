// ABOUTME: Main entry point for the marp-slides program.
// ABOUTME: Provides the CLI and dispatches to the parsing and export library.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use marp_slides::{Config, MarpParser, html, utils, watch};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a standalone HTML deck from markdown
    Html(HtmlArgs),

    /// Print the parsed slides as JSON
    Json(JsonArgs),

    /// Report empty slides, unsupported directives and malformed images
    Validate(InputArgs),

    /// Print the heading/list/paragraph structure of every slide
    Outline(InputArgs),

    /// Rebuild the HTML deck whenever the markdown changes
    Watch(WatchArgs),
}

#[derive(Args)]
struct InputArgs {
    /// Path to the markdown file
    #[arg(short, long)]
    input: PathBuf,

    /// Theme applied to slides without a theme directive
    #[arg(short, long)]
    theme: Option<String>,
}

#[derive(Args)]
struct ExportArgs {
    /// Document title (defaults to the first heading)
    #[arg(long)]
    title: Option<String>,

    /// CSS files to include (local paths or URLs)
    #[arg(long, value_delimiter = ',')]
    css: Option<Vec<String>>,

    /// JavaScript files to include (local paths or URLs)
    #[arg(long, value_delimiter = ',')]
    js: Option<Vec<String>>,

    /// Mode for CSS/JS: 'embed' to inline content or 'link' to reference it
    #[arg(long, default_value = "embed")]
    mode: String,
}

#[derive(Args)]
struct HtmlArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Path to output HTML file
    #[arg(short, long)]
    output: PathBuf,

    #[command(flatten)]
    export: ExportArgs,
}

#[derive(Args)]
struct JsonArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Write JSON here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct WatchArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Path to output HTML file
    #[arg(short, long)]
    output: PathBuf,

    #[command(flatten)]
    export: ExportArgs,

    /// Serve the output with live reload
    #[arg(long)]
    serve: bool,

    /// Port for the preview server
    #[arg(long)]
    port: Option<u16>,
}

fn embed_mode(mode: &str) -> anyhow::Result<bool> {
    match mode {
        "embed" => Ok(true),
        "link" => Ok(false),
        other => anyhow::bail!("Unknown resource mode '{}', expected 'embed' or 'link'", other),
    }
}

fn html_options(
    config: &Config,
    input: &InputArgs,
    export: &ExportArgs,
) -> anyhow::Result<html::HtmlOptions> {
    Ok(config.html_options(
        export.title.clone(),
        input.theme.clone(),
        export.css.clone(),
        export.js.clone(),
        Some(embed_mode(&export.mode)?),
    ))
}

fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    match cli.command {
        Commands::Html(args) => {
            let options = html_options(&config, &args.input, &args.export)?;
            let html_content = html::generate_html(&args.input.input, &options)?;
            html::write_html_to_file(&html_content, &args.output)?;
            println!("HTML generated successfully: {:?}", args.output);
        }
        Commands::Json(args) => {
            let markdown = utils::read_markdown_file(&args.input.input)?;
            let theme = args.input.theme.unwrap_or(config.default_theme);
            let deck = MarpParser::new().parse_deck(&markdown, &theme);
            let json = if args.pretty {
                deck.to_json_pretty()?
            } else {
                deck.to_json()?
            };
            match args.output {
                Some(path) => {
                    utils::ensure_parent_directory_exists(&path)?;
                    fs::write(&path, json)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                }
                None => println!("{}", json),
            }
        }
        Commands::Validate(args) => {
            let markdown = utils::read_markdown_file(&args.input)?;
            let theme = args.theme.unwrap_or(config.default_theme);
            let deck = MarpParser::new().parse_deck(&markdown, &theme);
            let report = deck.validate();

            for error in &report.errors {
                println!("error: {}", error);
            }
            for warning in &report.warnings {
                println!("warning: {}", warning);
            }
            println!(
                "{} slides, {} errors, {} warnings",
                deck.slide_count(),
                report.errors.len(),
                report.warnings.len()
            );

            if report.has_errors() {
                anyhow::bail!("validation failed");
            }
        }
        Commands::Outline(args) => {
            let markdown = utils::read_markdown_file(&args.input)?;
            let theme = args.theme.unwrap_or(config.default_theme);
            for slide in MarpParser::new().parse(&markdown, &theme) {
                println!("Slide {} [{}]", slide.index + 1, slide.classes.join(" "));
                for line in slide.outline() {
                    println!("  {:?}: {}", line.kind, line.text);
                }
            }
        }
        Commands::Watch(args) => {
            let options = html_options(&config, &args.input, &args.export)?;
            let watch_config = config.watch_config(
                args.input.input,
                args.output,
                options,
                args.serve,
                args.port,
            );
            if watch_config.serve {
                println!("Serving on http://localhost:{}", watch_config.port);
            }
            watch::watch_markdown(watch_config)?;
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = Config::from_env();
    let result = config
        .validate()
        .map_err(anyhow::Error::from)
        .and_then(|()| run(cli, config));

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
