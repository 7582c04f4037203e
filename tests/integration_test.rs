use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_command(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_marp-slides"))
        .args(args)
        .env_remove("MARP_THEME")
        .env_remove("MARP_CSS")
        .env_remove("MARP_JS")
        .output()
        .expect("Failed to execute command")
}

const DECK: &str = "---\ntheme: dark\npaginate: true\n---\n\n# Welcome\n\n---\n\n## Agenda\n\n- One\n- Two\n\n---\n\n<!-- transition: fade -->\n> **Warning:** Disk full\n";

#[test]
fn test_html_command() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let temp_path = temp_dir.path();

    let markdown_path = temp_path.join("deck.md");
    fs::write(&markdown_path, DECK).expect("Failed to write markdown file");

    let css_path = temp_path.join("extra.css");
    fs::write(&css_path, "h1 { color: teal; }").expect("Failed to write CSS file");

    let output_path = temp_path.join("out").join("deck.html");

    let output = run_command(&[
        "html",
        "-i",
        markdown_path.to_str().unwrap(),
        "-o",
        output_path.to_str().unwrap(),
        "--css",
        css_path.to_str().unwrap(),
    ]);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(output_path.exists(), "Output file was not created");

    let html = fs::read_to_string(&output_path).expect("Failed to read output file");
    assert!(html.contains("<title>Welcome</title>"));
    assert!(html.contains("<h1>Welcome</h1>"));
    assert!(html.contains("<style>h1 { color: teal; }</style>"));
    assert!(html.contains("data-theme=\"dark\""));
    assert!(html.contains("<div class=\"pagination\">3</div>"));
    assert!(html.contains("<div class=\"warning\"><h3>⚠️ Warning</h3><p>Disk full</p></div>"));
}

#[test]
fn test_html_command_link_mode() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let markdown_path = temp_dir.path().join("deck.md");
    fs::write(&markdown_path, "# Only").expect("Failed to write markdown file");
    let output_path = temp_dir.path().join("deck.html");

    let output = run_command(&[
        "html",
        "-i",
        markdown_path.to_str().unwrap(),
        "-o",
        output_path.to_str().unwrap(),
        "--css",
        "theme.css",
        "--mode",
        "link",
        "--title",
        "Linked",
    ]);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let html = fs::read_to_string(&output_path).expect("Failed to read output file");
    assert!(html.contains(r#"<link rel="stylesheet" href="theme.css">"#));
    assert!(html.contains("<title>Linked</title>"));
}

#[test]
fn test_json_command() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let markdown_path = temp_dir.path().join("deck.md");
    fs::write(&markdown_path, DECK).expect("Failed to write markdown file");

    let output = run_command(&["json", "-i", markdown_path.to_str().unwrap()]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(value["slideCount"], 3);
    assert_eq!(value["globalDirectives"]["theme"], "dark");
    assert_eq!(value["slides"][2]["directives"]["transition"], "fade");
    assert_eq!(value["slides"][0]["classes"][0], "title-slide");
}

#[test]
fn test_validate_command_reports_warnings() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let markdown_path = temp_dir.path().join("deck.md");
    fs::write(&markdown_path, DECK).expect("Failed to write markdown file");

    let output = run_command(&["validate", "-i", markdown_path.to_str().unwrap()]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("warning: Slide 3: Unsupported directive: transition"));
    assert!(stdout.contains("3 slides, 0 errors, 1 warnings"));
}

#[test]
fn test_missing_input_fails() {
    let output = run_command(&["validate", "-i", "/no/such/deck.md"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Path not found"));
}

#[test]
fn test_outline_command() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let markdown_path = temp_dir.path().join("deck.md");
    fs::write(&markdown_path, DECK).expect("Failed to write markdown file");

    let output = run_command(&["outline", "-i", markdown_path.to_str().unwrap()]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Slide 1 [title-slide section-slide]"));
    assert!(stdout.contains("Heading { level: 2 }: Agenda"));
    assert!(stdout.contains("ListItem { ordered: false }: Two"));
}
