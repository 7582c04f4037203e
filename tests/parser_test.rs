use marp_slides::{DirectiveValue, MarpParser, parse};

#[test]
fn test_three_headings_make_three_section_slides() {
    let slides = parse("# A\n\n---\n\n# B\n\n---\n\n# C", "default");

    assert_eq!(slides.len(), 3);
    for (position, slide) in slides.iter().enumerate() {
        assert_eq!(slide.index, position);
        assert_eq!(slide.classes, vec!["title-slide", "section-slide"]);
        assert_eq!(slide.theme, "default");
    }
    assert!(slides[1].html.contains("<h1>B</h1>"));
}

#[test]
fn test_marker_count_determines_slide_count() {
    let document = (0..7)
        .map(|i| format!("Slide {}\n", i))
        .collect::<Vec<_>>()
        .join("---\n");
    let slides = parse(&document, "default");

    assert_eq!(slides.len(), 7);
    assert!(slides.iter().enumerate().all(|(i, s)| s.index == i));
}

#[test]
fn test_frontmatter_sets_global_directives() {
    let slides = parse("---\ntheme: dark\npaginate: true\n---\n\n# Hello", "default");

    assert_eq!(slides.len(), 1);
    let slide = &slides[0];
    assert_eq!(slide.directives.get("theme"), Some(&DirectiveValue::from("dark")));
    assert_eq!(slide.directives.get("paginate"), Some(&DirectiveValue::Bool(true)));
    assert_eq!(slide.theme, "dark");
    assert!(slide.html.contains("<div class=\"pagination\">1</div>"));
}

#[test]
fn test_global_directives_reach_every_slide() {
    let slides = parse(
        "---\ncolor: navy\npaginate: true\n---\n# One\n---\n<!-- paginate: false -->\nTwo\n---\nThree",
        "default",
    );

    assert_eq!(slides.len(), 3);
    for slide in &slides {
        assert_eq!(slide.directives.get("color"), Some(&DirectiveValue::from("navy")));
    }
    assert!(!slides[1].html.contains("class=\"pagination\""));
    assert_eq!(
        slides[2].directives.get("paginate"),
        Some(&DirectiveValue::Bool(true))
    );
    assert!(slides[2].html.contains("<div class=\"pagination\">3</div>"));
}

#[test]
fn test_theme_directive_applies_to_its_slide_only() {
    let slides = parse("# 1\n---\n# 2\n---\n# 3\n<!-- theme: gaia -->\n---\n# 4", "cenia");

    assert_eq!(slides[2].theme, "gaia");
    assert_eq!(slides[0].theme, "cenia");
    assert_eq!(slides[1].theme, "cenia");
    assert_eq!(slides[3].theme, "cenia");
}

#[test]
fn test_title_without_section_for_four_lines() {
    let slides = parse("# X\n\nline one\n\nline two\n\nline three", "default");
    assert_eq!(slides[0].classes, vec!["title-slide"]);
}

#[test]
fn test_warning_blockquote_becomes_callout() {
    let slides = parse("> **Warning:** Disk full", "default");
    let html = &slides[0].html;

    assert!(html.contains("<div class=\"warning\">"));
    assert!(html.contains("<p>Disk full</p>"));
    assert!(!html.contains("<strong>Warning:</strong>"));
}

#[test]
fn test_columns_render_markdown_inside() {
    let slides = parse("## Left\n\n<!-- split -->\n\n## Right", "default");
    let html = &slides[0].html;

    assert!(html.starts_with("<div class=\"columns\">"));
    assert!(html.contains("<h2>Left</h2>"));
    assert!(html.contains("<h2>Right</h2>"));
}

#[test]
fn test_sized_image_passes_through_renderer() {
    let slides = parse("![logo w:120](logo.png)", "default");
    assert!(slides[0]
        .html
        .contains(r#"<img src="logo.png" alt="logo " style="width: 120px;">"#));
}

#[test]
fn test_blank_document_has_no_slides() {
    assert!(parse("", "default").is_empty());
    assert!(parse("\n---\n   \n---\n", "default").is_empty());
}

#[test]
fn test_parse_is_repeatable() {
    let document = "---\npaginate: true\nclass: lead\n---\n# Title\n---\n![bg](a.jpg)\n<!-- color: red -->\nBody text\n";
    let parser = MarpParser::new();

    let first = parser.parse(document, "default");
    let second = parser.parse(document, "default");
    assert_eq!(first, second);
}

#[test]
fn test_success_blockquote_becomes_callout() {
    let slides = parse("> **Success:** Deployed", "default");
    let html = &slides[0].html;

    assert!(html.contains("<div class=\"success\"><h3>✅ Success</h3><p>Deployed</p></div>"));
    assert!(!html.contains("<blockquote>"));
}

#[test]
fn test_wrapper_spanning_columns_keeps_columns_apart() {
    let slides = parse(
        "<!-- center -->\nLeft\n<!-- split -->\nRight\n<!-- /center -->",
        "default",
    );
    let html = &slides[0].html;

    assert!(html.starts_with("<div class=\"columns\">"));
    assert!(html.contains("<p>Left</p>\n</div>\n<div>\n<p>Right</p>"));
    assert!(!html.contains("class=\"center\""));
}
