//! Integration tests for definition-file discovery.
//!
//! Each test lays out a scratch site in a temporary directory and runs the
//! registration layer against it.

use std::fs;
use std::path::Path;

use serde_json::json;
use vitrine_core::{render_to_html, Node, Registry};
use vitrine_modules::{discovery::find_definition_files, ModuleCatalog, ModuleError};

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn scratch_site() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(
        root,
        "components/nav/nav-link.yaml",
        r#"
component: nav-link
body:
  a:
    href: "{{href}}"
    class: nav-link
    content: "{{label}}"
"#,
    );
    write(
        root,
        "components/site-footer.json",
        r#"{ "component": "site-footer", "body": { "footer": { "content": "(c) {{year}}" } } }"#,
    );
    write(root, "components/broken.yaml", "component: [unclosed\n");
    write(root, "components/notes.txt", "not a definition");
    write(
        root,
        "templates/main-layout.yml",
        r#"
template: main-layout
body:
  div:
    class: container
    content:
      - nav-link: { href: /home, label: Home }
      - main: { content: { slot: {} } }
      - site-footer: { year: 2025 }
"#,
    );
    write(
        root,
        "pages/about.yaml",
        r#"
route: /about
css: styles/about.css
template: main-layout
body:
  h1: { content: About }
"#,
    );
    dir
}

// =============================================================================
// Discovery
// =============================================================================

#[test]
fn test_finds_only_definition_files_recursively() {
    let site = scratch_site();
    let files = find_definition_files(&site.path().join("components"));
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["broken.yaml", "nav-link.yaml", "site-footer.json"]);
}

#[test]
fn test_missing_directories_are_empty() {
    let site = tempfile::tempdir().unwrap();
    assert!(find_definition_files(&site.path().join("components")).is_empty());

    let mut registry = Registry::new();
    let report = ModuleCatalog::new().register_all(site.path(), &mut registry);
    assert_eq!(report.loaded(), 0);
    assert!(report.failures.is_empty());
}

#[test]
fn test_broken_file_does_not_stop_loading() {
    let site = scratch_site();
    let mut registry = Registry::new();
    let report = ModuleCatalog::new().register_all(site.path(), &mut registry);

    assert_eq!(report.components, 2);
    assert_eq!(report.templates, 1);
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].module.ends_with("broken.yaml"));
    assert!(matches!(report.failures[0].error, ModuleError::Parse { .. }));

    assert_eq!(registry.component_names(), vec!["nav-link", "site-footer"]);
    assert_eq!(registry.template_names(), vec!["main-layout"]);
}

// =============================================================================
// Pages from files
// =============================================================================

#[test]
fn test_page_file_renders_through_layout_and_components() {
    let site = scratch_site();
    let catalog = ModuleCatalog::new();
    let mut registry = Registry::new();
    catalog.register_all(site.path(), &mut registry);

    let page = catalog.load_page("pages/about.yaml", site.path()).unwrap();
    assert_eq!(page.css(), Some("styles/about.css"));
    registry.register_page(page).unwrap();

    let page = registry.page("/about").unwrap();
    let body = page.render(&registry).unwrap();
    let html = render_to_html(&body, &registry).unwrap();
    assert_eq!(
        html,
        concat!(
            r#"<div class="container">"#,
            r#"<a href="/home" class="nav-link">Home</a>"#,
            r#"<main><h1>About</h1></main>"#,
            r#"<footer>(c) 2025</footer>"#,
            r#"</div>"#
        )
    );
}

#[test]
fn test_page_source_that_is_not_a_definition_file() {
    let site = scratch_site();
    write(site.path(), "pages/home-page.ts", "export class HomePage {}");
    let err = ModuleCatalog::new()
        .load_page("pages/home-page.ts", site.path())
        .unwrap_err();
    assert!(matches!(err, ModuleError::UnknownPage { .. }));
}

#[test]
fn test_code_component_can_be_overridden_by_file() {
    let site = scratch_site();
    let catalog = ModuleCatalog::new().component(
        "nav-link",
        |_: &vitrine_core::Props, _: &Registry| -> Result<Node, vitrine_core::RenderError> {
            Ok(Node::text("code"))
        },
    );
    let mut registry = Registry::new();
    catalog.register_all(site.path(), &mut registry);

    let html = render_to_html(
        &Node::from(json!({ "nav-link": { "href": "/x", "label": "X" } })),
        &registry,
    )
    .unwrap();
    assert_eq!(html, r#"<a href="/x" class="nav-link">X</a>"#);
}
