//! Resolves a report against a Maven multi-module layout with the
//! configured resolvers.

use jqa_sonar_core::report::parse_report;
use jqa_sonar_core::{Config, IssueEmitter, IssueReport, Scope, SourceRef};
use jqa_sonar_lang::registry_from_config;
use std::path::Path;

const REPORT: &str = r#"{
  "rules": [
    { "kind": "constraint", "id": "naming:Services", "description": "Services must end with Service",
      "severity": "critical",
      "result": { "primary-column": "Type", "rows": [
        [ { "name": "Type", "value": "com.acme.api.Orders",
            "source": { "language": "Java", "element": "Type", "path": "/com/acme/api/Orders.class", "line": 5 } },
          { "name": "Caller", "value": "com.acme.web.Checkout",
            "source": { "language": "Java", "element": "Type", "path": "/com/acme/web/Checkout.class", "line": 12 } } ],
        [ { "name": "Type", "value": "com.acme.web.Cart",
            "source": { "language": "Java", "element": "Type", "path": "/com/acme/web/Cart.class", "line": 0 } } ],
        [ { "name": "Type", "value": "pom.xml",
            "source": { "language": "xml", "element": "Document", "path": "/pom.xml", "line": 3 } } ]
      ] } }
  ]
}"#;

fn touch(root: &Path, file: &str) {
    let path = root.join(file);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, "").unwrap();
}

fn layout() -> tempfile::TempDir {
    let tmp = tempfile::TempDir::new().unwrap();
    touch(tmp.path(), "pom.xml");
    touch(tmp.path(), "api/src/main/java/com/acme/api/Orders.java");
    touch(tmp.path(), "api/src/main/java/com/acme/web/Checkout.java");
    touch(tmp.path(), "web/src/main/java/com/acme/web/Cart.java");
    tmp
}

fn config() -> Config {
    Config::parse(
        r#"
[languages.xml]
resolver = "file"
"#,
    )
    .unwrap()
}

#[test]
fn each_module_reports_its_own_rows() {
    let tmp = layout();
    let config = config();
    let registry = registry_from_config(&config).unwrap();
    let findings = parse_report(REPORT).unwrap();
    let settings = config.emitter_settings();

    let mut api = IssueReport::new();
    let api_scope = Scope::new(tmp.path().join("api"), tmp.path());
    IssueEmitter::with_settings(&registry, &api_scope, settings.clone())
        .process_all(&findings, &mut api)
        .unwrap();
    assert_eq!(api.issues.len(), 1);
    let orders = &api.issues[0];
    assert_eq!(
        orders.message,
        "[naming:Services] Services must end with Service\nCaller=com.acme.web.Checkout"
    );
    assert_eq!(orders.severity.as_str(), "critical");
    let location = orders.location.resolved().unwrap();
    assert_eq!(
        location.resource.path,
        Path::new("src/main/java/com/acme/api/Orders.java")
    );
    assert_eq!(location.line(), Some(5));
    assert_eq!(orders.secondary.len(), 1);
    assert_eq!(orders.secondary[0].message, "Caller=com.acme.web.Checkout");

    let mut web = IssueReport::new();
    let web_scope = Scope::new(tmp.path().join("web"), tmp.path());
    IssueEmitter::with_settings(&registry, &web_scope, settings)
        .process_all(&findings, &mut web)
        .unwrap();
    assert_eq!(web.issues.len(), 1);
    let cart = web.issues[0].location.resolved().unwrap();
    assert_eq!(cart.resource.path, Path::new("src/main/java/com/acme/web/Cart.java"));
    // Line 0 marks the whole file.
    assert_eq!(cart.line(), None);
}

#[test]
fn project_root_resolves_files_and_keeps_module_rows_unlocated() {
    let tmp = layout();
    let config = config();
    let registry = registry_from_config(&config).unwrap();
    let findings = parse_report(REPORT).unwrap();

    let mut report = IssueReport::new();
    let scope = Scope::project(tmp.path());
    let summary = IssueEmitter::with_settings(&registry, &scope, config.emitter_settings())
        .process_all(&findings, &mut report)
        .unwrap();

    assert_eq!(summary.anchored, 1);
    assert_eq!(summary.at_project_root, 2);

    let pom = report
        .issues
        .iter()
        .find_map(|i| i.location.resolved())
        .unwrap();
    assert_eq!(pom.resource.language, "xml");
    assert_eq!(pom.resource.path, Path::new("pom.xml"));
}

#[test]
fn disabled_language_never_resolves() {
    let tmp = layout();
    let config = Config::parse("[languages.java]\nenabled = false\n").unwrap();
    let registry = registry_from_config(&config).unwrap();
    let findings = parse_report(REPORT).unwrap();

    let mut report = IssueReport::new();
    let api_scope = Scope::new(tmp.path().join("api"), tmp.path());
    IssueEmitter::new(&registry, &api_scope)
        .process_all(&findings, &mut report)
        .unwrap();
    assert!(report.issues.is_empty());
}

#[test]
fn package_named_like_an_output_dir_still_resolves() {
    let tmp = tempfile::TempDir::new().unwrap();
    touch(tmp.path(), "src/main/java/org/acme/build/Task.java");
    touch(tmp.path(), "target/classes/org/acme/build/Task.java");
    let registry = registry_from_config(&Config::default()).unwrap();
    let scope = Scope::project(tmp.path());

    let source = SourceRef::new("Java", "/org/acme/build/Task.class", "Type", 4);
    let location = registry
        .resolve(&scope, &source)
        .into_location()
        .expect("source in package `build` resolves");
    assert_eq!(
        location.resource.path,
        Path::new("src/main/java/org/acme/build/Task.java")
    );
    assert_eq!(location.line(), Some(4));

    // Build output at the scope root stays excluded.
    let copied = SourceRef::new("file", "target/classes/org/acme/build/Task.java", "File", 1);
    assert!(registry.resolve(&scope, &copied).into_location().is_none());
}
