use std::io::Write;

use lectern_types::{Article, ArticleError, Block, validate_registry};

fn write_fixture(extension: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(extension)
        .tempfile()
        .expect("create temp article");
    file.write_all(contents.as_bytes()).expect("write temp article");
    file
}

#[test]
fn loads_yaml_file_in_declared_order() {
    let file = write_fixture(
        ".yaml",
        "title: Stars\nsections:\n  - id: b\n    label: Second letter\n  - id: a\n    label: First letter\n    blocks:\n      - kind: quote\n        text: Look up.\n",
    );
    let article = Article::load_from_path(file.path()).expect("load yaml");
    let registry = article.registry();
    let ids: Vec<_> = registry.ids().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"], "registry must follow file order");
    assert_eq!(
        article.section("a").map(|s| s.blocks.clone()),
        Some(vec![Block::Quote {
            text: "Look up.".into(),
            citation: None
        }])
    );
}

#[test]
fn loads_json_by_extension() {
    let file = write_fixture(
        ".json",
        r#"{"title":"Rain","sections":[{"id":"intro","label":"Intro"},{"id":"intro","label":"Again"}]}"#,
    );
    let article = Article::load_from_path(file.path()).expect("load json");
    let issues = validate_registry(&article.registry());
    assert_eq!(issues.len(), 1, "duplicate id should be reported: {:?}", issues);
}

#[test]
fn missing_file_reports_path() {
    let error = Article::load_from_path(std::path::Path::new("/definitely/not/here.yaml")).expect_err("missing file");
    assert!(matches!(error, ArticleError::Io { .. }));
    assert!(error.to_string().contains("/definitely/not/here.yaml"), "got: {}", error);
}
