//! `search` and `update`

use super::TestContext;
use predicates::prelude::*;

#[test]
fn test_search_short_term_fails() {
    let ctx = TestContext::new();
    ctx.lpm()
        .args(["search", "pg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 3 characters"));
}

#[test]
fn test_search_by_name_and_category() {
    let ctx = TestContext::new();

    ctx.lpm()
        .args(["search", "mongo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("liquibase-mongodb"))
        .stdout(predicate::str::contains("postgresql").not());

    ctx.lpm()
        .args(["search", "--category", "driver"])
        .assert()
        .success()
        .stdout(predicate::str::contains("postgresql"));
}

#[test]
fn test_invalid_category_is_rejected() {
    let ctx = TestContext::new();
    ctx.lpm()
        .args(["search", "--category", "plugin"])
        .assert()
        .failure();
}

#[test]
fn test_update_from_file_writes_global_catalog() {
    let ctx = TestContext::new();
    let source = ctx.temp.path().join("new-packages.json");
    std::fs::write(
        &source,
        r#"{"packages":[{"name":"liquibase-redshift","category":"extension","versions":[]}]}"#,
    )
    .unwrap();

    ctx.lpm()
        .args(["update", "-p", source.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Package manifest updated from:"));

    let written = std::fs::read_to_string(ctx.global_libs().join("packages.json")).unwrap();
    assert!(written.contains("liquibase-redshift"));
}

#[test]
fn test_update_rejects_empty_catalog() {
    let ctx = TestContext::new();
    let source = ctx.temp.path().join("empty.json");
    std::fs::write(&source, r#"{"packages":[]}"#).unwrap();

    ctx.lpm()
        .args(["update", "--path", source.to_str().unwrap()])
        .assert()
        .failure();

    let kept = std::fs::read_to_string(ctx.global_libs().join("packages.json")).unwrap();
    assert!(kept.contains("postgresql"));
}

#[test]
fn test_fresh_project_can_add_after_update() {
    let ctx = TestContext::fresh("4.25.0");
    let source_dir = ctx.temp.path().join("download");
    ctx.write_catalog(&source_dir);
    let source = source_dir.join("packages.json");

    ctx.lpm()
        .args(["search", "postgres"])
        .assert()
        .success()
        .stdout(predicate::str::contains("postgresql").not());

    ctx.lpm()
        .args(["update", "-p", source.to_str().unwrap()])
        .assert()
        .success();

    ctx.lpm()
        .args(["add", "postgresql"])
        .assert()
        .success()
        .stdout(predicate::str::contains("postgresql-42.7.3.jar successfully installed"));

    assert_eq!(ctx.jars(&ctx.local_libs()), vec!["postgresql-42.7.3.jar"]);
}

#[test]
fn test_update_refreshes_project_catalog() {
    let ctx = TestContext::new();
    let source = ctx.temp.path().join("new-packages.json");
    std::fs::write(
        &source,
        r#"[{"name":"liquibase-redshift","category":"extension","versions":[]}]"#,
    )
    .unwrap();

    ctx.lpm()
        .args(["update", "-p", source.to_str().unwrap()])
        .assert()
        .success();

    ctx.lpm()
        .args(["search", "redshift"])
        .assert()
        .success()
        .stdout(predicate::str::contains("liquibase-redshift"));
}
