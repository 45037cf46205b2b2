//! Project-local classpath commands

use super::TestContext;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    let ctx = TestContext::new();
    ctx.lpm()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("dedupe"));
}

#[test]
fn test_add_installs_and_records() {
    let ctx = TestContext::new();

    ctx.lpm()
        .args(["add", "postgresql", "liquibase-mongodb"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "postgresql-42.7.3.jar successfully installed in classpath.",
        ))
        .stdout(predicate::str::contains("liquibase-mongodb-4.20.0.jar"));

    assert_eq!(
        ctx.jars(&ctx.local_libs()),
        vec!["liquibase-mongodb-4.20.0.jar", "postgresql-42.7.3.jar"]
    );
    let manifest = ctx.manifest();
    assert!(manifest.contains("\"postgresql\": \"42.7.3\""));
    assert!(manifest.contains("\"liquibase-mongodb\": \"4.20.0\""));
}

#[test]
fn test_add_unknown_package_reports_and_continues() {
    let ctx = TestContext::new();

    ctx.lpm()
        .args(["add", "nope", "postgresql@42.6.0"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Package 'nope' not found."));

    assert_eq!(ctx.jars(&ctx.local_libs()), vec!["postgresql-42.6.0.jar"]);
}

#[test]
fn test_add_incompatible_version() {
    let ctx = TestContext::new();

    ctx.lpm()
        .args(["add", "liquibase-mongodb@4.30.0"])
        .assert()
        .success()
        .stderr(predicate::str::contains("requires Liquibase 4.30.0 or higher"));

    assert!(ctx.jars(&ctx.local_libs()).is_empty());
}

#[test]
fn test_remove_updates_manifest() {
    let ctx = TestContext::new();
    ctx.lpm().args(["add", "postgresql"]).assert().success();

    ctx.lpm()
        .args(["rm", "postgresql"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "postgresql-42.7.3.jar successfully removed from classpath.",
        ));

    assert!(ctx.jars(&ctx.local_libs()).is_empty());
    assert!(!ctx.manifest().contains("postgresql"));
}

#[test]
fn test_install_restores_manifest_packages() {
    let ctx = TestContext::new();
    ctx.lpm()
        .args(["add", "postgresql@42.6.0"])
        .assert()
        .success();
    std::fs::remove_file(ctx.local_libs().join("postgresql-42.6.0.jar")).unwrap();

    ctx.lpm().arg("install").assert().success();

    assert_eq!(ctx.jars(&ctx.local_libs()), vec!["postgresql-42.6.0.jar"]);
}

#[test]
fn test_install_without_manifest() {
    let ctx = TestContext::new();
    ctx.lpm()
        .arg("install")
        .assert()
        .success()
        .stdout(predicate::str::contains("No liquibase.json found."));
}

#[test]
fn test_list_shows_installed() {
    let ctx = TestContext::new();
    ctx.place(&ctx.local_libs(), "postgresql-42.6.0.jar");

    ctx.lpm()
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::contains("Classpath:"))
        .stdout(predicate::str::contains("postgresql@42.6.0"));
}

#[test]
fn test_upgrade_dry_run_then_upgrade() {
    let ctx = TestContext::new();
    ctx.place(&ctx.local_libs(), "postgresql-42.6.0.jar");

    ctx.lpm()
        .args(["upgrade", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 package can be upgraded."));
    assert_eq!(ctx.jars(&ctx.local_libs()), vec!["postgresql-42.6.0.jar"]);

    ctx.lpm().arg("up").assert().success();
    assert_eq!(ctx.jars(&ctx.local_libs()), vec!["postgresql-42.7.3.jar"]);
}

#[test]
fn test_dedupe_removes_lower_versions() {
    let ctx = TestContext::new();
    ctx.place(&ctx.local_libs(), "postgresql-42.6.0.jar");
    ctx.place(&ctx.local_libs(), "postgresql-42.7.3.jar");

    ctx.lpm()
        .arg("dedupe")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deduplication complete."));

    assert_eq!(ctx.jars(&ctx.local_libs()), vec!["postgresql-42.7.3.jar"]);
}

#[test]
fn test_old_host_prints_java_opts_hint() {
    let ctx = TestContext::with_host("4.5.0");

    ctx.lpm()
        .args(["add", "postgresql"])
        .assert()
        .success()
        .stdout(predicate::str::contains("JAVA_OPTS"));
}
