use lpm::core::Version;
use lpm::di::Presenter;
use lpm::package::{Package, PackageVersion};
use std::path::Path;

const BRANCH: &str = "├──";
const LAST_BRANCH: &str = "└──";

/// Writes lines to stdout and errors to stderr
pub struct ConsolePresenter;

impl Presenter for ConsolePresenter {
    fn show(&self, lines: &[String]) {
        for line in lines {
            println!("{}", line);
        }
    }

    fn error(&self, message: &str) {
        eprintln!("{}", message);
    }
}

fn branch(index: usize, len: usize) -> &'static str {
    if index + 1 == len {
        LAST_BRANCH
    } else {
        BRANCH
    }
}

fn with_installed_tag(package: &Package, filenames: &[String]) -> String {
    match package.installed_version(filenames) {
        Some(installed) => format!("{}@{}", package.name, installed.tag),
        None => package.name.clone(),
    }
}

/// Package / category tree, marking installed versions with `@tag`
pub fn format_packages(packages: &[Package], filenames: &[String]) -> Vec<String> {
    let mut lines = vec![format!("{:<4} {:<38} {}", "   ", "Package", "Category")];

    for (i, package) in packages.iter().enumerate() {
        lines.push(format!(
            "{:<4} {:<38} {}",
            branch(i, packages.len()),
            with_installed_tag(package, filenames),
            package.category
        ));
    }

    lines
}

/// Installed vs. available versions for packages with an upgrade
pub fn format_outdated(packages: &[Package], filenames: &[String], host: &Version) -> Vec<String> {
    let mut lines = vec![format!(
        "{:<4} {:<38} {:<12} {}",
        "   ", "Package", "Installed", "Available"
    )];

    for (i, package) in packages.iter().enumerate() {
        let installed = package
            .installed_version(filenames)
            .map(|v| v.tag.as_str())
            .unwrap_or("-");
        let available = package
            .latest_compatible(host)
            .map(|v| v.tag.as_str())
            .unwrap_or("-");

        lines.push(format!(
            "{:<4} {:<38} {:<12} {}",
            branch(i, packages.len()),
            with_installed_tag(package, filenames),
            installed,
            available
        ));
    }

    lines
}

/// Installed versions of one package, highest first
pub fn format_duplicates(name: &str, versions: &[&PackageVersion]) -> Vec<String> {
    let mut lines = vec!["Package".to_string()];
    for (i, version) in versions.iter().enumerate() {
        lines.push(format!(
            "{:<4} {}@{}",
            branch(i, versions.len()),
            name,
            version.tag
        ));
    }
    lines
}

pub fn installed(filename: &str) -> String {
    format!("{} successfully installed in classpath.", filename)
}

pub fn removed(filename: &str) -> String {
    format!("{} successfully removed from classpath.", filename)
}

pub fn classpath(dir: &Path) -> String {
    format!("Classpath: {}", dir.display())
}

pub fn outdated_count(count: usize) -> String {
    match count {
        0 => "All packages are up to date.".to_string(),
        1 => "1 package can be upgraded.".to_string(),
        n => format!("{} packages can be upgraded.", n),
    }
}

/// Liquibase before 4.6.2 only sees a local classpath through JAVA_OPTS
pub fn java_opts_hint(dir: &Path) -> Vec<String> {
    vec![
        String::new(),
        "For Liquibase versions prior to 4.6.2, you need to add the following to your JAVA_OPTS:"
            .to_string(),
        format!("  export JAVA_OPTS=\"-Dliquibase.classpath={}\"", dir.display()),
    ]
}
