pub mod add;
pub mod dedupe;
pub mod install;
pub mod list;
pub mod output;
pub mod remove;
pub mod search;
pub mod update;
pub mod upgrade;

use lpm::di::{ManifestStore, Presenter, ServiceContainer};
use lpm::package::Category;
use lpm::resolver::{ClasspathScope, ResolutionEngine};
use std::path::PathBuf;

/// Flags shared by every subcommand
#[derive(Debug, Clone, Default)]
pub struct GlobalArgs {
    pub category: Option<Category>,
    pub global: bool,
    pub dry_run: bool,
}

/// Everything a command needs besides its own arguments
pub struct Context<'a> {
    pub container: &'a ServiceContainer,
    pub presenter: &'a dyn Presenter,
    pub manifest: &'a dyn ManifestStore,
    pub project_root: PathBuf,
    pub args: GlobalArgs,
}

impl Context<'_> {
    pub fn scope(&self) -> ClasspathScope {
        if self.args.global {
            ClasspathScope::Global
        } else {
            ClasspathScope::Local(self.project_root.clone())
        }
    }

    /// Whether installs are tracked in `liquibase.json`
    pub fn tracks_manifest(&self) -> bool {
        !self.args.global
    }

    pub fn open(&self) -> lpm::LpmResult<ResolutionEngine> {
        lpm::resolver::open(self.container, &self.scope())
    }

    /// `install` always targets the project classpath
    pub fn open_local(&self) -> lpm::LpmResult<ResolutionEngine> {
        lpm::resolver::open(
            self.container,
            &ClasspathScope::Local(self.project_root.clone()),
        )
    }

    pub fn open_global(&self) -> lpm::LpmResult<ResolutionEngine> {
        lpm::resolver::open(self.container, &ClasspathScope::Global)
    }

    /// Point at `lpm update` when only the empty bundled catalog is available
    pub fn hint_if_catalog_empty(&self, engine: &ResolutionEngine) {
        if engine.catalog().is_empty() {
            self.presenter
                .line("Package catalog is empty. Run `lpm update` to download it.");
        }
    }
}
