use clap::{Parser, Subcommand};
use lpm::di::ServiceContainer;
use lpm::package::{Category, DependencyManifest};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "lpm")]
#[command(about = "Liquibase Package Manager: drivers and extensions for your Liquibase classpath")]
#[command(version)]
struct Cli {
    /// Only consider packages of this category (extension, driver, pro)
    #[arg(long, global = true)]
    category: Option<Category>,

    /// Use the classpath of the Liquibase installation instead of ./liquibase_libs
    #[arg(short = 'g', long, global = true)]
    global: bool,

    /// Show what would change without touching the classpath
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add packages to the classpath (name or name@version)
    Add {
        #[arg(required = true)]
        packages: Vec<String>,
    },
    /// Install the packages recorded in liquibase.json
    Install,
    /// Remove packages from the classpath
    #[command(alias = "rm")]
    Remove {
        #[arg(required = true)]
        packages: Vec<String>,
    },
    /// List installed packages
    #[command(alias = "ls")]
    List,
    /// Search the package catalog
    Search {
        /// Part of a package name (at least 3 characters)
        term: Option<String>,
    },
    /// Refresh the package catalog
    Update {
        /// URL or file to load the catalog from instead of the configured URL
        #[arg(short, long)]
        path: Option<String>,
    },
    /// Upgrade installed packages to their latest compatible version
    #[command(alias = "up")]
    Upgrade { packages: Vec<String> },
    /// Remove all but the highest installed version of each package
    Dedupe,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let container = match ServiceContainer::new() {
        Ok(container) => container,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let project_root = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Failed to determine current directory: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let presenter = cli::output::ConsolePresenter;
    let manifest = DependencyManifest::in_project(&project_root);
    let ctx = cli::Context {
        container: &container,
        presenter: &presenter,
        manifest: &manifest,
        project_root,
        args: cli::GlobalArgs {
            category: cli.category,
            global: cli.global,
            dry_run: cli.dry_run,
        },
    };

    let result = match cli.command {
        Commands::Add { packages } => cli::add::run(&ctx, &packages).await,
        Commands::Install => cli::install::run(&ctx).await,
        Commands::Remove { packages } => cli::remove::run(&ctx, &packages),
        Commands::List => cli::list::run(&ctx),
        Commands::Search { term } => cli::search::run(&ctx, term.as_deref()),
        Commands::Update { path } => cli::update::run(&ctx, path.as_deref()).await,
        Commands::Upgrade { packages } => cli::upgrade::run(&ctx, &packages).await,
        Commands::Dedupe => cli::dedupe::run(&ctx),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
