use super::output;
use super::Context;
use lpm::core::LpmResult;
use lpm::package::{DependencyList, DependencyRecord, PackageSpec};

/// Install each spec into the classpath; local installs are recorded in liquibase.json
pub async fn run(ctx: &Context<'_>, specs: &[String]) -> LpmResult<()> {
    let mut engine = ctx.open()?;
    ctx.hint_if_catalog_empty(&engine);

    let mut dependencies = if ctx.tracks_manifest() {
        Some(DependencyList::from_records(ctx.manifest.read()?))
    } else {
        None
    };

    for outcome in engine.add_all(specs).await {
        match outcome.result {
            Ok(version) => {
                ctx.presenter
                    .line(&output::installed(version.artifact_filename()));
                if let Some(dependencies) = dependencies.as_mut() {
                    let name = PackageSpec::parse(&outcome.subject)?.name;
                    dependencies.add(DependencyRecord::new(&name, &version.tag));
                }
            }
            Err(e) => ctx.presenter.error(&e.to_string()),
        }
    }

    if let Some(dependencies) = dependencies {
        ctx.manifest.write(dependencies.records())?;
        if engine.requires_java_opts_hint() {
            ctx.presenter
                .show(&output::java_opts_hint(engine.classpath_dir()));
        }
    }

    Ok(())
}
