use super::output;
use super::Context;
use lpm::core::LpmResult;
use lpm::package::{DependencyList, DependencyRecord};

/// Upgrade the named packages, or every outdated one when no names are given
pub async fn run(ctx: &Context<'_>, names: &[String]) -> LpmResult<()> {
    let mut engine = ctx.open()?;
    ctx.presenter.line(&output::classpath(engine.classpath_dir()));

    let outdated = engine.outdated()?;
    let shown: Vec<_> = outdated
        .packages()
        .iter()
        .filter(|p| names.is_empty() || names.contains(&p.name))
        .cloned()
        .collect();

    let filenames = engine.filenames()?;
    if !shown.is_empty() {
        ctx.presenter.show(&output::format_outdated(
            &shown,
            &filenames,
            &engine.host().version,
        ));
    }
    ctx.presenter.line(&output::outdated_count(shown.len()));

    if ctx.args.dry_run {
        return Ok(());
    }

    let mut dependencies = if ctx.tracks_manifest() && ctx.manifest.exists() {
        Some(DependencyList::from_records(ctx.manifest.read()?))
    } else {
        None
    };

    for outcome in engine.upgrade_all(names).await? {
        match outcome.result {
            Ok(upgrade) => {
                ctx.presenter
                    .line(&output::removed(upgrade.from.artifact_filename()));
                ctx.presenter
                    .line(&output::installed(upgrade.to.artifact_filename()));
                if let Some(dependencies) = dependencies.as_mut() {
                    dependencies.add(DependencyRecord::new(&upgrade.name, &upgrade.to.tag));
                }
            }
            Err(e) => ctx.presenter.error(&e.to_string()),
        }
    }

    if let Some(dependencies) = dependencies {
        ctx.manifest.write(dependencies.records())?;
    }

    Ok(())
}
