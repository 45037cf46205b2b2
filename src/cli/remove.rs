use super::output;
use super::Context;
use lpm::core::LpmResult;
use lpm::package::DependencyList;

pub fn run(ctx: &Context<'_>, names: &[String]) -> LpmResult<()> {
    let mut engine = ctx.open()?;

    let mut dependencies = if ctx.tracks_manifest() && ctx.manifest.exists() {
        Some(DependencyList::from_records(ctx.manifest.read()?))
    } else {
        None
    };

    for outcome in engine.remove_all(names) {
        match outcome.result {
            Ok(version) => {
                ctx.presenter
                    .line(&output::removed(version.artifact_filename()));
                if let Some(dependencies) = dependencies.as_mut() {
                    dependencies.remove(&outcome.subject);
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
