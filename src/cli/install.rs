use super::output;
use super::Context;
use lpm::core::LpmResult;

/// Install every dependency listed in liquibase.json into the local classpath
pub async fn run(ctx: &Context<'_>) -> LpmResult<()> {
    if !ctx.manifest.exists() {
        ctx.presenter.line("No liquibase.json found. Nothing to install.");
        return Ok(());
    }

    let records = ctx.manifest.read()?;
    if records.is_empty() {
        ctx.presenter
            .line("No dependencies in liquibase.json. Nothing to install.");
        return Ok(());
    }

    let mut engine = ctx.open_local()?;
    for outcome in engine.install_from_manifest(&records).await {
        match outcome.result {
            Ok(version) => ctx
                .presenter
                .line(&output::installed(version.artifact_filename())),
            Err(e) => ctx.presenter.error(&e.to_string()),
        }
    }

    if engine.requires_java_opts_hint() {
        ctx.presenter
            .show(&output::java_opts_hint(engine.classpath_dir()));
    }

    Ok(())
}
