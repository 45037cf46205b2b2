use super::Context;
use lpm::core::LpmResult;
use lpm::resolver::refresh_local_catalog;

/// Replace the catalog in the global classpath from `path` or the configured URL
///
/// The project's own copy, when there is one, gets the same content.
pub async fn run(ctx: &Context<'_>, path: Option<&str>) -> LpmResult<()> {
    let source = path
        .map(str::to_string)
        .unwrap_or_else(|| ctx.container.config().catalog_url().to_string());

    let mut engine = ctx.open_global()?;
    let count = engine.update_catalog(&source).await?;
    if refresh_local_catalog(ctx.container, &ctx.project_root, engine.catalog())? {
        tracing::debug!("Project catalog refreshed");
    }

    ctx.presenter
        .line(&format!("Package manifest updated from: {}", source));
    tracing::debug!("{} packages now available", count);
    Ok(())
}
