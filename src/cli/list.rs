use super::output;
use super::Context;
use lpm::core::LpmResult;

pub fn run(ctx: &Context<'_>) -> LpmResult<()> {
    let mut engine = ctx.open()?;
    ctx.presenter.line(&output::classpath(engine.classpath_dir()));

    let installed = engine.installed()?.filter_by_category(ctx.args.category);
    if installed.is_empty() {
        ctx.presenter.line("No packages installed.");
        return Ok(());
    }

    let filenames = engine.filenames()?;
    ctx.presenter
        .show(&output::format_packages(installed.packages(), &filenames));
    Ok(())
}
