use super::output;
use super::Context;
use lpm::core::LpmResult;
use lpm::resolver::ResolutionEngine;

pub fn run(ctx: &Context<'_>) -> LpmResult<()> {
    let mut engine = ctx.open()?;
    dedupe_with(ctx, &mut engine)
}

fn dedupe_with(ctx: &Context<'_>, engine: &mut ResolutionEngine) -> LpmResult<()> {
    if engine.installed()?.is_empty() {
        ctx.presenter.line("No packages installed.");
        return Ok(());
    }

    let reports = engine.dedupe(ctx.args.dry_run)?;
    if reports.is_empty() {
        ctx.presenter.line("No duplicate packages found.");
        return Ok(());
    }

    for report in &reports {
        let versions: Vec<_> = std::iter::once(&report.kept)
            .chain(report.duplicates.iter())
            .collect();
        ctx.presenter
            .show(&output::format_duplicates(&report.name, &versions));

        for outcome in &report.removed {
            match &outcome.result {
                Ok(_) => ctx.presenter.line(&output::removed(&outcome.subject)),
                Err(e) => ctx.presenter.error(&e.to_string()),
            }
        }
    }

    ctx.presenter.line("Deduplication complete.");
    Ok(())
}
