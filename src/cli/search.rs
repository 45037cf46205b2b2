use super::output;
use super::Context;
use lpm::core::{LpmError, LpmResult};

const MIN_TERM_LEN: usize = 3;

pub fn run(ctx: &Context<'_>, term: Option<&str>) -> LpmResult<()> {
    let term = term.map(str::trim).unwrap_or_default();
    if !term.is_empty() && term.chars().count() < MIN_TERM_LEN {
        return Err(LpmError::InvalidSpec(format!(
            "Search term must be at least {} characters.",
            MIN_TERM_LEN
        )));
    }

    let mut engine = ctx.open()?;
    ctx.hint_if_catalog_empty(&engine);

    let results = engine.search(term, ctx.args.category);
    if results.is_empty() {
        ctx.presenter.line("No results found.");
        return Ok(());
    }

    let filenames = engine.filenames()?;
    ctx.presenter
        .show(&output::format_packages(results.packages(), &filenames));
    Ok(())
}
