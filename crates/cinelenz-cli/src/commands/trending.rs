use color_eyre::eyre::eyre;
use color_eyre::Result;

use super::AppContext;
use crate::output::Output;
use crate::render;

pub async fn run_trending(output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let client = ctx.tmdb_client()?;
    let candidates = client
        .trending_today("en-US")
        .await
        .map_err(|e| eyre!("{}", e))?;

    if candidates.is_empty() {
        output.warn("Nothing trending right now");
        return Ok(());
    }
    render::render_candidates(&candidates, output);
    Ok(())
}
