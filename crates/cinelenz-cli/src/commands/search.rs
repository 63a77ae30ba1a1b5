use color_eyre::eyre::eyre;
use color_eyre::Result;

use super::AppContext;
use crate::output::Output;
use crate::render;

pub async fn run_search(query: &str, output: &Output) -> Result<()> {
    let query = query.trim();
    if query.is_empty() {
        return Err(eyre!("Search query must not be empty"));
    }

    let ctx = AppContext::load()?;
    let client = ctx.tmdb_client()?;
    let candidates = client.search(query).await.map_err(|e| eyre!("{}", e))?;

    if candidates.is_empty() {
        output.warn(format!("No movies found matching '{}'", query));
        return Ok(());
    }
    render::render_candidates(&candidates, output);
    Ok(())
}
