use cinelenz_sources::factory;
use color_eyre::eyre::eyre;
use color_eyre::Result;

use super::AppContext;
use crate::output::Output;
use crate::render;

pub async fn run_news(
    query: Option<&str>,
    language: &str,
    limit: u32,
    output: &Output,
) -> Result<()> {
    let ctx = AppContext::load()?;
    let client = factory::build_news_client(&ctx.config)
        .map_err(|e| eyre!("{}", e))?
        .ok_or_else(|| {
            eyre!("News is not configured. Enable it in config.toml with a NewsAPI key")
        })?;

    let articles = match query {
        Some(query) => client
            .search(query, language, limit)
            .await
            .map_err(|e| eyre!("{}", e))?,
        None => client
            .film_news("movies", language, limit)
            .await
            .map_err(|e| eyre!("{}", e))?,
    };

    if articles.is_empty() {
        output.warn("No film news found");
        return Ok(());
    }
    render::render_news(&articles, output);
    Ok(())
}
