use cinelenz_core::{AnalysisPipeline, SourceFetcher};
use cinelenz_models::{AnalysisReport, MovieQuery};
use cinelenz_sources::SourceFactoryRegistry;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

use super::AppContext;
use crate::output::{Output, OutputFormat};
use crate::render;

pub async fn run_analyze(title: &str, year: Option<u32>, output: &Output) -> Result<()> {
    let title = title.trim();
    if title.is_empty() {
        return Err(eyre!("Title must not be empty"));
    }

    let ctx = AppContext::load()?;
    let report = analyze_title(&ctx, title, year, output).await?;
    render::render_report(&report, output);
    Ok(())
}

pub(super) async fn analyze_title(
    ctx: &AppContext,
    title: &str,
    year: Option<u32>,
    output: &Output,
) -> Result<AnalysisReport> {
    let registry = SourceFactoryRegistry::new();
    registry
        .validate_all_configs(&ctx.config)
        .map_err(|e| eyre!("{}", e))?;
    let sources = registry
        .create_all_sources(&ctx.config)
        .await
        .map_err(|e| eyre!("{}", e))?;
    if sources.is_empty() {
        return Err(eyre!(
            "No sources are configured. Run 'cinelenz config init' and add API keys"
        ));
    }
    tracing::debug!(sources = sources.len(), "Built source set");

    let search = Arc::new(ctx.tmdb_client()?);
    let pipeline = AnalysisPipeline::new(
        search,
        SourceFetcher::new(sources),
        ctx.lexicon.clone(),
        ctx.config.analysis.clone(),
    );

    let spinner = start_spinner(title, output);
    let query = MovieQuery::new(title).with_year(year);
    let result = pipeline.analyze(&query).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    result.map_err(|e| eyre!("{}", e))
}

fn start_spinner(title: &str, output: &Output) -> Option<ProgressBar> {
    if output.is_quiet() || output.format() != OutputFormat::Human {
        return None;
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Analyzing '{}'...", title));
    spinner.enable_steady_tick(Duration::from_millis(100));
    Some(spinner)
}
