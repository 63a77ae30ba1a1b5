use cinelenz_core::{SavedList, SavedListStore};
use cinelenz_models::SavedItem;
use color_eyre::eyre::eyre;
use color_eyre::Result;

use super::{analyze, AppContext};
use crate::output::Output;
use crate::render;
use crate::{CompareCommands, SavedListCommands};

pub async fn run_watchlist(cmd: SavedListCommands, output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let store = SavedListStore::new(&ctx.paths).map_err(|e| eyre!("{}", e))?;

    match cmd {
        SavedListCommands::Add { title, year } => {
            add_by_title(&ctx, &store, SavedList::Watchlist, &title, year, output).await
        }
        SavedListCommands::Remove { title } => {
            remove_by_title(&store, SavedList::Watchlist, &title, output)
        }
        SavedListCommands::List => list(&store, SavedList::Watchlist, output),
        SavedListCommands::Clear => {
            store.clear(SavedList::Watchlist).map_err(|e| eyre!("{}", e))?;
            output.success("Watchlist cleared");
            Ok(())
        }
    }
}

pub async fn run_compare(cmd: CompareCommands, output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let store = SavedListStore::new(&ctx.paths).map_err(|e| eyre!("{}", e))?;

    match cmd {
        CompareCommands::Add { title, year } => {
            let items = store.load(SavedList::Compare);
            if items.len() >= 3 {
                return Err(eyre!(
                    "The compare list holds at most three movies. Remove one first"
                ));
            }
            add_by_title(&ctx, &store, SavedList::Compare, &title, year, output).await
        }
        CompareCommands::Remove { title } => {
            remove_by_title(&store, SavedList::Compare, &title, output)
        }
        CompareCommands::List => list(&store, SavedList::Compare, output),
        CompareCommands::Clear => {
            store.clear(SavedList::Compare).map_err(|e| eyre!("{}", e))?;
            output.success("Compare list cleared");
            Ok(())
        }
        CompareCommands::Run => run_comparison(&ctx, &store, output).await,
    }
}

/// Resolve a title through metadata search and save the top match.
async fn add_by_title(
    ctx: &AppContext,
    store: &SavedListStore,
    list: SavedList,
    title: &str,
    year: Option<u32>,
    output: &Output,
) -> Result<()> {
    let client = ctx.tmdb_client()?;
    let candidates = client.search(title).await.map_err(|e| eyre!("{}", e))?;
    let candidate = match year {
        Some(year) => candidates
            .iter()
            .find(|c| c.year() == Some(year))
            .or_else(|| candidates.first())
            .cloned(),
        None => candidates.into_iter().next(),
    }
    .ok_or_else(|| eyre!("No movie found matching '{}'", title))?;

    let item = SavedItem {
        id: candidate.id,
        title: candidate.title.clone(),
        year: candidate.year(),
        poster: candidate.poster_path.clone(),
    };
    if store.add(list, item).map_err(|e| eyre!("{}", e))? {
        output.success(format!("Added '{}' to the {}", candidate.title, list.as_str()));
    } else {
        output.info(format!(
            "'{}' is already on the {}",
            candidate.title,
            list.as_str()
        ));
    }
    Ok(())
}

fn remove_by_title(
    store: &SavedListStore,
    list: SavedList,
    title: &str,
    output: &Output,
) -> Result<()> {
    let items = store.load(list);
    let Some(item) = items
        .iter()
        .find(|item| item.title.eq_ignore_ascii_case(title))
    else {
        output.warn(format!("'{}' is not on the {}", title, list.as_str()));
        return Ok(());
    };
    store.remove(list, item.id).map_err(|e| eyre!("{}", e))?;
    output.success(format!("Removed '{}' from the {}", item.title, list.as_str()));
    Ok(())
}

fn list(store: &SavedListStore, list: SavedList, output: &Output) -> Result<()> {
    let items = store.load(list);
    if items.is_empty() {
        output.info(format!("The {} is empty", list.as_str()));
        return Ok(());
    }

    match output.format() {
        crate::output::OutputFormat::Human => {
            for item in &items {
                let year = item
                    .year
                    .map(|y| format!(" ({})", y))
                    .unwrap_or_default();
                output.println(format!("  {}{}", item.title, year));
            }
        }
        _ => {
            if let Ok(value) = serde_json::to_value(&items) {
                output.json(&value);
            }
        }
    }
    Ok(())
}

async fn run_comparison(ctx: &AppContext, store: &SavedListStore, output: &Output) -> Result<()> {
    let items = store.load(SavedList::Compare);
    if items.len() < 2 {
        return Err(eyre!(
            "Comparison needs at least two movies. Add them with 'cinelenz compare add <title>'"
        ));
    }

    let mut reports = Vec::with_capacity(items.len());
    for item in &items {
        let report = analyze::analyze_title(ctx, &item.title, item.year, output).await?;
        reports.push(report);
    }
    render::render_comparison(&reports, output);
    Ok(())
}
