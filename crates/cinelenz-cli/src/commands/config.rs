use cinelenz_config::{Config, PathManager};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use serde_json::json;

use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;

pub fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Init => init_config(output),
        ConfigCommands::Show => show_config(output),
    }
}

fn init_config(output: &Output) -> Result<()> {
    let paths = PathManager::default();
    paths.ensure_directories().map_err(|e| eyre!("{}", e))?;
    let config_file = paths.config_file();

    if config_file.exists() {
        output.warn(format!(
            "Configuration already exists at {}; leaving it untouched",
            config_file.display()
        ));
        return Ok(());
    }

    Config::starter()
        .save(&config_file)
        .map_err(|e| eyre!("{}", e))?;
    output.success(format!("Wrote starter configuration to {}", config_file.display()));
    output.info("Replace the placeholder API keys before running an analysis");
    Ok(())
}

fn show_config(output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config_file = paths.config_file();

    if !config_file.exists() {
        output.warn(format!(
            "Configuration file not found at: {}",
            config_file.display()
        ));
        output.info("Create one with 'cinelenz config init'.");
        return Ok(());
    }

    let config = Config::load(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            table.set_header(vec![
                Cell::new("Provider").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Enabled").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Key").add_attribute(comfy_table::Attribute::Bold),
            ]);

            table.add_row(provider_row(
                "TMDB",
                config.tmdb.as_ref().map(|c| (c.enabled, mask(&c.api_key))),
            ));
            table.add_row(provider_row(
                "OMDb",
                config.omdb.as_ref().map(|c| (c.enabled, mask(&c.api_key))),
            ));
            table.add_row(provider_row(
                "YouTube",
                config
                    .youtube
                    .as_ref()
                    .map(|c| (c.enabled, format!("{} key(s)", c.api_keys.len()))),
            ));
            table.add_row(provider_row(
                "News",
                config.news.as_ref().map(|c| (c.enabled, mask(&c.api_key))),
            ));

            println!("Config file: {}", config_file.display());
            println!("{}", table);
            println!(
                "Analysis: min_reviews={}, timeout={}s, review pages≤{}, videos≤{}, comment pages≤{}",
                config.analysis.min_reviews,
                config.analysis.timeout_secs,
                config.analysis.review_page_cap,
                config.analysis.video_cap,
                config.analysis.comment_page_cap,
            );
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let value = json!({
                "config_file": config_file.display().to_string(),
                "tmdb": config.tmdb.as_ref().map(|c| json!({"enabled": c.enabled, "api_key": mask(&c.api_key)})),
                "omdb": config.omdb.as_ref().map(|c| json!({"enabled": c.enabled, "api_key": mask(&c.api_key)})),
                "youtube": config.youtube.as_ref().map(|c| json!({"enabled": c.enabled, "keys": c.api_keys.len()})),
                "news": config.news.as_ref().map(|c| json!({"enabled": c.enabled, "api_key": mask(&c.api_key)})),
                "analysis": serde_json::to_value(&config.analysis)?,
            });
            output.json(&value);
        }
    }
    Ok(())
}

fn provider_row(name: &str, state: Option<(bool, String)>) -> Vec<Cell> {
    match state {
        Some((enabled, key)) => vec![
            Cell::new(name),
            Cell::new(if enabled { "yes" } else { "no" }),
            Cell::new(key),
        ],
        None => vec![
            Cell::new(name),
            Cell::new("-"),
            Cell::new("(not configured)"),
        ],
    }
}

/// Show enough of a key to recognize it, never the whole thing.
fn mask(key: &str) -> String {
    if key.is_empty() {
        return "(empty)".to_string();
    }
    if key.starts_with("YOUR_") {
        return "(placeholder)".to_string();
    }
    let visible: String = key.chars().take(4).collect();
    format!("{}{}", visible, "*".repeat(key.chars().count().saturating_sub(4).min(12)))
}
