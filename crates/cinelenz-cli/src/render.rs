use cinelenz_models::{AnalysisReport, MovieCandidate, NewsArticle, Sentiment};
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;

use crate::output::{Output, OutputFormat};

fn styled_table() -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn sentiment_label(sentiment: Sentiment) -> String {
    match sentiment {
        Sentiment::Positive => "positive".green().to_string(),
        Sentiment::Neutral => "neutral".yellow().to_string(),
        Sentiment::Negative => "negative".red().to_string(),
    }
}

pub fn render_report(report: &AnalysisReport, output: &Output) {
    if output.format() != OutputFormat::Human {
        if let Ok(value) = serde_json::to_value(report) {
            output.json(&value);
        }
        return;
    }
    if output.is_quiet() {
        return;
    }

    let year = report
        .candidate
        .year()
        .map(|y| format!(" ({})", y))
        .unwrap_or_default();
    println!();
    println!("{}{}", report.candidate.title.bright_cyan().bold(), year);
    println!(
        "{} {}/10 via {}",
        "★".yellow(),
        report.overall.value,
        report.overall.source
    );
    if report.padded {
        println!(
            "{}",
            "(collection padded with generated reviews to reach the minimum sample)".dimmed()
        );
    }
    println!();

    let mut breakdown = styled_table();
    breakdown.set_header(vec!["Sentiment", "Count"]);
    breakdown.add_row(vec![
        Cell::new("Positive"),
        Cell::new(report.summary.positive.to_string()),
    ]);
    breakdown.add_row(vec![
        Cell::new("Neutral"),
        Cell::new(report.summary.neutral.to_string()),
    ]);
    breakdown.add_row(vec![
        Cell::new("Negative"),
        Cell::new(report.summary.negative.to_string()),
    ]);
    breakdown.add_row(vec![
        Cell::new("Total").add_attribute(comfy_table::Attribute::Bold),
        Cell::new(report.summary.total().to_string()),
    ]);
    println!("{}", breakdown);

    let mut sources = styled_table();
    sources.set_header(vec!["Source", "Items"]);
    sources.add_row(vec![
        Cell::new("TMDB"),
        Cell::new(report.source_counts.tmdb.to_string()),
    ]);
    sources.add_row(vec![
        Cell::new("OMDb"),
        Cell::new(report.source_counts.omdb.to_string()),
    ]);
    sources.add_row(vec![
        Cell::new("YouTube"),
        Cell::new(report.source_counts.youtube.to_string()),
    ]);
    sources.add_row(vec![
        Cell::new("Generated"),
        Cell::new(report.source_counts.synthetic.to_string()),
    ]);
    println!("{}", sources);

    let real_reviews: Vec<_> = report
        .items
        .iter()
        .filter(|item| item.platform != cinelenz_models::SourcePlatform::Synthetic)
        .take(5)
        .collect();
    if !real_reviews.is_empty() {
        println!("\n{}", "Latest reviews".bold());
        for item in real_reviews {
            let snippet: String = item.content.chars().take(160).collect();
            let ellipsis = if item.content.chars().count() > 160 {
                "…"
            } else {
                ""
            };
            println!(
                "  [{}] {} — {}{}",
                sentiment_label(item.sentiment),
                item.author.bold(),
                snippet,
                ellipsis
            );
        }
    }
    println!();
}

pub fn render_candidates(candidates: &[MovieCandidate], output: &Output) {
    if output.format() != OutputFormat::Human {
        if let Ok(value) = serde_json::to_value(candidates) {
            output.json(&value);
        }
        return;
    }
    if output.is_quiet() {
        return;
    }

    let mut table = styled_table();
    table.set_header(vec!["Title", "Year", "Score", "Overview"]);
    for candidate in candidates {
        let overview: String = candidate
            .overview
            .as_deref()
            .unwrap_or("")
            .chars()
            .take(80)
            .collect();
        table.add_row(vec![
            Cell::new(&candidate.title),
            Cell::new(
                candidate
                    .year()
                    .map(|y| y.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(
                candidate
                    .vote_average
                    .map(|v| format!("{:.1}", v))
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(overview),
        ]);
    }
    println!("{}", table);
}

pub fn render_news(articles: &[NewsArticle], output: &Output) {
    if output.format() != OutputFormat::Human {
        if let Ok(value) = serde_json::to_value(articles) {
            output.json(&value);
        }
        return;
    }
    if output.is_quiet() {
        return;
    }

    for article in articles {
        let source = article.source.as_deref().unwrap_or("unknown source");
        let date = article
            .published_at
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{} {} {}", date.dimmed(), source.cyan(), article.title.bold());
        if let Some(description) = &article.description {
            let snippet: String = description.chars().take(140).collect();
            println!("  {}", snippet);
        }
        println!("  {}", article.url.dimmed());
        println!();
    }
}

pub fn render_comparison(reports: &[AnalysisReport], output: &Output) {
    if output.format() != OutputFormat::Human {
        if let Ok(value) = serde_json::to_value(reports) {
            output.json(&value);
        }
        return;
    }
    if output.is_quiet() {
        return;
    }

    let mut table = styled_table();
    let mut header = vec![Cell::new("")];
    for report in reports {
        header.push(Cell::new(&report.candidate.title).add_attribute(comfy_table::Attribute::Bold));
    }
    table.set_header(header);

    let rows: Vec<(&str, Box<dyn Fn(&AnalysisReport) -> String>)> = vec![
        (
            "Overall",
            Box::new(|r| format!("{}/10 ({})", r.overall.value, r.overall.source)),
        ),
        ("Positive", Box::new(|r| r.summary.positive.to_string())),
        ("Neutral", Box::new(|r| r.summary.neutral.to_string())),
        ("Negative", Box::new(|r| r.summary.negative.to_string())),
        ("Total", Box::new(|r| r.summary.total().to_string())),
        (
            "Padded",
            Box::new(|r| if r.padded { "yes" } else { "no" }.to_string()),
        ),
    ];
    for (label, fetch) in rows {
        let mut row = vec![Cell::new(label)];
        for report in reports {
            row.push(Cell::new(fetch(report)));
        }
        table.add_row(row);
    }
    println!("{}", table);
}
