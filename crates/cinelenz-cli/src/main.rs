use clap::{ArgAction, Parser, Subcommand};
use commands::{analyze, config, news, saved, search, trending};

mod commands;
mod logging;
mod output;
mod render;

#[derive(Parser)]
#[command(name = "cinelenz")]
#[command(about = "CineLenz - Aggregated movie review sentiment from the terminal")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze review sentiment for a movie
    #[command(long_about = "Fetch reviews, ratings, and comments for a movie from every configured source, classify their sentiment, and print the aggregate breakdown with an overall rating.")]
    Analyze {
        /// Movie title to analyze
        title: String,

        /// Release year hint, used to disambiguate titles
        #[arg(long)]
        year: Option<u32>,
    },
    /// Search for movies by title
    Search {
        /// Search query
        query: String,
    },
    /// Show movies trending today
    Trending,
    /// Show film news headlines
    News {
        /// Narrow the news to a topic or title
        query: Option<String>,

        /// Article language (ISO 639-1 code)
        #[arg(long, default_value = "en")]
        language: String,

        /// Maximum number of headlines
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// Manage the watchlist
    Watchlist {
        #[command(subcommand)]
        cmd: SavedListCommands,
    },
    /// Manage the compare list and run side-by-side comparisons
    Compare {
        #[command(subcommand)]
        cmd: CompareCommands,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum SavedListCommands {
    /// Add a movie by title
    Add {
        title: String,

        /// Release year hint
        #[arg(long)]
        year: Option<u32>,
    },
    /// Remove a movie by title
    Remove { title: String },
    /// List saved movies
    List,
    /// Remove every saved movie
    Clear,
}

#[derive(Subcommand)]
enum CompareCommands {
    /// Add a movie by title
    Add {
        title: String,

        /// Release year hint
        #[arg(long)]
        year: Option<u32>,
    },
    /// Remove a movie by title
    Remove { title: String },
    /// List movies queued for comparison
    List,
    /// Empty the compare list
    Clear,
    /// Analyze the queued movies side by side
    Run,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write a starter configuration file with placeholder keys
    Init,
    /// Show current configuration (masks API keys)
    Show,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Analyze { title, year } => analyze::run_analyze(&title, year, &output).await,
        Commands::Search { query } => search::run_search(&query, &output).await,
        Commands::Trending => trending::run_trending(&output).await,
        Commands::News {
            query,
            language,
            limit,
        } => news::run_news(query.as_deref(), &language, limit, &output).await,
        Commands::Watchlist { cmd } => saved::run_watchlist(cmd, &output).await,
        Commands::Compare { cmd } => saved::run_compare(cmd, &output).await,
        Commands::Config { cmd } => config::run_config(cmd, &output),
    }
}
