pub mod config;
pub mod lexicon;
pub mod paths;

pub use config::{
    AnalysisOptions, Config, NewsConfig, OmdbConfig, TmdbConfig, YouTubeConfig,
};
pub use lexicon::Lexicon;
pub use paths::{container_base_path, PathManager};
