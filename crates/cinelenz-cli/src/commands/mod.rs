pub mod analyze;
pub mod config;
pub mod news;
pub mod saved;
pub mod search;
pub mod trending;

use cinelenz_config::{Config, Lexicon, PathManager};
use cinelenz_sources::{factory, TmdbClient};
use color_eyre::eyre::eyre;
use color_eyre::Result;

/// Configuration and paths shared by every command.
pub struct AppContext {
    pub paths: PathManager,
    pub config: Config,
    pub lexicon: Lexicon,
}

impl AppContext {
    pub fn load() -> Result<Self> {
        let paths = PathManager::default();
        let config = Config::load_or_default(&paths.config_file())
            .map_err(|e| eyre!("Failed to load configuration: {}", e))?;
        let lexicon = Lexicon::load_or_default(&paths.lexicon_file())
            .map_err(|e| eyre!("Failed to load lexicon: {}", e))?;
        Ok(Self {
            paths,
            config,
            lexicon,
        })
    }

    /// The metadata/search client, required by search, trending, and
    /// saved-list resolution.
    pub fn tmdb_client(&self) -> Result<TmdbClient> {
        factory::build_tmdb_client(&self.config)
            .map_err(|e| eyre!("{}", e))?
            .ok_or_else(|| {
                eyre!("TMDB is not configured. Run 'cinelenz config init' and add your API key")
            })
    }
}
