//! Factory pattern for building review sources from configuration.
//!
//! Creation logic for every provider lives here, so the pipeline and the
//! CLI only ever see `Arc<dyn ReviewSource>` values.

use anyhow::Result;
use async_trait::async_trait;
use cinelenz_config::Config;
use std::sync::Arc;
use std::time::Duration;

use crate::key_rotation::KeyRing;
use crate::news::NewsClient;
use crate::omdb::OmdbClient;
use crate::tmdb::TmdbClient;
use crate::traits::ReviewSource;

/// Factory trait for creating review sources from configuration.
#[async_trait]
pub trait SourceFactory: Send + Sync {
    /// The name of the source this factory creates.
    fn source_name(&self) -> &str;

    /// Create a source instance from configuration.
    /// Returns None if the source is not enabled or not configured.
    async fn create_source(&self, config: &Config) -> Result<Option<Arc<dyn ReviewSource>>>;

    /// Validate that the source configuration is valid.
    /// This is called before attempting to create the source.
    fn validate_config(&self, config: &Config) -> Result<()>;
}

fn request_timeout(config: &Config) -> Duration {
    Duration::from_secs(config.analysis.timeout_secs)
}

fn is_placeholder(key: &str) -> bool {
    key.is_empty() || key.starts_with("YOUR_")
}

/// Registry of source factories.
pub struct SourceFactoryRegistry {
    factories: std::collections::HashMap<String, Box<dyn SourceFactory>>,
}

impl SourceFactoryRegistry {
    /// Create a new registry with all built-in factories registered.
    pub fn new() -> Self {
        let mut registry = Self {
            factories: std::collections::HashMap::new(),
        };

        registry.register(Box::new(tmdb::TmdbSourceFactory));
        registry.register(Box::new(omdb::OmdbSourceFactory));
        registry.register(Box::new(youtube::YouTubeSourceFactory));

        registry
    }

    /// Register a new factory.
    pub fn register(&mut self, factory: Box<dyn SourceFactory>) {
        self.factories
            .insert(factory.source_name().to_string(), factory);
    }

    /// Create all enabled sources from configuration.
    pub async fn create_all_sources(&self, config: &Config) -> Result<Vec<Arc<dyn ReviewSource>>> {
        let mut sources = Vec::new();

        for factory in self.factories.values() {
            if let Some(source) = factory.create_source(config).await? {
                sources.push(source);
            }
        }

        Ok(sources)
    }

    /// Create a specific source by name.
    pub async fn create_source_by_name(
        &self,
        name: &str,
        config: &Config,
    ) -> Result<Option<Arc<dyn ReviewSource>>> {
        if let Some(factory) = self.factories.get(name) {
            factory.create_source(config).await
        } else {
            Ok(None)
        }
    }

    /// Validate all source configurations.
    pub fn validate_all_configs(&self, config: &Config) -> Result<()> {
        for factory in self.factories.values() {
            factory.validate_config(config)?;
        }
        Ok(())
    }

    /// Get all registered factory names.
    pub fn registered_sources(&self) -> Vec<&str> {
        self.factories.keys().map(|s| s.as_str()).collect()
    }

    /// Check if a source is registered.
    pub fn is_registered(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}

impl Default for SourceFactoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The metadata/search client is also needed outside the registry (title
/// search, trending) so it has a standalone constructor.
pub fn build_tmdb_client(config: &Config) -> Result<Option<TmdbClient>> {
    let Some(tmdb) = &config.tmdb else {
        return Ok(None);
    };
    if !tmdb.enabled {
        return Ok(None);
    }
    if is_placeholder(&tmdb.api_key) {
        anyhow::bail!("TMDB is enabled but api_key is not configured");
    }
    Ok(Some(TmdbClient::new(
        tmdb.api_key.clone(),
        request_timeout(config),
        config.analysis.review_page_cap,
    )))
}

pub fn build_news_client(config: &Config) -> Result<Option<NewsClient>> {
    let Some(news) = &config.news else {
        return Ok(None);
    };
    if !news.enabled {
        return Ok(None);
    }
    if is_placeholder(&news.api_key) {
        anyhow::bail!("News is enabled but api_key is not configured");
    }
    Ok(Some(NewsClient::new(
        news.api_key.clone(),
        request_timeout(config),
    )))
}

// Factory implementations for each source
mod tmdb {
    use super::*;

    pub struct TmdbSourceFactory;

    #[async_trait::async_trait]
    impl SourceFactory for TmdbSourceFactory {
        fn source_name(&self) -> &str {
            "tmdb"
        }

        async fn create_source(&self, config: &Config) -> Result<Option<Arc<dyn ReviewSource>>> {
            Ok(build_tmdb_client(config)?.map(|client| Arc::new(client) as Arc<dyn ReviewSource>))
        }

        fn validate_config(&self, config: &Config) -> Result<()> {
            if let Some(tmdb) = &config.tmdb {
                if tmdb.enabled && is_placeholder(&tmdb.api_key) {
                    anyhow::bail!("TMDB is enabled but api_key is not configured");
                }
            }
            Ok(())
        }
    }
}

mod omdb {
    use super::*;

    pub struct OmdbSourceFactory;

    #[async_trait::async_trait]
    impl SourceFactory for OmdbSourceFactory {
        fn source_name(&self) -> &str {
            "omdb"
        }

        async fn create_source(&self, config: &Config) -> Result<Option<Arc<dyn ReviewSource>>> {
            if let Some(omdb) = &config.omdb {
                if omdb.enabled {
                    self.validate_config(config)?;
                    let client = OmdbClient::new(omdb.api_key.clone(), request_timeout(config));
                    return Ok(Some(Arc::new(client)));
                }
            }
            Ok(None)
        }

        fn validate_config(&self, config: &Config) -> Result<()> {
            if let Some(omdb) = &config.omdb {
                if omdb.enabled && is_placeholder(&omdb.api_key) {
                    anyhow::bail!("OMDb is enabled but api_key is not configured");
                }
            }
            Ok(())
        }
    }
}

mod youtube {
    use super::*;
    use crate::youtube::YouTubeClient;

    pub struct YouTubeSourceFactory;

    #[async_trait::async_trait]
    impl SourceFactory for YouTubeSourceFactory {
        fn source_name(&self) -> &str {
            "youtube"
        }

        async fn create_source(&self, config: &Config) -> Result<Option<Arc<dyn ReviewSource>>> {
            if let Some(youtube) = &config.youtube {
                if youtube.enabled {
                    self.validate_config(config)?;
                    let keys = Arc::new(KeyRing::new(youtube.api_keys.clone()));
                    let client = YouTubeClient::new(
                        keys,
                        request_timeout(config),
                        config.analysis.video_cap as u32,
                        config.analysis.comment_page_cap,
                    );
                    return Ok(Some(Arc::new(client)));
                }
            }
            Ok(None)
        }

        fn validate_config(&self, config: &Config) -> Result<()> {
            if let Some(youtube) = &config.youtube {
                if youtube.enabled {
                    let usable = youtube
                        .api_keys
                        .iter()
                        .any(|key| !is_placeholder(key));
                    if !usable {
                        anyhow::bail!("YouTube is enabled but no api_keys are configured");
                    }
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinelenz_config::{OmdbConfig, TmdbConfig, YouTubeConfig};

    fn configured() -> Config {
        let mut config = Config::default();
        config.tmdb = Some(TmdbConfig {
            enabled: true,
            api_key: "tmdb-key".to_string(),
        });
        config.omdb = Some(OmdbConfig {
            enabled: true,
            api_key: "omdb-key".to_string(),
        });
        config.youtube = Some(YouTubeConfig {
            enabled: true,
            api_keys: vec!["yt-key".to_string()],
        });
        config
    }

    #[tokio::test]
    async fn creates_all_enabled_sources() {
        let registry = SourceFactoryRegistry::new();
        let sources = registry.create_all_sources(&configured()).await.unwrap();
        assert_eq!(sources.len(), 3);
    }

    #[tokio::test]
    async fn disabled_source_is_skipped() {
        let mut config = configured();
        if let Some(youtube) = config.youtube.as_mut() {
            youtube.enabled = false;
        }
        let registry = SourceFactoryRegistry::new();
        let sources = registry.create_all_sources(&config).await.unwrap();
        assert_eq!(sources.len(), 2);
    }

    #[test]
    fn placeholder_key_fails_validation() {
        let mut config = configured();
        if let Some(tmdb) = config.tmdb.as_mut() {
            tmdb.api_key = "YOUR_TMDB_API_KEY".to_string();
        }
        let registry = SourceFactoryRegistry::new();
        assert!(registry.validate_all_configs(&config).is_err());
    }

    #[test]
    fn empty_config_validates_cleanly() {
        let registry = SourceFactoryRegistry::new();
        assert!(registry.validate_all_configs(&Config::default()).is_ok());
        assert!(registry.is_registered("tmdb"));
        assert!(!registry.is_registered("plex"));
    }
}
