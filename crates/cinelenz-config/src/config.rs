use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration, stored as TOML in the config directory.
///
/// Every tuning constant of the analysis pipeline lives here with a serde
/// default, so a minimal config file only needs provider API keys.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tmdb: Option<TmdbConfig>,
    #[serde(default)]
    pub omdb: Option<OmdbConfig>,
    #[serde(default)]
    pub youtube: Option<YouTubeConfig>,
    #[serde(default)]
    pub news: Option<NewsConfig>,
    #[serde(default)]
    pub analysis: AnalysisOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    pub enabled: bool,
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OmdbConfig {
    pub enabled: bool,
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YouTubeConfig {
    pub enabled: bool,
    /// Multiple keys rotate round-robin to spread quota usage.
    pub api_keys: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    pub enabled: bool,
    pub api_key: String,
}

/// Tuning constants for the fetch/classify/pad pipeline. The reference
/// values are arbitrary tuning choices, not contracts, so all of them are
/// configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Floor on the aggregate collection size before synthetic padding.
    #[serde(default = "default_min_reviews")]
    pub min_reviews: usize,
    /// Per-request timeout for every outbound HTTP call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Maximum metadata-provider review pages to follow.
    #[serde(default = "default_review_page_cap")]
    pub review_page_cap: u32,
    /// Maximum candidate videos queried on the video-comments provider.
    #[serde(default = "default_video_cap")]
    pub video_cap: usize,
    /// Maximum comment pages followed per video.
    #[serde(default = "default_comment_page_cap")]
    pub comment_page_cap: u32,
    /// Probability that a mid-band numeric rating resolves to positive.
    #[serde(default = "default_mid_band_positive")]
    pub mid_band_positive: f64,
    /// Probability that an unmatched comment resolves to positive.
    #[serde(default = "default_comment_positive")]
    pub comment_positive: f64,
    /// Like count at or above which an unmatched comment counts positive.
    #[serde(default = "default_like_floor")]
    pub like_floor: u64,
    /// Synthetic padding split: cumulative positive bound.
    #[serde(default = "default_synthetic_positive")]
    pub synthetic_positive: f64,
    /// Synthetic padding split: cumulative positive+neutral bound.
    #[serde(default = "default_synthetic_neutral_bound")]
    pub synthetic_neutral_bound: f64,
}

fn default_min_reviews() -> usize {
    50
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_review_page_cap() -> u32 {
    50
}

fn default_video_cap() -> usize {
    5
}

fn default_comment_page_cap() -> u32 {
    5
}

fn default_mid_band_positive() -> f64 {
    0.6
}

fn default_comment_positive() -> f64 {
    0.55
}

fn default_like_floor() -> u64 {
    5
}

fn default_synthetic_positive() -> f64 {
    0.65
}

fn default_synthetic_neutral_bound() -> f64 {
    0.95
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            min_reviews: default_min_reviews(),
            timeout_secs: default_timeout_secs(),
            review_page_cap: default_review_page_cap(),
            video_cap: default_video_cap(),
            comment_page_cap: default_comment_page_cap(),
            mid_band_positive: default_mid_band_positive(),
            comment_positive: default_comment_positive(),
            like_floor: default_like_floor(),
            synthetic_positive: default_synthetic_positive(),
            synthetic_neutral_bound: default_synthetic_neutral_bound(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmdb: None,
            omdb: None,
            youtube: None,
            news: None,
            analysis: AnalysisOptions::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;
        Ok(config)
    }

    /// Load the config file if it exists, otherwise return defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file at {}", path.display()))?;
        Ok(())
    }

    /// A starter configuration with placeholder keys, written by
    /// `cinelenz config init`.
    pub fn starter() -> Self {
        Self {
            tmdb: Some(TmdbConfig {
                enabled: true,
                api_key: "YOUR_TMDB_API_KEY".to_string(),
            }),
            omdb: Some(OmdbConfig {
                enabled: true,
                api_key: "YOUR_OMDB_API_KEY".to_string(),
            }),
            youtube: Some(YouTubeConfig {
                enabled: true,
                api_keys: vec!["YOUR_YOUTUBE_API_KEY".to_string()],
            }),
            news: Some(NewsConfig {
                enabled: false,
                api_key: "YOUR_NEWSAPI_KEY".to_string(),
            }),
            analysis: AnalysisOptions::default(),
        }
    }
}
