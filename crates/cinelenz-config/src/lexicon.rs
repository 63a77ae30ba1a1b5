use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Keyword and denylist tables driving text classification and content
/// sanitization. These are data, not code: a `lexicon.toml` next to the
/// config file overrides the built-in English defaults without touching
/// pipeline logic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lexicon {
    /// Phrases whose presence marks a comment positive.
    #[serde(default)]
    pub positive: Vec<String>,
    /// Phrases whose presence marks a comment negative. Negative wins
    /// over positive when both match.
    #[serde(default)]
    pub negative: Vec<String>,
    /// Exact phrases stripped from displayed content.
    #[serde(default)]
    pub denylist_phrases: Vec<String>,
    /// Whole-word tokens stripped from displayed content.
    #[serde(default)]
    pub denylist_words: Vec<String>,
}

impl Lexicon {
    /// Built-in English defaults matching the reference keyword tables.
    pub fn default_english() -> Self {
        let owned = |words: &[&str]| words.iter().map(|w| w.to_string()).collect();
        Self {
            positive: owned(&[
                "great",
                "amazing",
                "love",
                "awesome",
                "fantastic",
                "best",
                "incredible",
                "masterpiece",
                "good",
                "beautiful",
                "powerful",
                "must watch",
                "loved it",
                "brilliant",
            ]),
            negative: owned(&[
                "bad",
                "terrible",
                "hate",
                "awful",
                "boring",
                "worst",
                "disappointing",
                "meh",
                "mid",
                "waste",
                "cringe",
                "poor",
            ]),
            denylist_phrases: owned(&[
                "check out my channel",
                "subscribe to my channel",
                "link in bio",
                "link in description",
                "free gift card",
                "watch full movie here",
            ]),
            denylist_words: owned(&[
                "sub4sub",
                "giveaway",
                "promo",
                "spam",
                "clickbait",
            ]),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read lexicon file at {}", path.display()))?;
        let lexicon: Lexicon = toml::from_str(&content)
            .with_context(|| format!("Failed to parse lexicon file at {}", path.display()))?;
        Ok(lexicon)
    }

    /// Load an override lexicon if present, otherwise the built-in defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default_english())
        }
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::default_english()
    }
}
