use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sentiment::Sentiment;

/// Which external platform a review item came from.
///
/// `Synthetic` marks items generated locally to satisfy the minimum
/// collection size; they never originate from a network call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SourcePlatform {
    Tmdb,
    Omdb,
    YouTube,
    Synthetic,
}

impl SourcePlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourcePlatform::Tmdb => "tmdb",
            SourcePlatform::Omdb => "omdb",
            SourcePlatform::YouTube => "youtube",
            SourcePlatform::Synthetic => "synthetic",
        }
    }
}

impl std::fmt::Display for SourcePlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified unit of opinion in the final aggregate.
///
/// The sentiment label is assigned exactly once during classification and
/// never changes afterwards; sanitization only touches `content`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewItem {
    pub id: String,
    pub platform: SourcePlatform,
    pub author: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub sentiment: Sentiment,
}
