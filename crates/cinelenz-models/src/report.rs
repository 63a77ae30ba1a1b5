use serde::{Deserialize, Serialize};

use crate::movie::MovieCandidate;
use crate::review::{ReviewItem, SourcePlatform};
use crate::sentiment::Sentiment;

/// Counts per sentiment bucket. Always sums to the length of the
/// collection it was tallied from.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SentimentSummary {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentSummary {
    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }

    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Neutral => self.neutral += 1,
            Sentiment::Negative => self.negative += 1,
        }
    }
}

/// Counts per source platform, display-only. Sums to the same total as
/// the sentiment summary.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceCounts {
    pub tmdb: usize,
    pub omdb: usize,
    pub youtube: usize,
    pub synthetic: usize,
}

impl SourceCounts {
    pub fn total(&self) -> usize {
        self.tmdb + self.omdb + self.youtube + self.synthetic
    }

    pub fn record(&mut self, platform: SourcePlatform) {
        match platform {
            SourcePlatform::Tmdb => self.tmdb += 1,
            SourcePlatform::Omdb => self.omdb += 1,
            SourcePlatform::YouTube => self.youtube += 1,
            SourcePlatform::Synthetic => self.synthetic += 1,
        }
    }
}

/// A single 0-10 score with a tag naming the signal that produced it.
/// `source` is a concrete provider name, or "Aggregate" when derived from
/// the positive/total ratio. Computed once per analysis, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverallRating {
    pub value: f64,
    pub source: String,
}

/// The final output of one analysis run for one movie title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisReport {
    pub candidate: MovieCandidate,
    pub items: Vec<ReviewItem>,
    pub summary: SentimentSummary,
    pub source_counts: SourceCounts,
    pub overall: OverallRating,
    /// True when synthetic reviews were added to reach the minimum size.
    pub padded: bool,
}
