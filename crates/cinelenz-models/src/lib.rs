pub mod movie;
pub mod news;
pub mod report;
pub mod review;
pub mod saved;
pub mod sentiment;

pub use movie::{MovieCandidate, MovieContext, MovieQuery};
pub use news::NewsArticle;
pub use report::{AnalysisReport, OverallRating, SentimentSummary, SourceCounts};
pub use review::{ReviewItem, SourcePlatform};
pub use saved::SavedItem;
pub use sentiment::Sentiment;
