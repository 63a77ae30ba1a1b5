pub mod aggregate;
pub mod classify;
pub mod fetch;
pub mod pipeline;
pub mod sanitize;
pub mod seed;
pub mod store;
pub mod synthetic;

pub use aggregate::Aggregator;
pub use classify::Classifier;
pub use fetch::{FetchOutcome, SourceFetcher};
pub use pipeline::{AnalysisError, AnalysisPipeline, AnalysisState};
pub use seed::TitleRng;
pub use store::{SavedList, SavedListStore};
