use async_trait::async_trait;
use cinelenz_models::{MovieCandidate, MovieContext, MovieQuery};

use crate::error::SourceError;
use crate::raw::RawItem;

/// Title search against the metadata provider. Split from `ReviewSource`
/// so the pipeline can resolve a candidate movie before fanning out, and
/// so tests can stub the search step.
#[async_trait]
pub trait MovieSearch: Send + Sync {
    async fn search(&self, query: &MovieQuery) -> Result<Vec<MovieCandidate>, SourceError>;
}

/// One external opinion source queried during analysis.
///
/// Implementations are pure read paths: they fetch and decode, but never
/// classify. A source that cannot find the movie returns an empty vector
/// rather than an error.
#[async_trait]
pub trait ReviewSource: Send + Sync {
    fn source_name(&self) -> &str;

    fn platform(&self) -> cinelenz_models::SourcePlatform;

    /// Fetch raw opinion items for the queried movie. `candidate` is the
    /// resolved metadata match when one exists; sources that key off a
    /// provider id use it, title-keyed sources may ignore it.
    async fn fetch_items(
        &self,
        query: &MovieQuery,
        candidate: Option<&MovieCandidate>,
    ) -> Result<Vec<RawItem>, SourceError>;

    /// Descriptive context for synthetic templating, for sources that can
    /// supply it. Default: none.
    async fn movie_context(
        &self,
        _query: &MovieQuery,
    ) -> Result<Option<MovieContext>, SourceError> {
        Ok(None)
    }
}
