use cinelenz_models::{MovieCandidate, MovieContext, MovieQuery};
use cinelenz_sources::{RawItem, ReviewSource};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, warn};

/// Everything one fetch pass produced: items from the sources that
/// succeeded, descriptive context if any source supplied one, and the
/// names of sources that failed.
pub struct FetchOutcome {
    pub items: Vec<RawItem>,
    pub context: Option<MovieContext>,
    pub failed_sources: Vec<String>,
}

/// Queries every configured source concurrently with settle-all
/// semantics: a source that errors contributes nothing and is recorded,
/// but never aborts the pass.
pub struct SourceFetcher {
    sources: Vec<Arc<dyn ReviewSource>>,
}

impl SourceFetcher {
    pub fn new(sources: Vec<Arc<dyn ReviewSource>>) -> Self {
        Self { sources }
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub async fn fetch_all(
        &self,
        query: &MovieQuery,
        candidate: Option<&MovieCandidate>,
    ) -> FetchOutcome {
        let fetches = self.sources.iter().map(|source| async move {
            let name = source.source_name().to_string();
            let result = source.fetch_items(query, candidate).await;
            (name, result)
        });

        let mut items = Vec::new();
        let mut failed_sources = Vec::new();
        for (name, result) in join_all(fetches).await {
            match result {
                Ok(fetched) => {
                    debug!(source = %name, count = fetched.len(), "Source settled");
                    items.extend(fetched);
                }
                Err(e) => {
                    warn!(source = %name, error = %e, "Source failed, continuing without it");
                    failed_sources.push(name);
                }
            }
        }

        let context = self.fetch_context(query).await;

        FetchOutcome {
            items,
            context,
            failed_sources,
        }
    }

    /// The richest descriptive context any source can supply. Context is
    /// best-effort; a failure here only limits synthetic padding.
    async fn fetch_context(&self, query: &MovieQuery) -> Option<MovieContext> {
        let fetches = self.sources.iter().map(|source| async move {
            (source.source_name().to_string(), source.movie_context(query).await)
        });

        let mut best: Option<MovieContext> = None;
        for (name, result) in join_all(fetches).await {
            match result {
                Ok(Some(context)) => {
                    if best
                        .as_ref()
                        .map(|b| descriptive_field_count(&context) > descriptive_field_count(b))
                        .unwrap_or(true)
                    {
                        best = Some(context);
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    debug!(source = %name, error = %e, "No context from source");
                }
            }
        }
        best
    }
}

fn descriptive_field_count(context: &MovieContext) -> usize {
    [
        context.genre.is_some(),
        context.director.is_some(),
        context.actors.is_some(),
        context.plot.is_some(),
        context.runtime.is_some(),
        context.awards.is_some(),
    ]
    .iter()
    .filter(|present| **present)
    .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cinelenz_models::SourcePlatform;
    use cinelenz_sources::SourceError;

    struct FixedSource {
        name: &'static str,
        items: usize,
    }

    #[async_trait]
    impl ReviewSource for FixedSource {
        fn source_name(&self) -> &str {
            self.name
        }

        fn platform(&self) -> SourcePlatform {
            SourcePlatform::YouTube
        }

        async fn fetch_items(
            &self,
            _query: &MovieQuery,
            _candidate: Option<&MovieCandidate>,
        ) -> Result<Vec<RawItem>, SourceError> {
            Ok((0..self.items)
                .map(|i| RawItem {
                    platform: SourcePlatform::YouTube,
                    author: None,
                    content: Some(format!("comment {}", i)),
                    rating: None,
                    like_count: None,
                    published_at: None,
                })
                .collect())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl ReviewSource for FailingSource {
        fn source_name(&self) -> &str {
            "broken"
        }

        fn platform(&self) -> SourcePlatform {
            SourcePlatform::Omdb
        }

        async fn fetch_items(
            &self,
            _query: &MovieQuery,
            _candidate: Option<&MovieCandidate>,
        ) -> Result<Vec<RawItem>, SourceError> {
            Err(SourceError::payload("broken", "always fails"))
        }
    }

    #[tokio::test]
    async fn failing_source_does_not_abort_the_pass() {
        let fetcher = SourceFetcher::new(vec![
            Arc::new(FixedSource { name: "ok", items: 4 }),
            Arc::new(FailingSource),
        ]);
        let outcome = fetcher
            .fetch_all(&MovieQuery::new("Any Film"), None)
            .await;
        assert_eq!(outcome.items.len(), 4);
        assert_eq!(outcome.failed_sources, vec!["broken".to_string()]);
    }

    struct ContextSource {
        context: MovieContext,
    }

    #[async_trait]
    impl ReviewSource for ContextSource {
        fn source_name(&self) -> &str {
            "context"
        }

        fn platform(&self) -> SourcePlatform {
            SourcePlatform::Omdb
        }

        async fn fetch_items(
            &self,
            _query: &MovieQuery,
            _candidate: Option<&MovieCandidate>,
        ) -> Result<Vec<RawItem>, SourceError> {
            Ok(Vec::new())
        }

        async fn movie_context(
            &self,
            _query: &MovieQuery,
        ) -> Result<Option<MovieContext>, SourceError> {
            Ok(Some(self.context.clone()))
        }
    }

    #[tokio::test]
    async fn richest_context_wins() {
        let sparse = MovieContext {
            title: "Film".to_string(),
            plot: Some("A plot.".to_string()),
            ..MovieContext::default()
        };
        let rich = MovieContext {
            title: "Film".to_string(),
            genre: Some("Drama".to_string()),
            director: Some("Someone".to_string()),
            plot: Some("A plot.".to_string()),
            ..MovieContext::default()
        };
        let fetcher = SourceFetcher::new(vec![
            Arc::new(ContextSource { context: sparse }),
            Arc::new(ContextSource {
                context: rich.clone(),
            }),
        ]);
        let outcome = fetcher.fetch_all(&MovieQuery::new("Film"), None).await;
        assert_eq!(outcome.context, Some(rich));
    }

    #[tokio::test]
    async fn all_sources_failing_yields_empty_not_error() {
        let fetcher = SourceFetcher::new(vec![Arc::new(FailingSource)]);
        let outcome = fetcher
            .fetch_all(&MovieQuery::new("Any Film"), None)
            .await;
        assert!(outcome.items.is_empty());
        assert!(outcome.context.is_none());
        assert_eq!(outcome.failed_sources.len(), 1);
    }
}
