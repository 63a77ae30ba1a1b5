use chrono::Utc;
use cinelenz_config::{AnalysisOptions, Lexicon};
use cinelenz_models::{AnalysisReport, MovieCandidate, MovieQuery, ReviewItem};
use cinelenz_sources::{MovieSearch, RawRating, SourceError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::aggregate::Aggregator;
use crate::classify::Classifier;
use crate::fetch::SourceFetcher;
use crate::sanitize::sanitize;
use crate::seed::TitleRng;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("No movie found matching '{title}'")]
    MovieNotFound { title: String },
    #[error("Not enough data to analyze '{title}': every source came back empty")]
    InsufficientData { title: String },
    #[error("Analysis superseded by a newer request")]
    Superseded,
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Where an analysis currently stands. Observable while a run is in
/// flight; terminal `Error` is reached only when nothing usable could be
/// produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisState {
    Idle,
    Fetching,
    Classifying,
    Aggregating,
    Ready,
    Error(String),
}

/// The analysis pipeline: resolve a candidate, fan out to sources,
/// classify, sanitize, pad, aggregate.
///
/// Starting a new analysis bumps the generation counter; an in-flight
/// run notices the bump at its checkpoints and bails with `Superseded`,
/// so only the latest request ever publishes a result.
pub struct AnalysisPipeline {
    search: Arc<dyn MovieSearch>,
    fetcher: SourceFetcher,
    lexicon: Lexicon,
    options: AnalysisOptions,
    state: RwLock<AnalysisState>,
    generation: AtomicU64,
}

impl AnalysisPipeline {
    pub fn new(
        search: Arc<dyn MovieSearch>,
        fetcher: SourceFetcher,
        lexicon: Lexicon,
        options: AnalysisOptions,
    ) -> Self {
        Self {
            search,
            fetcher,
            lexicon,
            options,
            state: RwLock::new(AnalysisState::Idle),
            generation: AtomicU64::new(0),
        }
    }

    pub async fn state(&self) -> AnalysisState {
        self.state.read().await.clone()
    }

    async fn set_state(&self, state: AnalysisState) {
        *self.state.write().await = state;
    }

    fn check_generation(&self, my_generation: u64) -> Result<(), AnalysisError> {
        if self.generation.load(Ordering::SeqCst) != my_generation {
            return Err(AnalysisError::Superseded);
        }
        Ok(())
    }

    #[instrument(skip(self), fields(title = %query.title))]
    pub async fn analyze(&self, query: &MovieQuery) -> Result<AnalysisReport, AnalysisError> {
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let result = self.run(query, my_generation).await;
        match &result {
            Ok(report) => {
                info!(
                    total = report.items.len(),
                    padded = report.padded,
                    overall = report.overall.value,
                    "Analysis complete"
                );
                self.set_state(AnalysisState::Ready).await;
            }
            Err(AnalysisError::Superseded) => {
                debug!("Discarding superseded analysis");
            }
            Err(e) => {
                self.set_state(AnalysisState::Error(e.to_string())).await;
            }
        }
        result
    }

    async fn run(
        &self,
        query: &MovieQuery,
        my_generation: u64,
    ) -> Result<AnalysisReport, AnalysisError> {
        self.set_state(AnalysisState::Fetching).await;

        let candidate = self.resolve_candidate(query).await?;
        self.check_generation(my_generation)?;

        let outcome = self.fetcher.fetch_all(query, Some(&candidate)).await;
        self.check_generation(my_generation)?;
        if !outcome.failed_sources.is_empty() {
            warn!(failed = ?outcome.failed_sources, "Some sources contributed nothing");
        }

        let can_pad = outcome
            .context
            .as_ref()
            .is_some_and(|c| c.has_descriptive_fields());
        if outcome.items.is_empty() && !can_pad {
            return Err(AnalysisError::InsufficientData {
                title: query.title.clone(),
            });
        }

        self.set_state(AnalysisState::Classifying).await;
        let mut rng = TitleRng::from_title(&query.title);
        let mut classifier = Classifier::new(&self.lexicon, &self.options, &query.title);

        let mut items = Vec::with_capacity(outcome.items.len());
        let mut rating_signals: Vec<RawRating> = Vec::new();
        for (index, raw) in outcome.items.iter().enumerate() {
            let sentiment = classifier.classify(raw);
            if let Some(rating) = &raw.rating {
                if rating.priority.is_some() {
                    rating_signals.push(rating.clone());
                }
            }
            let Some(content) = sanitize(raw.content.as_deref().unwrap_or(""), &self.lexicon)
            else {
                continue;
            };
            items.push(ReviewItem {
                id: format!("{}-{}", raw.platform, index + 1),
                platform: raw.platform,
                author: raw
                    .author
                    .clone()
                    .unwrap_or_else(|| "Anonymous".to_string()),
                content,
                timestamp: raw.published_at.unwrap_or_else(Utc::now),
                sentiment,
            });
        }
        debug!(
            kept = items.len(),
            fetched = outcome.items.len(),
            "Classified and sanitized items"
        );

        self.set_state(AnalysisState::Aggregating).await;
        self.check_generation(my_generation)?;

        let aggregator = Aggregator::new(&self.options);
        Ok(aggregator.finalize(
            candidate,
            items,
            &rating_signals,
            outcome.context.as_ref(),
            &mut rng,
        ))
    }

    async fn resolve_candidate(
        &self,
        query: &MovieQuery,
    ) -> Result<MovieCandidate, AnalysisError> {
        let candidates = self.search.search(query).await?;
        let chosen = match query.year {
            Some(year) => candidates
                .iter()
                .find(|c| c.year() == Some(year))
                .or_else(|| candidates.first())
                .cloned(),
            None => candidates.into_iter().next(),
        };
        chosen.ok_or_else(|| AnalysisError::MovieNotFound {
            title: query.title.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use cinelenz_models::{MovieContext, SourcePlatform};
    use cinelenz_sources::{RatingScale, RawItem, ReviewSource};

    struct StubSearch {
        candidates: Vec<MovieCandidate>,
    }

    #[async_trait]
    impl MovieSearch for StubSearch {
        async fn search(&self, _query: &MovieQuery) -> Result<Vec<MovieCandidate>, SourceError> {
            Ok(self.candidates.clone())
        }
    }

    struct StubReviews {
        items: Vec<RawItem>,
        context: Option<MovieContext>,
    }

    #[async_trait]
    impl ReviewSource for StubReviews {
        fn source_name(&self) -> &str {
            "stub"
        }

        fn platform(&self) -> SourcePlatform {
            SourcePlatform::Tmdb
        }

        async fn fetch_items(
            &self,
            _query: &MovieQuery,
            _candidate: Option<&MovieCandidate>,
        ) -> Result<Vec<RawItem>, SourceError> {
            Ok(self.items.clone())
        }

        async fn movie_context(
            &self,
            _query: &MovieQuery,
        ) -> Result<Option<MovieContext>, SourceError> {
            Ok(self.context.clone())
        }
    }

    fn dune_candidate() -> MovieCandidate {
        MovieCandidate {
            id: 693134,
            title: "Dune: Part Two".to_string(),
            release_date: NaiveDate::from_ymd_opt(2024, 2, 27),
            poster_path: None,
            backdrop_path: None,
            vote_average: Some(8.3),
            overview: None,
        }
    }

    fn dune_context() -> MovieContext {
        MovieContext {
            title: "Dune: Part Two".to_string(),
            year: Some(2024),
            genre: Some("Science Fiction".to_string()),
            director: Some("Denis Villeneuve".to_string()),
            actors: Some("Timothée Chalamet, Zendaya".to_string()),
            plot: None,
            runtime: None,
            awards: None,
        }
    }

    fn pipeline(
        candidates: Vec<MovieCandidate>,
        sources: Vec<Arc<dyn ReviewSource>>,
    ) -> AnalysisPipeline {
        AnalysisPipeline::new(
            Arc::new(StubSearch { candidates }),
            SourceFetcher::new(sources),
            Lexicon::default_english(),
            AnalysisOptions::default(),
        )
    }

    #[tokio::test]
    async fn empty_search_is_movie_not_found() {
        let p = pipeline(Vec::new(), Vec::new());
        let err = p
            .analyze(&MovieQuery::new("No Such Film"))
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::MovieNotFound { .. }));
        assert!(matches!(p.state().await, AnalysisState::Error(_)));
    }

    #[tokio::test]
    async fn no_items_and_no_context_is_insufficient_data() {
        let source: Arc<dyn ReviewSource> = Arc::new(StubReviews {
            items: Vec::new(),
            context: None,
        });
        let p = pipeline(vec![dune_candidate()], vec![source]);
        let err = p
            .analyze(&MovieQuery::new("Dune: Part Two"))
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientData { .. }));
    }

    #[tokio::test]
    async fn bare_title_context_without_items_is_insufficient_data() {
        let source: Arc<dyn ReviewSource> = Arc::new(StubReviews {
            items: Vec::new(),
            context: Some(MovieContext {
                title: "Dune: Part Two".to_string(),
                ..MovieContext::default()
            }),
        });
        let p = pipeline(vec![dune_candidate()], vec![source]);
        let err = p
            .analyze(&MovieQuery::new("Dune: Part Two"))
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientData { .. }));
    }

    struct SlowReviews {
        delay: std::time::Duration,
        context: Option<MovieContext>,
    }

    #[async_trait]
    impl ReviewSource for SlowReviews {
        fn source_name(&self) -> &str {
            "slow"
        }

        fn platform(&self) -> SourcePlatform {
            SourcePlatform::YouTube
        }

        async fn fetch_items(
            &self,
            _query: &MovieQuery,
            _candidate: Option<&MovieCandidate>,
        ) -> Result<Vec<RawItem>, SourceError> {
            tokio::time::sleep(self.delay).await;
            Ok(vec![RawItem {
                platform: SourcePlatform::YouTube,
                author: None,
                content: Some("worth watching on the biggest screen".to_string()),
                rating: None,
                like_count: Some(10),
                published_at: None,
            }])
        }

        async fn movie_context(
            &self,
            _query: &MovieQuery,
        ) -> Result<Option<MovieContext>, SourceError> {
            Ok(self.context.clone())
        }
    }

    #[tokio::test]
    async fn newer_analysis_supersedes_the_in_flight_one() {
        let source: Arc<dyn ReviewSource> = Arc::new(SlowReviews {
            delay: std::time::Duration::from_millis(200),
            context: Some(dune_context()),
        });
        let p = Arc::new(pipeline(vec![dune_candidate()], vec![source]));

        let first = tokio::spawn({
            let p = Arc::clone(&p);
            async move { p.analyze(&MovieQuery::new("Dune: Part Two")).await }
        });
        // Let the first run reach its fetch before starting the second.
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;

        let second = p.analyze(&MovieQuery::new("Dune: Part Two")).await;
        assert!(second.is_ok());
        assert!(matches!(
            first.await.unwrap(),
            Err(AnalysisError::Superseded)
        ));
        assert_eq!(p.state().await, AnalysisState::Ready);
    }

    #[tokio::test]
    async fn dune_part_two_scenario() {
        // TMDB matched with vote average 8.3, the ratings provider is
        // down, and no videos were found. The rating falls back to the
        // vote average and the collection pads to the minimum size.
        let source: Arc<dyn ReviewSource> = Arc::new(StubReviews {
            items: vec![RawItem {
                platform: SourcePlatform::Tmdb,
                author: Some("reviewer".to_string()),
                content: Some("An amazing ride from start to finish".to_string()),
                rating: Some(cinelenz_sources::RawRating {
                    value: 9.0,
                    scale: RatingScale::TenPoint,
                    label: "TMDB".to_string(),
                    priority: None,
                }),
                like_count: None,
                published_at: None,
            }],
            context: Some(dune_context()),
        });
        let p = pipeline(vec![dune_candidate()], vec![source]);
        let report = p
            .analyze(&MovieQuery::new("Dune: Part Two"))
            .await
            .unwrap();

        assert_eq!(report.overall.value, 8.3);
        assert_eq!(report.overall.source, "TMDB");
        assert!(report.padded);
        assert!(report.items.len() >= 50);
        assert!(report.summary.positive >= report.summary.negative);
        assert_eq!(report.summary.total(), report.items.len());
        assert_eq!(report.source_counts.total(), report.items.len());
        assert_eq!(p.state().await, AnalysisState::Ready);
    }

    #[tokio::test]
    async fn analysis_is_deterministic_per_title() {
        let make = || {
            let source: Arc<dyn ReviewSource> = Arc::new(StubReviews {
                items: vec![RawItem {
                    platform: SourcePlatform::YouTube,
                    author: None,
                    content: Some("saw it twice already".to_string()),
                    rating: None,
                    like_count: Some(1),
                    published_at: None,
                }],
                context: Some(dune_context()),
            });
            pipeline(vec![dune_candidate()], vec![source])
        };
        let a = make()
            .analyze(&MovieQuery::new("Dune: Part Two"))
            .await
            .unwrap();
        let b = make()
            .analyze(&MovieQuery::new("Dune: Part Two"))
            .await
            .unwrap();
        assert_eq!(a.summary, b.summary);
        let a_synth: Vec<_> = a
            .items
            .iter()
            .filter(|i| i.platform == SourcePlatform::Synthetic)
            .map(|i| (i.sentiment, i.content.clone()))
            .collect();
        let b_synth: Vec<_> = b
            .items
            .iter()
            .filter(|i| i.platform == SourcePlatform::Synthetic)
            .map(|i| (i.sentiment, i.content.clone()))
            .collect();
        assert_eq!(a_synth, b_synth);
    }

    #[tokio::test]
    async fn year_hint_prefers_matching_candidate() {
        let older = MovieCandidate {
            id: 1,
            title: "Dune".to_string(),
            release_date: NaiveDate::from_ymd_opt(1984, 12, 14),
            poster_path: None,
            backdrop_path: None,
            vote_average: Some(6.2),
            overview: None,
        };
        let newer = MovieCandidate {
            id: 2,
            title: "Dune".to_string(),
            release_date: NaiveDate::from_ymd_opt(2021, 9, 15),
            poster_path: None,
            backdrop_path: None,
            vote_average: Some(7.8),
            overview: None,
        };
        let source: Arc<dyn ReviewSource> = Arc::new(StubReviews {
            items: Vec::new(),
            context: Some(dune_context()),
        });
        let p = pipeline(vec![older, newer], vec![source]);
        let report = p
            .analyze(&MovieQuery::new("Dune").with_year(Some(2021)))
            .await
            .unwrap();
        assert_eq!(report.candidate.id, 2);
    }

    #[tokio::test]
    async fn spam_only_items_still_pad_with_context() {
        let source: Arc<dyn ReviewSource> = Arc::new(StubReviews {
            items: vec![RawItem {
                platform: SourcePlatform::YouTube,
                author: None,
                content: Some("sub4sub promo".to_string()),
                rating: None,
                like_count: None,
                published_at: None,
            }],
            context: Some(dune_context()),
        });
        let p = pipeline(vec![dune_candidate()], vec![source]);
        let report = p
            .analyze(&MovieQuery::new("Dune: Part Two"))
            .await
            .unwrap();
        // The spam item is dropped by sanitization, padding fills the gap.
        assert_eq!(report.source_counts.youtube, 0);
        assert!(report.items.len() >= 50);
    }

    #[tokio::test]
    async fn sentiment_sums_match_item_count() {
        let items: Vec<RawItem> = (0..60)
            .map(|i| RawItem {
                platform: SourcePlatform::YouTube,
                author: Some(format!("user{}", i)),
                content: Some(format!("comment number {} about the film", i)),
                rating: None,
                like_count: Some(i % 7),
                published_at: None,
            })
            .collect();
        let source: Arc<dyn ReviewSource> = Arc::new(StubReviews {
            items,
            context: None,
        });
        let p = pipeline(vec![dune_candidate()], vec![source]);
        let report = p
            .analyze(&MovieQuery::new("Dune: Part Two"))
            .await
            .unwrap();
        assert!(!report.padded);
        assert_eq!(report.summary.total(), report.items.len());
        assert_eq!(report.source_counts.total(), report.items.len());
        assert_eq!(
            report.summary.positive + report.summary.neutral + report.summary.negative,
            60
        );
    }
}
