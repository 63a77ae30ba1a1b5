use async_trait::async_trait;
use cinelenz_models::{MovieCandidate, MovieQuery, SourcePlatform};
use futures::future::join_all;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::SourceError;
use crate::raw::{RatingScale, RawItem, RawRating};
use crate::tmdb::api;
use crate::traits::{MovieSearch, ReviewSource};

/// Metadata/search provider client. Besides title search and trending
/// lists, it contributes paged user reviews to the analysis pipeline.
#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    api_key: String,
    review_page_cap: u32,
}

impl TmdbClient {
    pub fn new(api_key: String, timeout: Duration, review_page_cap: u32) -> Self {
        let client = crate::http::build_client(timeout);
        Self {
            client,
            api_key,
            review_page_cap,
        }
    }

    pub async fn search(&self, title: &str) -> Result<Vec<MovieCandidate>, SourceError> {
        api::search_movie(&self.client, &self.api_key, title).await
    }

    pub async fn movie_details(&self, movie_id: u64) -> Result<api::MovieDetails, SourceError> {
        api::movie_details(&self.client, &self.api_key, movie_id).await
    }

    pub async fn trending_today(
        &self,
        language: &str,
    ) -> Result<Vec<MovieCandidate>, SourceError> {
        api::trending_today(&self.client, &self.api_key, language).await
    }

    /// All user reviews for a movie, following pagination up to the page
    /// cap. The first page establishes the page count; remaining pages are
    /// fetched concurrently, and a failed page is skipped rather than
    /// failing the whole fetch.
    pub async fn all_reviews(&self, movie_id: u64) -> Result<Vec<api::TmdbReview>, SourceError> {
        let first = api::movie_reviews(&self.client, &self.api_key, movie_id, 1).await?;
        let max_pages = first.total_pages.min(self.review_page_cap);
        let mut reviews = first.results;

        if max_pages > 1 {
            let fetches = (2..=max_pages)
                .map(|page| api::movie_reviews(&self.client, &self.api_key, movie_id, page));
            for result in join_all(fetches).await {
                match result {
                    Ok(page) => reviews.extend(page.results),
                    Err(e) => warn!(movie_id, error = %e, "Skipping failed TMDB review page"),
                }
            }
        }

        debug!(movie_id, count = reviews.len(), "Fetched TMDB reviews");
        Ok(reviews)
    }
}

fn review_to_raw(review: api::TmdbReview) -> RawItem {
    let rating = review
        .author_details
        .and_then(|d| d.rating)
        .map(|value| RawRating {
            value,
            scale: RatingScale::TenPoint,
            label: "TMDB".to_string(),
            // User review scores classify items but never become the
            // headline rating; the search result's vote average does.
            priority: None,
        });
    RawItem {
        platform: SourcePlatform::Tmdb,
        author: review.author,
        content: review.content,
        rating,
        like_count: None,
        published_at: review.created_at,
    }
}

#[async_trait]
impl MovieSearch for TmdbClient {
    async fn search(&self, query: &MovieQuery) -> Result<Vec<MovieCandidate>, SourceError> {
        TmdbClient::search(self, &query.title).await
    }
}

#[async_trait]
impl ReviewSource for TmdbClient {
    fn source_name(&self) -> &str {
        "tmdb"
    }

    fn platform(&self) -> SourcePlatform {
        SourcePlatform::Tmdb
    }

    async fn fetch_items(
        &self,
        _query: &MovieQuery,
        candidate: Option<&MovieCandidate>,
    ) -> Result<Vec<RawItem>, SourceError> {
        // Reviews are keyed by provider id; without a resolved candidate
        // there is nothing to fetch.
        let Some(candidate) = candidate else {
            return Ok(Vec::new());
        };
        let reviews = self.all_reviews(candidate.id).await?;
        Ok(reviews.into_iter().map(review_to_raw).collect())
    }

    async fn movie_context(
        &self,
        query: &MovieQuery,
    ) -> Result<Option<cinelenz_models::MovieContext>, SourceError> {
        let candidates = TmdbClient::search(self, &query.title).await?;
        let Some(candidate) = candidates.first() else {
            return Ok(None);
        };
        let details = self.movie_details(candidate.id).await?;
        Ok(Some(details.into_context()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rated_review_keeps_ten_point_scale() {
        let review: api::TmdbReview = serde_json::from_str(
            r#"{"author": "a", "content": "fine", "author_details": {"rating": 6.0}}"#,
        )
        .unwrap();
        let raw = review_to_raw(review);
        let rating = raw.rating.unwrap();
        assert_eq!(rating.scale, RatingScale::TenPoint);
        assert_eq!(rating.priority, None);
        assert_eq!(raw.platform, SourcePlatform::Tmdb);
    }

    #[test]
    fn unrated_review_has_no_rating() {
        let review: api::TmdbReview =
            serde_json::from_str(r#"{"author": "a", "content": "words only"}"#).unwrap();
        assert!(review_to_raw(review).rating.is_none());
    }
}
