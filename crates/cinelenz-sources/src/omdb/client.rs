use async_trait::async_trait;
use cinelenz_models::{MovieCandidate, MovieContext, MovieQuery, SourcePlatform};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::SourceError;
use crate::omdb::api;
use crate::raw::{RawItem, RawRating};
use crate::traits::ReviewSource;

/// OMDb contributes named critic/aggregate ratings (IMDb, Rotten
/// Tomatoes, Metacritic) plus the descriptive movie context used to
/// ground synthetic reviews.
#[derive(Clone)]
pub struct OmdbClient {
    client: Client,
    api_key: String,
    cache: Arc<Mutex<Option<(MovieQuery, Option<api::OmdbResponse>)>>>,
}

impl OmdbClient {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self {
            client: crate::http::build_client(timeout),
            api_key,
            cache: Arc::new(Mutex::new(None)),
        }
    }

    /// One analysis asks this client for items and then for context. The
    /// last response is kept, misses included, so both answers come from
    /// a single request.
    async fn lookup(&self, query: &MovieQuery) -> Result<Option<api::OmdbResponse>, SourceError> {
        let mut cache = self.cache.lock().await;
        if let Some((cached_query, response)) = cache.as_ref() {
            if cached_query == query {
                return Ok(response.clone());
            }
        }

        let response = api::lookup(&self.client, &self.api_key, &query.title, query.year).await?;
        let response = if response.found() {
            Some(response)
        } else {
            debug!(title = %query.title, "No OMDb record for title");
            None
        };
        *cache = Some((query.clone(), response.clone()));
        Ok(response)
    }
}

/// A named rating carries no prose of its own, so give it a one-line
/// body that renders sensibly alongside real reviews.
fn rating_to_raw(rating: RawRating) -> RawItem {
    let content = match rating.scale {
        crate::raw::RatingScale::TenPoint => {
            format!("Rated {:.1}/10 on {}", rating.value, rating.label)
        }
        crate::raw::RatingScale::HundredPoint => {
            format!("Scored {:.0}/100 on {}", rating.value, rating.label)
        }
    };
    RawItem {
        platform: SourcePlatform::Omdb,
        author: Some(rating.label.clone()),
        content: Some(content),
        rating: Some(rating),
        like_count: None,
        published_at: None,
    }
}

#[async_trait]
impl ReviewSource for OmdbClient {
    fn source_name(&self) -> &str {
        "omdb"
    }

    fn platform(&self) -> SourcePlatform {
        SourcePlatform::Omdb
    }

    async fn fetch_items(
        &self,
        query: &MovieQuery,
        _candidate: Option<&MovieCandidate>,
    ) -> Result<Vec<RawItem>, SourceError> {
        let Some(response) = self.lookup(query).await? else {
            return Ok(Vec::new());
        };
        Ok(response
            .rating_signals()
            .into_iter()
            .map(rating_to_raw)
            .collect())
    }

    async fn movie_context(
        &self,
        query: &MovieQuery,
    ) -> Result<Option<MovieContext>, SourceError> {
        Ok(self
            .lookup(query)
            .await?
            .map(|response| response.into_context(&query.title)))
    }
}
