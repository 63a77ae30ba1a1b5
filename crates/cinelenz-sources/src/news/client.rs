use cinelenz_models::NewsArticle;
use reqwest::Client;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::SourceError;
use crate::news::api;

/// Terms that mark an article as film coverage. The upstream search is
/// broad, so results are filtered again locally.
const FILM_KEYWORDS: &[&str] = &[
    "movie",
    "film",
    "cinema",
    "hollywood",
    "bollywood",
    "actor",
    "actress",
    "director",
    "producer",
    "screenplay",
    "box office",
    "premiere",
    "trailer",
    "sequel",
    "remake",
    "oscar",
    "award",
    "festival",
    "netflix",
    "disney",
    "marvel",
    "superhero",
    "blockbuster",
    "theater",
    "streaming",
    "release",
    "casting",
    "production",
    "studio",
    "entertainment",
];

/// Film-news headlines from NewsAPI, filtered to film coverage and
/// deduplicated by title.
#[derive(Clone)]
pub struct NewsClient {
    client: Client,
    api_key: String,
}

impl NewsClient {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self {
            client: crate::http::build_client(timeout),
            api_key,
        }
    }

    /// General film news. Several search phrasings are tried in order
    /// until enough articles accumulate; a failed phrasing is skipped.
    pub async fn film_news(
        &self,
        topic: &str,
        language: &str,
        limit: u32,
    ) -> Result<Vec<NewsArticle>, SourceError> {
        let phrasings = [
            format!("{} movie film cinema", topic),
            format!("{} hollywood bollywood", topic),
            format!("{} entertainment", topic),
            format!("{} actor actress director", topic),
        ];

        let mut articles = Vec::new();
        for phrasing in &phrasings {
            match api::everything(&self.client, &self.api_key, phrasing, language, limit).await {
                Ok(response) => {
                    articles.extend(filter_film_related(response.articles));
                    if articles.len() >= limit as usize {
                        break;
                    }
                }
                Err(e) => warn!(query = %phrasing, error = %e, "Skipping failed news query"),
            }
        }

        let mut unique = dedupe_by_title(articles);
        unique.truncate(limit as usize);
        debug!(topic, count = unique.len(), "Fetched film news");
        Ok(unique)
    }

    /// News scoped to one title.
    pub async fn search(
        &self,
        query: &str,
        language: &str,
        limit: u32,
    ) -> Result<Vec<NewsArticle>, SourceError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return self.film_news("movies", language, limit).await;
        }

        let phrased = format!("{} movie film cinema entertainment", trimmed);
        let response =
            api::everything(&self.client, &self.api_key, &phrased, language, limit).await?;
        let mut unique = dedupe_by_title(filter_film_related(response.articles));
        unique.truncate(limit as usize);
        Ok(unique)
    }
}

fn is_film_related(title: &str, description: Option<&str>) -> bool {
    let text = format!("{} {}", title, description.unwrap_or("")).to_lowercase();
    FILM_KEYWORDS.iter().any(|keyword| text.contains(keyword))
}

fn filter_film_related(articles: Vec<api::Article>) -> Vec<NewsArticle> {
    articles
        .into_iter()
        .filter_map(api::Article::into_article)
        .filter(|article| is_film_related(&article.title, article.description.as_deref()))
        .collect()
}

/// Keep the first occurrence of each title; repeated syndicated copies
/// are dropped.
fn dedupe_by_title(articles: Vec<NewsArticle>) -> Vec<NewsArticle> {
    let mut seen = HashSet::new();
    articles
        .into_iter()
        .filter(|article| seen.insert(article.title.clone()))
        .collect()
}
