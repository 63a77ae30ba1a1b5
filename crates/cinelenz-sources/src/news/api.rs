use chrono::{DateTime, Utc};
use cinelenz_models::NewsArticle;
use reqwest::Client;
use serde::Deserialize;

use crate::error::SourceError;

pub const NEWS_BASE_URL: &str = "https://newsapi.org/v2";
const PROVIDER: &str = "news";

#[derive(Debug, Deserialize)]
pub struct EverythingResponse {
    #[serde(default)]
    pub articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
pub struct Article {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "urlToImage")]
    pub url_to_image: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub source: ArticleSource,
    pub author: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ArticleSource {
    pub name: Option<String>,
}

impl Article {
    /// Articles without a title or link cannot be displayed.
    pub fn into_article(self) -> Option<NewsArticle> {
        let title = self.title.filter(|t| !t.is_empty())?;
        let url = self.url.filter(|u| !u.is_empty())?;
        Some(NewsArticle {
            title,
            description: self.description,
            url,
            image: self.url_to_image,
            published_at: self.published_at,
            source: self.source.name,
            author: self.author,
        })
    }
}

/// Full-text article search, newest first.
pub async fn everything(
    client: &Client,
    api_key: &str,
    query: &str,
    language: &str,
    page_size: u32,
) -> Result<EverythingResponse, SourceError> {
    let url = format!(
        "{}/everything?q={}&language={}&sortBy=publishedAt&pageSize={}&page=1&apiKey={}",
        NEWS_BASE_URL,
        urlencoding::encode(query),
        language,
        page_size.min(100),
        api_key
    );

    let response = client
        .get(&url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| SourceError::from_reqwest(PROVIDER, e))?;

    if !response.status().is_success() {
        return Err(SourceError::status(PROVIDER, response.status()));
    }

    response
        .json::<EverythingResponse>()
        .await
        .map_err(|e| SourceError::payload(PROVIDER, e.to_string()))
}
