use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A film-news headline. Display-only; no sentiment classification is
/// applied to news articles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsArticle {
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub image: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub source: Option<String>,
    pub author: Option<String>,
}
