use async_trait::async_trait;
use cinelenz_models::{MovieCandidate, MovieQuery, SourcePlatform};
use futures::future::join_all;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::SourceError;
use crate::key_rotation::KeyRing;
use crate::raw::RawItem;
use crate::traits::ReviewSource;
use crate::youtube::api;

/// Audience-comment source: finds the trailer uploads for a title and
/// harvests top-level comments from each. Quota pressure is spread
/// across the key ring, one key per request.
#[derive(Clone)]
pub struct YouTubeClient {
    client: Client,
    keys: Arc<KeyRing>,
    video_cap: u32,
    comment_page_cap: u32,
}

impl YouTubeClient {
    pub fn new(
        keys: Arc<KeyRing>,
        timeout: Duration,
        video_cap: u32,
        comment_page_cap: u32,
    ) -> Self {
        Self {
            client: crate::http::build_client(timeout),
            keys,
            video_cap,
            comment_page_cap,
        }
    }

    fn key(&self) -> Result<String, SourceError> {
        self.keys
            .next_key()
            .map(|k| k.to_string())
            .ok_or_else(|| SourceError::payload("youtube", "no API keys configured"))
    }

    async fn find_video_ids(&self, title: &str) -> Result<Vec<String>, SourceError> {
        let query = format!("{} official trailer", title);
        let key = self.key()?;
        let response =
            api::search_videos(&self.client, &key, &query, self.video_cap).await?;
        Ok(response
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .take(self.video_cap as usize)
            .collect())
    }

    /// Comment pages for one video are chained by page token, so they are
    /// fetched sequentially up to the page cap. A failed page ends the
    /// walk for that video without discarding earlier pages.
    async fn video_comments(&self, video_id: &str) -> Vec<api::CommentSnippet> {
        let mut snippets = Vec::new();
        let mut page_token: Option<String> = None;

        for _ in 0..self.comment_page_cap {
            let key = match self.key() {
                Ok(key) => key,
                Err(_) => break,
            };
            let page =
                match api::comment_threads(&self.client, &key, video_id, page_token.as_deref())
                    .await
                {
                    Ok(page) => page,
                    Err(e) => {
                        warn!(video_id, error = %e, "Stopping comment walk for video");
                        break;
                    }
                };
            let next = page.next_page_token.clone();
            snippets.extend(page.into_snippets());
            match next {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        snippets
    }
}

fn snippet_to_raw(snippet: api::CommentSnippet) -> Option<RawItem> {
    let content = snippet.text()?.trim().to_string();
    if content.is_empty() {
        return None;
    }
    Some(RawItem {
        platform: SourcePlatform::YouTube,
        author: snippet.author_display_name.clone(),
        content: Some(content),
        rating: None,
        like_count: snippet.like_count,
        published_at: snippet.published_at,
    })
}

#[async_trait]
impl ReviewSource for YouTubeClient {
    fn source_name(&self) -> &str {
        "youtube"
    }

    fn platform(&self) -> SourcePlatform {
        SourcePlatform::YouTube
    }

    async fn fetch_items(
        &self,
        query: &MovieQuery,
        _candidate: Option<&MovieCandidate>,
    ) -> Result<Vec<RawItem>, SourceError> {
        let video_ids = self.find_video_ids(&query.title).await?;
        if video_ids.is_empty() {
            debug!(title = %query.title, "No trailer uploads found");
            return Ok(Vec::new());
        }

        let fetches = video_ids.iter().map(|id| self.video_comments(id));
        let items: Vec<RawItem> = join_all(fetches)
            .await
            .into_iter()
            .flatten()
            .filter_map(snippet_to_raw)
            .collect();

        debug!(title = %query.title, count = items.len(), "Fetched YouTube comments");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_without_text_is_dropped() {
        let snippet: api::CommentSnippet =
            serde_json::from_str(r#"{"authorDisplayName": "someone"}"#).unwrap();
        assert!(snippet_to_raw(snippet).is_none());
    }

    #[test]
    fn snippet_maps_to_youtube_item() {
        let snippet: api::CommentSnippet = serde_json::from_str(
            r#"{
                "textOriginal": "  loved it  ",
                "authorDisplayName": "viewer",
                "likeCount": 7,
                "publishedAt": "2024-03-02T10:00:00Z"
            }"#,
        )
        .unwrap();
        let item = snippet_to_raw(snippet).unwrap();
        assert_eq!(item.platform, SourcePlatform::YouTube);
        assert_eq!(item.content.as_deref(), Some("loved it"));
        assert_eq!(item.like_count, Some(7));
        assert!(item.rating.is_none());
    }

    #[test]
    fn whitespace_only_comment_is_dropped() {
        let snippet: api::CommentSnippet =
            serde_json::from_str(r#"{"textOriginal": "   "}"#).unwrap();
        assert!(snippet_to_raw(snippet).is_none());
    }
}
