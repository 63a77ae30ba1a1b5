use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::error::SourceError;

pub const YOUTUBE_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
pub const COMMENT_PAGE_SIZE: u32 = 100;
const PROVIDER: &str = "youtube";

#[derive(Debug, Deserialize)]
pub struct VideoSearchResponse {
    #[serde(default)]
    pub items: Vec<VideoSearchItem>,
}

#[derive(Debug, Deserialize)]
pub struct VideoSearchItem {
    pub id: VideoId,
}

#[derive(Debug, Deserialize)]
pub struct VideoId {
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentThreadsPage {
    #[serde(default)]
    pub items: Vec<CommentThread>,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentThread {
    pub snippet: Option<ThreadSnippet>,
}

#[derive(Debug, Deserialize)]
pub struct ThreadSnippet {
    #[serde(rename = "topLevelComment")]
    pub top_level_comment: Option<TopLevelComment>,
}

#[derive(Debug, Deserialize)]
pub struct TopLevelComment {
    pub snippet: Option<CommentSnippet>,
}

#[derive(Debug, Deserialize)]
pub struct CommentSnippet {
    #[serde(rename = "textOriginal")]
    pub text_original: Option<String>,
    #[serde(rename = "textDisplay")]
    pub text_display: Option<String>,
    #[serde(rename = "authorDisplayName")]
    pub author_display_name: Option<String>,
    #[serde(rename = "likeCount")]
    pub like_count: Option<u64>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<DateTime<Utc>>,
}

impl CommentSnippet {
    /// Prefer the raw comment text; the display variant carries HTML.
    pub fn text(&self) -> Option<&str> {
        self.text_original
            .as_deref()
            .or(self.text_display.as_deref())
    }
}

impl CommentThreadsPage {
    /// Flatten the thread nesting down to the top-level comment snippets.
    pub fn into_snippets(self) -> Vec<CommentSnippet> {
        self.items
            .into_iter()
            .filter_map(|thread| thread.snippet?.top_level_comment?.snippet)
            .collect()
    }
}

async fn get_json<T: serde::de::DeserializeOwned>(
    client: &Client,
    url: &str,
) -> Result<T, SourceError> {
    let response = client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| SourceError::from_reqwest(PROVIDER, e))?;

    if !response.status().is_success() {
        return Err(SourceError::status(PROVIDER, response.status()));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| SourceError::payload(PROVIDER, e.to_string()))
}

/// Video search scoped to the trailer/discussion uploads for a title.
pub async fn search_videos(
    client: &Client,
    api_key: &str,
    query: &str,
    max_results: u32,
) -> Result<VideoSearchResponse, SourceError> {
    let url = format!(
        "{}/search?part=id&type=video&maxResults={}&q={}&key={}",
        YOUTUBE_BASE_URL,
        max_results,
        urlencoding::encode(query),
        api_key
    );
    get_json(client, &url).await
}

/// One page of top-level comment threads for a video.
pub async fn comment_threads(
    client: &Client,
    api_key: &str,
    video_id: &str,
    page_token: Option<&str>,
) -> Result<CommentThreadsPage, SourceError> {
    let mut url = format!(
        "{}/commentThreads?part=snippet&videoId={}&maxResults={}&textFormat=plainText&key={}",
        YOUTUBE_BASE_URL, video_id, COMMENT_PAGE_SIZE, api_key
    );
    if let Some(token) = page_token {
        url.push_str(&format!("&pageToken={}", token));
    }
    get_json(client, &url).await
}
