use chrono::{DateTime, NaiveDate, Utc};
use cinelenz_models::MovieCandidate;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::SourceError;

pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
const PROVIDER: &str = "tmdb";

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<TmdbMovie>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbMovie {
    pub id: u64,
    pub title: String,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: Option<f64>,
    pub overview: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReviewsPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub results: Vec<TmdbReview>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbReview {
    pub author: Option<String>,
    pub content: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub author_details: Option<AuthorDetails>,
}

#[derive(Debug, Deserialize)]
pub struct AuthorDetails {
    pub rating: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    pub release_date: Option<String>,
    pub overview: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    pub runtime: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct Genre {
    pub name: String,
}

impl MovieDetails {
    pub fn into_context(self) -> cinelenz_models::MovieContext {
        let year = self
            .release_date
            .as_deref()
            .filter(|d| !d.is_empty())
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .map(|d| {
                use chrono::Datelike;
                d.year() as u32
            });
        let genre = if self.genres.is_empty() {
            None
        } else {
            Some(
                self.genres
                    .iter()
                    .map(|g| g.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            )
        };
        cinelenz_models::MovieContext {
            title: self.title,
            year,
            genre,
            director: None,
            actors: None,
            plot: self.overview.filter(|o| !o.is_empty()),
            runtime: self.runtime.map(|minutes| format!("{} min", minutes)),
            awards: None,
        }
    }
}

impl TmdbMovie {
    pub fn into_candidate(self) -> MovieCandidate {
        let release_date = self
            .release_date
            .as_deref()
            .filter(|d| !d.is_empty())
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());
        MovieCandidate {
            id: self.id,
            title: self.title,
            release_date,
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            vote_average: self.vote_average,
            overview: self.overview,
        }
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

/// Search movies by free-text title.
pub async fn search_movie(
    client: &Client,
    api_key: &str,
    title: &str,
) -> Result<Vec<MovieCandidate>, SourceError> {
    let url = format!(
        "{}/search/movie?api_key={}&query={}&language=en-US&page=1&include_adult=false",
        TMDB_BASE_URL,
        api_key,
        urlencoding::encode(title)
    );
    let data: SearchResponse = get_json(client, &url).await?;
    debug!(results = data.results.len(), title, "TMDB search complete");
    Ok(data.results.into_iter().map(TmdbMovie::into_candidate).collect())
}

/// One page of user reviews for a movie id.
pub async fn movie_reviews(
    client: &Client,
    api_key: &str,
    movie_id: u64,
    page: u32,
) -> Result<ReviewsPage, SourceError> {
    let url = format!(
        "{}/movie/{}/reviews?api_key={}&language=en-US&page={}",
        TMDB_BASE_URL, movie_id, api_key, page
    );
    get_json(client, &url).await
}

/// Full record for one movie id.
pub async fn movie_details(
    client: &Client,
    api_key: &str,
    movie_id: u64,
) -> Result<MovieDetails, SourceError> {
    let url = format!(
        "{}/movie/{}?api_key={}&language=en-US",
        TMDB_BASE_URL, movie_id, api_key
    );
    get_json(client, &url).await
}

/// Today's trending movies.
pub async fn trending_today(
    client: &Client,
    api_key: &str,
    language: &str,
) -> Result<Vec<MovieCandidate>, SourceError> {
    let url = format!(
        "{}/trending/movie/day?api_key={}&language={}",
        TMDB_BASE_URL, api_key, language
    );
    let data: SearchResponse = get_json(client, &url).await?;
    Ok(data.results.into_iter().map(TmdbMovie::into_candidate).collect())
}
