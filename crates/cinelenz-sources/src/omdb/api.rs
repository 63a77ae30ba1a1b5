use cinelenz_models::MovieContext;
use reqwest::Client;
use serde::Deserialize;

use crate::error::SourceError;
use crate::raw::{RatingScale, RawRating};

pub const OMDB_BASE_URL: &str = "https://www.omdbapi.com";
const PROVIDER: &str = "omdb";

/// OMDb answers every request with HTTP 200 and signals lookup failure
/// through `Response: "False"`, so the payload itself is the contract.
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbResponse {
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "Year")]
    pub year: Option<String>,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "Ratings", default)]
    pub ratings: Vec<OmdbRatingEntry>,
    #[serde(rename = "Genre")]
    pub genre: Option<String>,
    #[serde(rename = "Director")]
    pub director: Option<String>,
    #[serde(rename = "Actors")]
    pub actors: Option<String>,
    #[serde(rename = "Plot")]
    pub plot: Option<String>,
    #[serde(rename = "Runtime")]
    pub runtime: Option<String>,
    #[serde(rename = "Awards")]
    pub awards: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OmdbRatingEntry {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Value")]
    pub value: String,
}

impl OmdbResponse {
    pub fn found(&self) -> bool {
        self.response == "True"
    }

    /// OMDb uses the literal string "N/A" for absent fields.
    fn field(value: &Option<String>) -> Option<String> {
        value
            .as_deref()
            .filter(|v| !v.is_empty() && *v != "N/A")
            .map(|v| v.to_string())
    }

    pub fn into_context(self, fallback_title: &str) -> MovieContext {
        let year = Self::field(&self.year)
            .and_then(|y| y.chars().take(4).collect::<String>().parse::<u32>().ok());
        MovieContext {
            title: Self::field(&self.title).unwrap_or_else(|| fallback_title.to_string()),
            year,
            genre: Self::field(&self.genre),
            director: Self::field(&self.director),
            actors: Self::field(&self.actors),
            plot: Self::field(&self.plot),
            runtime: Self::field(&self.runtime),
            awards: Self::field(&self.awards),
        }
    }

    /// The named rating signals this record carries, in overall-rating
    /// preference order: IMDb, then Rotten Tomatoes, then Metacritic.
    /// Unparseable values are skipped, not defaulted.
    pub fn rating_signals(&self) -> Vec<RawRating> {
        let mut signals = Vec::new();

        if let Some(value) = Self::field(&self.imdb_rating).and_then(|v| v.parse::<f64>().ok()) {
            signals.push(RawRating {
                value,
                scale: RatingScale::TenPoint,
                label: "IMDb".to_string(),
                priority: Some(1),
            });
        }

        for entry in &self.ratings {
            match entry.source.as_str() {
                "Rotten Tomatoes" => {
                    if let Some(value) = parse_percent(&entry.value) {
                        signals.push(RawRating {
                            value,
                            scale: RatingScale::HundredPoint,
                            label: "Rotten Tomatoes".to_string(),
                            priority: Some(2),
                        });
                    }
                }
                "Metacritic" => {
                    if let Some(value) = parse_fraction_of_hundred(&entry.value) {
                        signals.push(RawRating {
                            value,
                            scale: RatingScale::HundredPoint,
                            label: "Metacritic".to_string(),
                            priority: Some(3),
                        });
                    }
                }
                _ => {}
            }
        }

        signals
    }
}

/// Parse "94%" into 94.0.
fn parse_percent(value: &str) -> Option<f64> {
    value.trim().trim_end_matches('%').parse::<f64>().ok()
}

/// Parse "74/100" into 74.0.
fn parse_fraction_of_hundred(value: &str) -> Option<f64> {
    value.trim().split('/').next()?.trim().parse::<f64>().ok()
}

/// Look a title up by name, with an optional year hint.
pub async fn lookup(
    client: &Client,
    api_key: &str,
    title: &str,
    year: Option<u32>,
) -> Result<OmdbResponse, SourceError> {
    let mut url = format!(
        "{}/?apikey={}&t={}",
        OMDB_BASE_URL,
        api_key,
        urlencoding::encode(title)
    );
    if let Some(year) = year {
        url.push_str(&format!("&y={}", year));
    }

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
        .json::<OmdbResponse>()
        .await
        .map_err(|e| SourceError::payload(PROVIDER, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OmdbResponse {
        serde_json::from_str(
            r#"{
                "Response": "True",
                "Title": "Dune: Part Two",
                "Year": "2024",
                "imdbRating": "8.5",
                "Ratings": [
                    {"Source": "Internet Movie Database", "Value": "8.5/10"},
                    {"Source": "Rotten Tomatoes", "Value": "92%"},
                    {"Source": "Metacritic", "Value": "79/100"}
                ],
                "Genre": "Action, Adventure, Drama",
                "Director": "Denis Villeneuve",
                "Actors": "Timothée Chalamet, Zendaya",
                "Plot": "Paul Atreides unites with the Fremen.",
                "Runtime": "166 min",
                "Awards": "Won 2 Oscars"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn rating_signals_keep_preference_order() {
        let signals = sample().rating_signals();
        assert_eq!(signals.len(), 3);
        assert_eq!(signals[0].label, "IMDb");
        assert_eq!(signals[0].priority, Some(1));
        assert_eq!(signals[1].value, 92.0);
        assert_eq!(signals[1].scale, RatingScale::HundredPoint);
        assert_eq!(signals[2].value, 79.0);
    }

    #[test]
    fn not_available_fields_are_skipped() {
        let response: OmdbResponse = serde_json::from_str(
            r#"{"Response": "True", "imdbRating": "N/A", "Director": "N/A"}"#,
        )
        .unwrap();
        assert!(response.rating_signals().is_empty());
        let context = response.into_context("Some Title");
        assert_eq!(context.title, "Some Title");
        assert!(context.director.is_none());
    }

    #[test]
    fn lookup_miss_is_not_found() {
        let response: OmdbResponse = serde_json::from_str(
            r#"{"Response": "False", "Error": "Movie not found!"}"#,
        )
        .unwrap();
        assert!(!response.found());
    }

    #[test]
    fn context_extracts_descriptive_fields() {
        let context = sample().into_context("fallback");
        assert_eq!(context.title, "Dune: Part Two");
        assert_eq!(context.year, Some(2024));
        assert_eq!(context.director.as_deref(), Some("Denis Villeneuve"));
        assert!(context.has_descriptive_fields());
    }

    #[test]
    fn percent_and_fraction_parsers() {
        assert_eq!(parse_percent("94%"), Some(94.0));
        assert_eq!(parse_percent("garbage"), None);
        assert_eq!(parse_fraction_of_hundred("74/100"), Some(74.0));
        assert_eq!(parse_fraction_of_hundred(""), None);
    }
}
