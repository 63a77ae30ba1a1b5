use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// What the pipeline is asked to analyze: a title plus an optional
/// release-year hint used to disambiguate provider lookups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieQuery {
    pub title: String,
    pub year: Option<u32>,
}

impl MovieQuery {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), year: None }
    }

    pub fn with_year(mut self, year: Option<u32>) -> Self {
        self.year = year;
        self
    }
}

/// A ranked match from the metadata provider's title search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieCandidate {
    pub id: u64,
    pub title: String,
    pub release_date: Option<NaiveDate>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: Option<f64>,
    pub overview: Option<String>,
}

impl MovieCandidate {
    pub fn year(&self) -> Option<u32> {
        use chrono::Datelike;
        self.release_date.map(|d| d.year() as u32)
    }
}

/// Descriptive fields about a movie, used both for classification context
/// and for filling synthetic review templates. All fields except the title
/// are best-effort.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MovieContext {
    pub title: String,
    pub year: Option<u32>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub actors: Option<String>,
    pub plot: Option<String>,
    pub runtime: Option<String>,
    pub awards: Option<String>,
}

impl MovieContext {
    /// Whether enough descriptive data exists to ground synthetic reviews.
    /// A bare title is not enough; at least one descriptive field must be
    /// present.
    pub fn has_descriptive_fields(&self) -> bool {
        self.genre.is_some()
            || self.director.is_some()
            || self.actors.is_some()
            || self.plot.is_some()
    }
}
