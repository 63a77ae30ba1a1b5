use chrono::{DateTime, Utc};
use cinelenz_models::SourcePlatform;

/// The scale a numeric rating was reported on, which determines the
/// classification thresholds applied to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingScale {
    /// 0-10 scores (TMDB user reviews, IMDb).
    TenPoint,
    /// 0-100 scores (Rotten Tomatoes percentages, Metacritic).
    HundredPoint,
}

/// A numeric opinion signal attached to a raw item.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRating {
    pub value: f64,
    pub scale: RatingScale,
    /// Display name of the signal, e.g. "IMDb" or "Rotten Tomatoes".
    pub label: String,
    /// Position in the overall-rating preference order. `None` means the
    /// signal classifies an item but never becomes the headline rating
    /// (TMDB user review scores behave this way).
    pub priority: Option<u8>,
}

impl RawRating {
    /// The rating normalized onto a 0-10 scale.
    pub fn value_on_ten(&self) -> f64 {
        match self.scale {
            RatingScale::TenPoint => self.value,
            RatingScale::HundredPoint => self.value / 10.0,
        }
    }
}

/// One unclassified unit fetched from a provider: a review, a named
/// rating, or a comment. Fields a provider does not supply stay `None`
/// and are defaulted centrally by the classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct RawItem {
    pub platform: SourcePlatform,
    pub author: Option<String>,
    pub content: Option<String>,
    pub rating: Option<RawRating>,
    pub like_count: Option<u64>,
    pub published_at: Option<DateTime<Utc>>,
}

impl RawItem {
    pub fn is_numeric(&self) -> bool {
        self.rating.is_some()
    }
}
