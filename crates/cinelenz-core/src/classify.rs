use cinelenz_config::{AnalysisOptions, Lexicon};
use cinelenz_models::Sentiment;
use cinelenz_sources::{RatingScale, RawItem, RawRating};

use crate::seed::TitleRng;

/// Labels raw items with a sentiment. Thresholds come from the tuning
/// options; keyword tables come from the lexicon; mid-band and
/// unmatched-text ties are broken by the per-title draw sequence, so the
/// whole labeling pass is deterministic for a given title.
pub struct Classifier<'a> {
    lexicon: &'a Lexicon,
    options: &'a AnalysisOptions,
    rng: TitleRng,
}

impl<'a> Classifier<'a> {
    pub fn new(lexicon: &'a Lexicon, options: &'a AnalysisOptions, title: &str) -> Self {
        Self {
            lexicon,
            options,
            rng: TitleRng::from_title(title),
        }
    }

    pub fn classify(&mut self, item: &RawItem) -> Sentiment {
        match &item.rating {
            Some(rating) => self.classify_rating(rating),
            None => self.classify_text(
                item.content.as_deref().unwrap_or(""),
                item.like_count.unwrap_or(0),
            ),
        }
    }

    /// Numeric ratings split into a positive band, a negative band, and a
    /// mid band resolved by the seeded draw. Non-finite values default to
    /// neutral.
    pub fn classify_rating(&mut self, rating: &RawRating) -> Sentiment {
        if !rating.value.is_finite() {
            return Sentiment::Neutral;
        }
        let (positive_floor, negative_ceiling) = match rating.scale {
            RatingScale::TenPoint => (7.0, 5.0),
            RatingScale::HundredPoint => (70.0, 50.0),
        };
        if rating.value >= positive_floor {
            Sentiment::Positive
        } else if rating.value < negative_ceiling {
            Sentiment::Negative
        } else if self.rng.chance(self.options.mid_band_positive) {
            Sentiment::Positive
        } else {
            Sentiment::Neutral
        }
    }

    /// Keyword matching over lower-cased text. A negative hit wins even
    /// when positive keywords also match. Unmatched comments lean on the
    /// like count, then on the seeded draw.
    pub fn classify_text(&mut self, text: &str, like_count: u64) -> Sentiment {
        let lowered = text.to_lowercase();
        let has_negative = contains_any(&lowered, &self.lexicon.negative);
        let has_positive = contains_any(&lowered, &self.lexicon.positive);

        if has_negative {
            Sentiment::Negative
        } else if has_positive {
            Sentiment::Positive
        } else if like_count >= self.options.like_floor {
            Sentiment::Positive
        } else if self.rng.chance(self.options.comment_positive) {
            Sentiment::Positive
        } else {
            Sentiment::Neutral
        }
    }
}

fn contains_any(text: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword.as_str()))
}
