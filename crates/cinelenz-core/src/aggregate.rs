use cinelenz_config::AnalysisOptions;
use cinelenz_models::{
    AnalysisReport, MovieCandidate, MovieContext, OverallRating, ReviewItem, SentimentSummary,
    SourceCounts,
};
use cinelenz_sources::RawRating;
use tracing::debug;

use crate::seed::TitleRng;
use crate::synthetic::SyntheticGenerator;

/// Turns a classified collection into the final report: pads short
/// collections from context, tallies the summaries, picks the overall
/// rating, and fixes the display order.
pub struct Aggregator<'a> {
    options: &'a AnalysisOptions,
}

impl<'a> Aggregator<'a> {
    pub fn new(options: &'a AnalysisOptions) -> Self {
        Self { options }
    }

    pub fn finalize(
        &self,
        candidate: MovieCandidate,
        mut items: Vec<ReviewItem>,
        rating_signals: &[RawRating],
        context: Option<&MovieContext>,
        rng: &mut TitleRng,
    ) -> AnalysisReport {
        let mut padded = false;
        if items.len() < self.options.min_reviews {
            // A bare-title context cannot ground synthetic reviews.
            if let Some(context) = context.filter(|c| c.has_descriptive_fields()) {
                let needed = self.options.min_reviews - items.len();
                let release_timestamp = candidate
                    .release_date
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .map(|dt| dt.and_utc());
                let generator = SyntheticGenerator::new(context, self.options, release_timestamp);
                items.extend(generator.generate(needed, rng));
                padded = true;
                debug!(needed, "Padded collection with synthetic reviews");
            }
        }

        let mut summary = SentimentSummary::default();
        let mut source_counts = SourceCounts::default();
        for item in &items {
            summary.record(item.sentiment);
            source_counts.record(item.platform);
        }

        let overall = overall_rating(&candidate, rating_signals, &summary);
        sort_for_display(&mut items);

        AnalysisReport {
            candidate,
            items,
            summary,
            source_counts,
            overall,
            padded,
        }
    }
}

/// The headline score: the highest-priority concrete provider rating,
/// with the metadata provider's vote average ranked first. Collections
/// with no provider rating fall back to the positive ratio on a 0-10
/// scale, tagged "Aggregate".
fn overall_rating(
    candidate: &MovieCandidate,
    rating_signals: &[RawRating],
    summary: &SentimentSummary,
) -> OverallRating {
    let vote_average = candidate
        .vote_average
        .filter(|v| v.is_finite())
        .map(|value| OverallRating {
            value,
            source: "TMDB".to_string(),
        });

    let best_signal = rating_signals
        .iter()
        .filter(|signal| signal.priority.is_some() && signal.value.is_finite())
        .min_by_key(|signal| signal.priority)
        .map(|signal| OverallRating {
            value: signal.value_on_ten(),
            source: signal.label.clone(),
        });

    let raw = vote_average.or(best_signal).unwrap_or_else(|| {
        let total = summary.total();
        let ratio = if total > 0 {
            summary.positive as f64 / total as f64
        } else {
            0.0
        };
        OverallRating {
            value: ratio * 10.0,
            source: "Aggregate".to_string(),
        }
    });

    OverallRating {
        value: (raw.value.clamp(0.0, 10.0) * 10.0).round() / 10.0,
        source: raw.source,
    }
}

/// Deterministic display order: newest first, ties broken by id.
fn sort_for_display(items: &mut [ReviewItem]) {
    items.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use cinelenz_models::{Sentiment, SourcePlatform};
    use cinelenz_sources::RatingScale;

    fn candidate(vote_average: Option<f64>) -> MovieCandidate {
        MovieCandidate {
            id: 693134,
            title: "Dune: Part Two".to_string(),
            release_date: NaiveDate::from_ymd_opt(2024, 2, 27),
            poster_path: None,
            backdrop_path: None,
            vote_average,
            overview: None,
        }
    }

    fn context() -> MovieContext {
        MovieContext {
            title: "Dune: Part Two".to_string(),
            genre: Some("Science Fiction".to_string()),
            ..MovieContext::default()
        }
    }

    fn item(id: &str, sentiment: Sentiment, hour: u32) -> ReviewItem {
        ReviewItem {
            id: id.to_string(),
            platform: SourcePlatform::Tmdb,
            author: "a".to_string(),
            content: "some content".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap(),
            sentiment,
        }
    }

    #[test]
    fn vote_average_outranks_named_ratings() {
        let signals = vec![RawRating {
            value: 9.9,
            scale: RatingScale::TenPoint,
            label: "IMDb".to_string(),
            priority: Some(1),
        }];
        let overall = overall_rating(&candidate(Some(8.3)), &signals, &SentimentSummary::default());
        assert_eq!(overall.value, 8.3);
        assert_eq!(overall.source, "TMDB");
    }

    #[test]
    fn named_ratings_follow_priority_order() {
        let signals = vec![
            RawRating {
                value: 74.0,
                scale: RatingScale::HundredPoint,
                label: "Metacritic".to_string(),
                priority: Some(3),
            },
            RawRating {
                value: 94.0,
                scale: RatingScale::HundredPoint,
                label: "Rotten Tomatoes".to_string(),
                priority: Some(2),
            },
        ];
        let overall = overall_rating(&candidate(None), &signals, &SentimentSummary::default());
        assert_eq!(overall.value, 9.4);
        assert_eq!(overall.source, "Rotten Tomatoes");
    }

    #[test]
    fn no_signals_falls_back_to_aggregate_ratio() {
        let summary = SentimentSummary {
            positive: 3,
            neutral: 1,
            negative: 1,
        };
        let overall = overall_rating(&candidate(None), &[], &summary);
        assert_eq!(overall.source, "Aggregate");
        assert_eq!(overall.value, 6.0);
    }

    #[test]
    fn rating_is_clamped_and_rounded() {
        let signals = vec![RawRating {
            value: 250.0,
            scale: RatingScale::HundredPoint,
            label: "Rotten Tomatoes".to_string(),
            priority: Some(2),
        }];
        let overall = overall_rating(&candidate(None), &signals, &SentimentSummary::default());
        assert_eq!(overall.value, 10.0);

        let signals = vec![RawRating {
            value: 8.347,
            scale: RatingScale::TenPoint,
            label: "IMDb".to_string(),
            priority: Some(1),
        }];
        let overall = overall_rating(&candidate(None), &signals, &SentimentSummary::default());
        assert_eq!(overall.value, 8.3);
    }

    #[test]
    fn short_collection_is_padded_to_minimum() {
        let options = AnalysisOptions::default();
        let aggregator = Aggregator::new(&options);
        let ctx = context();
        let mut rng = TitleRng::from_title("Dune: Part Two");
        let report = aggregator.finalize(
            candidate(Some(8.3)),
            vec![item("r1", Sentiment::Positive, 1)],
            &[],
            Some(&ctx),
            &mut rng,
        );
        assert!(report.padded);
        assert_eq!(report.items.len(), options.min_reviews);
        assert_eq!(report.summary.total(), report.items.len());
        assert_eq!(report.source_counts.total(), report.items.len());
        assert_eq!(report.source_counts.synthetic, options.min_reviews - 1);
    }

    #[test]
    fn title_only_context_does_not_pad() {
        let options = AnalysisOptions::default();
        let aggregator = Aggregator::new(&options);
        let bare = MovieContext {
            title: "Dune: Part Two".to_string(),
            year: Some(2024),
            ..MovieContext::default()
        };
        let mut rng = TitleRng::from_title("Dune: Part Two");
        let report = aggregator.finalize(
            candidate(Some(8.3)),
            vec![item("r1", Sentiment::Positive, 1)],
            &[],
            Some(&bare),
            &mut rng,
        );
        assert!(!report.padded);
        assert_eq!(report.items.len(), 1);
    }

    #[test]
    fn short_collection_without_context_stays_short() {
        let options = AnalysisOptions::default();
        let aggregator = Aggregator::new(&options);
        let mut rng = TitleRng::from_title("Dune: Part Two");
        let report = aggregator.finalize(
            candidate(Some(8.3)),
            vec![item("r1", Sentiment::Positive, 1)],
            &[],
            None,
            &mut rng,
        );
        assert!(!report.padded);
        assert_eq!(report.items.len(), 1);
    }

    #[test]
    fn display_order_is_recency_then_id() {
        let options = AnalysisOptions::default();
        let aggregator = Aggregator::new(&options);
        let mut rng = TitleRng::from_title("t");
        let items = vec![
            item("b", Sentiment::Neutral, 5),
            item("a", Sentiment::Neutral, 5),
            item("c", Sentiment::Neutral, 9),
        ];
        let report = aggregator.finalize(candidate(Some(7.0)), items, &[], None, &mut rng);
        let order: Vec<&str> = report.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }
}
