//! Result aggregation.

use crate::types::{AnalysisResult, BatchStats, ChartDataPoint, SentimentCounts, SentimentType};

/// Chart order: positive, neutral, negative.
const DISTRIBUTION_ORDER: [SentimentType; 3] = [
    SentimentType::Positive,
    SentimentType::Neutral,
    SentimentType::Negative,
];

/// Summarize a result set.
///
/// Total over every input: an empty slice yields zero counts, zero average
/// and a `Negative` dominant sentiment. Dominance compares `Positive`
/// against `Negative` only, with ties going to `Negative`.
pub fn aggregate(results: &[AnalysisResult]) -> BatchStats {
    let mut counts = SentimentCounts::default();
    let mut total_confidence = 0.0;

    for result in results {
        counts.increment(result.sentiment());
        total_confidence += result.confidence();
    }

    let total = results.len();
    let avg_confidence = if total == 0 {
        0.0
    } else {
        round_to_tenth(total_confidence / total as f64 * 100.0)
    };

    let dominant = if counts.positive > counts.negative {
        SentimentType::Positive
    } else {
        SentimentType::Negative
    };

    BatchStats {
        counts,
        avg_confidence,
        total,
        dominant,
    }
}

/// Chart slices for the non-empty sentiment classes.
pub fn distribution(stats: &BatchStats) -> Vec<ChartDataPoint> {
    DISTRIBUTION_ORDER
        .into_iter()
        .map(|sentiment| ChartDataPoint {
            name: sentiment,
            value: stats.counts.get(sentiment),
            color: sentiment.color(),
        })
        .filter(|point| point.value > 0)
        .collect()
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
