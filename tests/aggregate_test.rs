//! Tests for batch statistics and the sentiment distribution.

use sentio::{AnalysisResult, SentimentType, aggregate, distribution};

fn result(sentiment: SentimentType, confidence: f64) -> AnalysisResult {
    AnalysisResult::new("text", sentiment, confidence, vec![], 0).unwrap()
}

#[test]
fn empty_results_give_zeroed_stats() {
    let stats = aggregate(&[]);
    assert_eq!(stats.total, 0);
    assert_eq!(stats.counts.sum(), 0);
    assert_eq!(stats.avg_confidence, 0.0);
    // Zero positives do not outnumber zero negatives.
    assert_eq!(stats.dominant, SentimentType::Negative);
}

#[test]
fn three_way_batch_matches_expected_summary() {
    let results = vec![
        result(SentimentType::Positive, 0.95),
        result(SentimentType::Negative, 0.90),
        result(SentimentType::Neutral, 0.60),
    ];
    let stats = aggregate(&results);

    assert_eq!(stats.counts.positive, 1);
    assert_eq!(stats.counts.negative, 1);
    assert_eq!(stats.counts.neutral, 1);
    assert_eq!(stats.total, 3);
    assert_eq!(stats.avg_confidence, 81.7);
    assert_eq!(stats.dominant, SentimentType::Negative);
}

#[test]
fn counts_sum_to_total() {
    let labels = [
        SentimentType::Positive,
        SentimentType::Neutral,
        SentimentType::Neutral,
        SentimentType::Negative,
        SentimentType::Positive,
        SentimentType::Neutral,
    ];
    for n in 0..=labels.len() {
        let results: Vec<_> = labels[..n].iter().map(|&s| result(s, 0.5)).collect();
        let stats = aggregate(&results);
        assert_eq!(stats.counts.sum(), n);
        assert_eq!(stats.total, n);
        for sentiment in SentimentType::ALL {
            let expected = labels[..n].iter().filter(|&&s| s == sentiment).count();
            assert_eq!(stats.counts.get(sentiment), expected);
        }
    }
}

#[test]
fn average_stays_within_percentage_bounds() {
    let all_zero = vec![result(SentimentType::Neutral, 0.0); 4];
    assert_eq!(aggregate(&all_zero).avg_confidence, 0.0);

    let all_one = vec![result(SentimentType::Positive, 1.0); 7];
    assert_eq!(aggregate(&all_one).avg_confidence, 100.0);

    let mixed = vec![
        result(SentimentType::Positive, 0.333),
        result(SentimentType::Negative, 0.777),
    ];
    let avg = aggregate(&mixed).avg_confidence;
    assert!((0.0..=100.0).contains(&avg));
    assert_eq!(avg, 55.5);
}

#[test]
fn positive_dominates_only_when_strictly_greater() {
    let results = vec![
        result(SentimentType::Positive, 0.9),
        result(SentimentType::Positive, 0.9),
        result(SentimentType::Negative, 0.9),
    ];
    assert_eq!(aggregate(&results).dominant, SentimentType::Positive);

    let tied = vec![
        result(SentimentType::Positive, 0.9),
        result(SentimentType::Negative, 0.9),
    ];
    assert_eq!(aggregate(&tied).dominant, SentimentType::Negative);
}

#[test]
fn neutral_is_never_dominant() {
    let results = vec![result(SentimentType::Neutral, 0.8); 5];
    let stats = aggregate(&results);
    assert_eq!(stats.counts.neutral, 5);
    assert_eq!(stats.dominant, SentimentType::Negative);
}

#[test]
fn distribution_skips_empty_classes_in_chart_order() {
    let results = vec![
        result(SentimentType::Negative, 0.5),
        result(SentimentType::Positive, 0.5),
        result(SentimentType::Negative, 0.5),
    ];
    let points = distribution(&aggregate(&results));

    assert_eq!(points.len(), 2);
    assert_eq!(points[0].name, SentimentType::Positive);
    assert_eq!(points[0].value, 1);
    assert_eq!(points[0].color, "#10b981");
    assert_eq!(points[1].name, SentimentType::Negative);
    assert_eq!(points[1].value, 2);
    assert_eq!(points[1].color, "#f43f5e");
}

#[test]
fn distribution_of_empty_batch_is_empty() {
    assert!(distribution(&aggregate(&[])).is_empty());
}
