//! Batch statistics derived from a result set.

use serde::Serialize;

use super::sentiment::SentimentType;

/// Number of results per sentiment label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentCounts {
    pub fn get(&self, sentiment: SentimentType) -> usize {
        match sentiment {
            SentimentType::Positive => self.positive,
            SentimentType::Negative => self.negative,
            SentimentType::Neutral => self.neutral,
        }
    }

    pub(crate) fn increment(&mut self, sentiment: SentimentType) {
        match sentiment {
            SentimentType::Positive => self.positive += 1,
            SentimentType::Negative => self.negative += 1,
            SentimentType::Neutral => self.neutral += 1,
        }
    }

    pub fn sum(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}

/// Summary of one batch of results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchStats {
    pub counts: SentimentCounts,
    /// Mean confidence as a percentage in `[0, 100]`, rounded to one decimal.
    pub avg_confidence: f64,
    pub total: usize,
    /// `Positive` only when it strictly outnumbers `Negative`; never `Neutral`.
    pub dominant: SentimentType,
}

/// One slice of the sentiment distribution chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartDataPoint {
    pub name: SentimentType,
    pub value: usize,
    pub color: &'static str,
}
