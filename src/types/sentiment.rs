//! Sentiment labels and classified results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Result, SentioError};

/// The classified polarity of a text item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentType {
    Positive,
    Negative,
    Neutral,
}

impl SentimentType {
    /// All labels, in the order the classifier schema lists them.
    pub const ALL: [SentimentType; 3] = [
        SentimentType::Positive,
        SentimentType::Negative,
        SentimentType::Neutral,
    ];

    /// Wire and export representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentType::Positive => "Positive",
            SentimentType::Negative => "Negative",
            SentimentType::Neutral => "Neutral",
        }
    }

    /// Display colour used by the distribution chart.
    pub fn color(&self) -> &'static str {
        match self {
            SentimentType::Positive => "#10b981",
            SentimentType::Neutral => "#94a3b8",
            SentimentType::Negative => "#f43f5e",
        }
    }
}

impl fmt::Display for SentimentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentType {
    type Err = SentioError;

    fn from_str(s: &str) -> Result<Self> {
        SentimentType::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| SentioError::Schema(format!("unknown sentiment label '{s}'")))
    }
}

/// One classified text item.
///
/// Immutable once created; fields are exposed through accessors only.
/// Serializes with the field names used by the JSON export.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    id: String,
    original_text: String,
    sentiment: SentimentType,
    confidence: f64,
    keywords: Vec<String>,
    timestamp: i64,
}

impl AnalysisResult {
    /// Create a result with a fresh identifier.
    ///
    /// Fails if `confidence` is not a finite number in `[0.0, 1.0]`.
    pub fn new(
        original_text: impl Into<String>,
        sentiment: SentimentType,
        confidence: f64,
        keywords: Vec<String>,
        timestamp: i64,
    ) -> Result<Self> {
        Self::with_id(
            Uuid::new_v4().to_string(),
            original_text,
            sentiment,
            confidence,
            keywords,
            timestamp,
        )
    }

    /// Create a result with a caller-supplied identifier.
    pub fn with_id(
        id: impl Into<String>,
        original_text: impl Into<String>,
        sentiment: SentimentType,
        confidence: f64,
        keywords: Vec<String>,
        timestamp: i64,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(SentioError::InvalidInput(format!(
                "confidence {confidence} is outside [0, 1]"
            )));
        }
        Ok(Self {
            id: id.into(),
            original_text: original_text.into(),
            sentiment,
            confidence,
            keywords,
            timestamp,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The submitted text, never truncated.
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    pub fn sentiment(&self) -> SentimentType {
        self.sentiment
    }

    /// Model-reported certainty in `[0.0, 1.0]`.
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Confidence as a whole percentage, as shown next to each item.
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Creation time in milliseconds since the Unix epoch.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

/// One entry of the outbound classification request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequestItem {
    pub index: usize,
    pub text: String,
}

impl AnalysisRequestItem {
    /// Pair `text` with its batch position, keeping at most `max_chars`
    /// characters.
    pub fn new(index: usize, text: &str, max_chars: usize) -> Self {
        let text = match text.char_indices().nth(max_chars) {
            Some((end, _)) => text[..end].to_string(),
            None => text.to_string(),
        };
        Self { index, text }
    }
}
