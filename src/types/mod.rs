//! Public types for the Sentio API.

mod sentiment;
mod stats;

pub use sentiment::{AnalysisRequestItem, AnalysisResult, SentimentType};
pub use stats::{BatchStats, ChartDataPoint, SentimentCounts};
