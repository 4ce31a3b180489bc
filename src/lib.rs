//! Sentio - batch sentiment classification over LLM APIs
//!
//! This crate normalizes user text into a bounded batch, classifies it with
//! one structured-output request to an LLM provider, and derives what a
//! front end shows from the results: batch statistics, a sentiment
//! distribution, keyword-highlighted text and CSV/JSON exports.
//!
//! # Example
//!
//! ```rust,no_run
//! use sentio::{AnalysisSession, GeminiClient, SentimentClassifier, TextSource};
//!
//! #[tokio::main]
//! async fn main() -> sentio::Result<()> {
//!     let client = GeminiClient::new("your-gemini-key")?;
//!     let session = AnalysisSession::new(SentimentClassifier::new(client));
//!
//!     let source = TextSource::File("I love this!\nThis is terrible.\n".to_string());
//!     if let Some(results) = session.analyze(&source).await? {
//!         for result in results.iter() {
//!             println!("{} ({}%)", result.sentiment(), result.confidence_percent());
//!         }
//!     }
//!
//!     let stats = session.stats();
//!     println!("dominant: {}", stats.dominant);
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod classifier;
#[cfg(feature = "cli")]
pub mod config;
pub mod error;
pub mod export;
pub mod highlight;
pub mod input;
pub mod providers;
pub mod session;
pub mod telemetry;
pub mod types;

// Re-export main types at crate root
pub use aggregate::{aggregate, distribution};
pub use classifier::SentimentClassifier;
pub use error::{Result, SentioError};
pub use export::{ExportFormat, export_file_name, to_csv, to_json};
pub use highlight::{Segment, highlight};
pub use input::{InputLimits, TextSource};
#[cfg(feature = "gemini")]
pub use providers::GeminiClient;
pub use providers::{SentimentProvider, StructuredRequest};
pub use session::AnalysisSession;

// Re-export all types
pub use types::{
    AnalysisRequestItem, AnalysisResult, BatchStats, ChartDataPoint, SentimentCounts,
    SentimentType,
};
