//! Provider implementations for structured sentiment classification.
//!
//! [`SentimentProvider`] is the seam between the classifier and a concrete
//! LLM API. Each provider is constructed explicitly and handed to the
//! classifier; nothing is held in process-wide state.

#[cfg(feature = "gemini")]
pub mod gemini;
pub mod traits;

#[cfg(feature = "gemini")]
pub use gemini::GeminiClient;
pub use traits::{SentimentProvider, StructuredRequest};
