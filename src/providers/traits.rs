//! Provider trait for structured-output classification backends.
//!
//! A provider performs exactly one round trip: it sends a prompt plus a
//! response schema and returns the raw structured payload text. Parsing and
//! validating that payload is the classifier's job, so fakes used in tests
//! only need to hand back a JSON string.
//!
//! # Example
//!
//! ```ignore
//! struct Canned(&'static str);
//!
//! #[async_trait]
//! impl SentimentProvider for Canned {
//!     fn name(&self) -> &str {
//!         "canned"
//!     }
//!
//!     async fn generate_structured(&self, _request: &StructuredRequest) -> Result<String> {
//!         Ok(self.0.to_string())
//!     }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::Result;

/// A single structured-output request.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredRequest {
    /// Provider model identifier (e.g. `gemini-2.5-flash`).
    pub model: String,
    /// Fixes the assistant's role for the whole request.
    pub system_instruction: String,
    /// Task description followed by the serialized input items.
    pub prompt: String,
    /// Schema the response payload must conform to.
    pub response_schema: Value,
}

/// Backend able to answer a [`StructuredRequest`] with a JSON payload.
#[async_trait]
pub trait SentimentProvider: Send + Sync {
    /// Provider name for logging/metrics.
    fn name(&self) -> &str;

    /// Send the request and return the structured payload text.
    ///
    /// Transport, status and empty-payload failures are errors; the payload
    /// itself is returned unparsed.
    async fn generate_structured(&self, request: &StructuredRequest) -> Result<String>;
}

#[async_trait]
impl<T: SentimentProvider + ?Sized> SentimentProvider for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn generate_structured(&self, request: &StructuredRequest) -> Result<String> {
        (**self).generate_structured(request).await
    }
}
