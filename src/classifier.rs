//! Batch sentiment classification.
//!
//! [`SentimentClassifier`] turns a normalized batch into one
//! [`StructuredRequest`], sends it through its provider and validates the
//! returned payload against the response schema. Validation fails closed:
//! a missing or mistyped field anywhere rejects the whole batch. The one
//! per-item degradation is an `index` that does not point at a submitted
//! text, which yields an empty `original_text` for that item.

use std::time::Instant;

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, instrument, warn};

use crate::input::InputLimits;
use crate::providers::{SentimentProvider, StructuredRequest};
use crate::telemetry;
use crate::types::{AnalysisRequestItem, AnalysisResult, SentimentType};
use crate::{Result, SentioError};

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Role fixed for every classification request.
pub const SYSTEM_INSTRUCTION: &str =
    "You are an expert NLP Sentiment Analysis engine. Be precise and objective.";

/// Classifies batches of text through a [`SentimentProvider`].
pub struct SentimentClassifier<P> {
    provider: P,
    model: String,
    limits: InputLimits,
}

impl<P: SentimentProvider> SentimentClassifier<P> {
    /// Create a classifier using [`DEFAULT_MODEL`] and the default limits.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            model: DEFAULT_MODEL.to_string(),
            limits: InputLimits::default(),
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn limits(mut self, limits: InputLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn input_limits(&self) -> &InputLimits {
        &self.limits
    }

    /// Build the outbound request for `texts`.
    ///
    /// Each text is cut to `max_chars` characters; `texts` itself is untouched.
    pub fn build_request(&self, texts: &[String]) -> Result<StructuredRequest> {
        if texts.len() > self.limits.max_items {
            return Err(SentioError::InvalidInput(format!(
                "batch of {} items exceeds the limit of {}",
                texts.len(),
                self.limits.max_items
            )));
        }

        let items: Vec<AnalysisRequestItem> = texts
            .iter()
            .enumerate()
            .map(|(index, text)| AnalysisRequestItem::new(index, text, self.limits.max_chars))
            .collect();

        Ok(StructuredRequest {
            model: self.model.clone(),
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            prompt: build_prompt(&items)?,
            response_schema: response_schema(),
        })
    }

    /// Classify `texts` in a single round trip.
    ///
    /// Returns one result per item in the response, in response order.
    /// Any provider or validation failure fails the whole batch.
    #[instrument(name = "classifier.classify", skip(self, texts), fields(batch_size = texts.len(), model = %self.model))]
    pub async fn classify(&self, texts: &[String]) -> Result<Vec<AnalysisResult>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request = self.build_request(texts)?;
        let provider = self.provider.name().to_owned();
        let start = Instant::now();

        let outcome = match self.provider.generate_structured(&request).await {
            Ok(payload) => parse_response(&payload, texts, chrono::Utc::now().timestamp_millis()),
            Err(e) => Err(e),
        };

        record_request(&provider, start, outcome.is_ok());
        if let Ok(results) = &outcome {
            for result in results {
                metrics::counter!(telemetry::ITEMS_TOTAL, "sentiment" => result.sentiment().as_str())
                    .increment(1);
            }
            debug!(items = results.len(), "batch classified");
        }
        outcome
    }
}

/// Record request outcome metrics (counter + histogram).
fn record_request(provider: &str, start: Instant, ok: bool) {
    let status = if ok { "ok" } else { "error" };
    metrics::counter!(telemetry::REQUESTS_TOTAL,
        "provider" => provider.to_owned(),
        "status" => status,
    )
    .increment(1);
    metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS,
        "provider" => provider.to_owned(),
    )
    .record(start.elapsed().as_secs_f64());
}

fn build_prompt(items: &[AnalysisRequestItem]) -> Result<String> {
    let serialized = serde_json::to_string(items)?;
    Ok(format!(
        "Analyze the sentiment of the following texts.\n\
         For each text, determine if it is Positive, Negative, or Neutral.\n\
         Provide a confidence score (0.0 to 1.0).\n\
         Extract key words or phrases that strongly influence the sentiment.\n\
         \n\
         Input Texts:\n\
         {serialized}\n"
    ))
}

/// The response schema sent with every request.
pub fn response_schema() -> Value {
    let labels: Vec<&str> = SentimentType::ALL.iter().map(|s| s.as_str()).collect();
    json!({
        "type": "OBJECT",
        "properties": {
            "items": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "index": {
                            "type": "INTEGER",
                            "description": "The index of the text in the input array"
                        },
                        "sentiment": {
                            "type": "STRING",
                            "enum": labels,
                            "description": "The classified sentiment of the text"
                        },
                        "confidence": {
                            "type": "NUMBER",
                            "description": "A score between 0.0 and 1.0 indicating confidence in the prediction"
                        },
                        "keywords": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" },
                            "description": "List of 1-3 specific words or short phrases from the text that drove the sentiment decision"
                        }
                    },
                    "required": ["index", "sentiment", "confidence", "keywords"]
                }
            }
        },
        "required": ["items"]
    })
}

#[derive(Deserialize)]
struct ResponsePayload {
    items: Vec<ResponseItem>,
}

#[derive(Deserialize)]
struct ResponseItem {
    index: i64,
    sentiment: SentimentType,
    confidence: f64,
    keywords: Vec<String>,
}

/// Validate a structured payload and map it onto `texts`.
///
/// The reply must hold exactly one item per text and no in-range index may
/// repeat. An index outside `texts` degrades to empty text. Every result is
/// stamped with `timestamp` and a fresh identifier.
pub fn parse_response(
    payload: &str,
    texts: &[String],
    timestamp: i64,
) -> Result<Vec<AnalysisResult>> {
    let parsed: ResponsePayload = serde_json::from_str(payload).map_err(|e| {
        if e.is_data() {
            SentioError::Schema(e.to_string())
        } else {
            SentioError::Json(e)
        }
    })?;

    if parsed.items.len() != texts.len() {
        return Err(SentioError::Schema(format!(
            "expected {} items, got {}",
            texts.len(),
            parsed.items.len()
        )));
    }

    let mut seen = vec![false; texts.len()];
    parsed
        .items
        .into_iter()
        .map(|item| {
            if !(0.0..=1.0).contains(&item.confidence) {
                return Err(SentioError::Schema(format!(
                    "confidence {} for index {} is outside [0, 1]",
                    item.confidence, item.index
                )));
            }

            let slot = usize::try_from(item.index)
                .ok()
                .filter(|&i| i < texts.len());
            if let Some(i) = slot
                && std::mem::replace(&mut seen[i], true)
            {
                return Err(SentioError::Schema(format!(
                    "index {i} appears more than once"
                )));
            }

            let original_text = slot
                .map(|i| texts[i].clone())
                .unwrap_or_else(|| {
                    warn!(index = item.index, batch_size = texts.len(), "response index out of range");
                    metrics::counter!(telemetry::DEGRADED_ITEMS_TOTAL).increment(1);
                    String::new()
                });

            AnalysisResult::new(
                original_text,
                item.sentiment,
                item.confidence,
                item.keywords,
                timestamp,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn prompt_embeds_indexed_items() {
        let items = vec![
            AnalysisRequestItem::new(0, "good", 500),
            AnalysisRequestItem::new(1, "say \"hi\"", 500),
        ];
        let prompt = build_prompt(&items).unwrap();
        assert!(prompt.starts_with("Analyze the sentiment of the following texts."));
        assert!(prompt.contains(r#"[{"index":0,"text":"good"},{"index":1,"text":"say \"hi\""}]"#));
    }

    #[test]
    fn schema_lists_all_labels_and_required_fields() {
        let schema = response_schema();
        let item = &schema["properties"]["items"]["items"];
        assert_eq!(
            item["properties"]["sentiment"]["enum"],
            json!(["Positive", "Negative", "Neutral"])
        );
        assert_eq!(
            item["required"],
            json!(["index", "sentiment", "confidence", "keywords"])
        );
    }

    #[test]
    fn parse_maps_index_to_untruncated_text() {
        let long = "x".repeat(800);
        let payload = r#"{"items":[{"index":0,"sentiment":"Neutral","confidence":0.5,"keywords":["x"]}]}"#;
        let results = parse_response(payload, &[long.clone()], 42).unwrap();
        assert_eq!(results[0].original_text(), long);
        assert_eq!(results[0].timestamp(), 42);
    }

    #[test]
    fn parse_negative_index_degrades() {
        let payload = r#"{"items":[{"index":-1,"sentiment":"Positive","confidence":0.9,"keywords":[]}]}"#;
        let results = parse_response(payload, &texts(&["a"]), 0).unwrap();
        assert_eq!(results[0].original_text(), "");
    }

    #[test]
    fn parse_missing_field_is_schema_error() {
        let payload = r#"{"items":[{"index":0,"sentiment":"Positive","keywords":[]}]}"#;
        assert!(matches!(
            parse_response(payload, &texts(&["a"]), 0),
            Err(SentioError::Schema(_))
        ));
    }

    #[test]
    fn parse_mistyped_field_is_schema_error() {
        let payload = r#"{"items":[{"index":"0","sentiment":"Positive","confidence":0.9,"keywords":[]}]}"#;
        assert!(matches!(
            parse_response(payload, &texts(&["a"]), 0),
            Err(SentioError::Schema(_))
        ));
    }

    #[test]
    fn parse_unknown_label_is_schema_error() {
        let payload = r#"{"items":[{"index":0,"sentiment":"Mixed","confidence":0.9,"keywords":[]}]}"#;
        assert!(matches!(
            parse_response(payload, &texts(&["a"]), 0),
            Err(SentioError::Schema(_))
        ));
    }

    #[test]
    fn parse_out_of_range_confidence_is_schema_error() {
        let payload = r#"{"items":[{"index":0,"sentiment":"Positive","confidence":95,"keywords":[]}]}"#;
        assert!(matches!(
            parse_response(payload, &texts(&["a"]), 0),
            Err(SentioError::Schema(_))
        ));
    }

    #[test]
    fn parse_missing_items_is_schema_error() {
        assert!(matches!(
            parse_response("{}", &texts(&["a"]), 0),
            Err(SentioError::Schema(_))
        ));
    }

    #[test]
    fn parse_short_reply_is_schema_error() {
        let payload = r#"{"items":[{"index":0,"sentiment":"Positive","confidence":0.9,"keywords":[]}]}"#;
        assert!(matches!(
            parse_response(payload, &texts(&["a", "b"]), 0),
            Err(SentioError::Schema(_))
        ));
        assert!(matches!(
            parse_response(r#"{"items":[]}"#, &texts(&["a"]), 0),
            Err(SentioError::Schema(_))
        ));
    }

    #[test]
    fn parse_repeated_index_is_schema_error() {
        let payload = r#"{"items":[
            {"index":0,"sentiment":"Positive","confidence":0.9,"keywords":[]},
            {"index":0,"sentiment":"Negative","confidence":0.8,"keywords":[]}
        ]}"#;
        assert!(matches!(
            parse_response(payload, &texts(&["a", "b"]), 0),
            Err(SentioError::Schema(_))
        ));
    }

    #[test]
    fn parse_garbage_is_json_error() {
        assert!(matches!(
            parse_response("not json", &texts(&["a"]), 0),
            Err(SentioError::Json(_))
        ));
    }
}
