//! CSV and JSON export of a result set.
//!
//! Both formats are produced in memory; writing or downloading the text is
//! left to the caller.

use std::fmt;
use std::str::FromStr;

use crate::types::AnalysisResult;
use crate::{Result, SentioError};

/// CSV header row.
pub const CSV_HEADER: &str = "Original Text,Sentiment,Confidence,Keywords";

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8",
            ExportFormat::Json => "application/json",
        }
    }

    /// Render `results` in this format.
    pub fn render(&self, results: &[AnalysisResult]) -> Result<String> {
        match self {
            ExportFormat::Csv => Ok(to_csv(results)),
            ExportFormat::Json => to_json(results),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = SentioError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(SentioError::InvalidInput(format!(
                "unknown export format '{other}'"
            ))),
        }
    }
}

/// Download file name for an export taken at `timestamp_ms`.
pub fn export_file_name(format: ExportFormat, timestamp_ms: i64) -> String {
    format!("sentiment_analysis_{timestamp_ms}.{}", format.extension())
}

/// Render results as CSV.
///
/// Text and keyword fields are always quoted with inner quotes doubled;
/// confidence has two decimals. Rows are joined by `\n` with no trailing
/// newline.
pub fn to_csv(results: &[AnalysisResult]) -> String {
    let mut lines = Vec::with_capacity(results.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for r in results {
        lines.push(format!(
            "{},{},{:.2},{}",
            quote(r.original_text()),
            r.sentiment(),
            r.confidence(),
            quote(&r.keywords().join(", ")),
        ));
    }
    lines.join("\n")
}

/// Render results as pretty-printed JSON, identifiers and timestamps included.
pub fn to_json(results: &[AnalysisResult]) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
