//! Input normalization.
//!
//! Turns a typed string or the contents of an uploaded file into the
//! ordered list of non-empty texts that make up one batch.
//!
//! Files are newline-delimited plain text whatever their extension:
//! a `.csv` or `.json` upload is split on line breaks like a `.txt` one.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::{Result, SentioError};

/// Maximum number of items in one batch.
pub const MAX_ITEMS: usize = 20;

/// Maximum characters of each item sent to the provider.
pub const MAX_CHARS: usize = 500;

/// File extensions accepted by [`TextSource::from_path`].
pub const ACCEPTED_EXTENSIONS: &[&str] = &["txt", "csv", "json"];

/// Bounds applied to a batch before it is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct InputLimits {
    /// Lines beyond this count are dropped from file input (default: 20).
    #[serde(default = "default_max_items")]
    pub max_items: usize,
    /// Outbound text is cut to this many characters (default: 500).
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            max_items: default_max_items(),
            max_chars: default_max_chars(),
        }
    }
}

fn default_max_items() -> usize {
    MAX_ITEMS
}

fn default_max_chars() -> usize {
    MAX_CHARS
}

/// Raw user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    /// One free-form string, analyzed as a single item.
    Text(String),
    /// Uploaded file contents, one item per non-empty line.
    File(String),
}

impl TextSource {
    /// Read a `.txt`, `.csv` or `.json` file as file input.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some(ext) if ACCEPTED_EXTENSIONS.contains(&ext) => {}
            _ => {
                return Err(SentioError::InvalidInput(format!(
                    "unsupported file type {path:?}; expected one of .txt, .csv, .json"
                )));
            }
        }

        Ok(TextSource::File(fs::read_to_string(path)?))
    }

    /// Normalize with the default limits.
    pub fn normalize(&self) -> Vec<String> {
        self.normalize_with(&InputLimits::default())
    }

    /// Produce the ordered batch for this input.
    ///
    /// An empty result means there is nothing to analyze.
    pub fn normalize_with(&self, limits: &InputLimits) -> Vec<String> {
        match self {
            TextSource::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    Vec::new()
                } else {
                    vec![trimmed.to_string()]
                }
            }
            // `lines()` also strips the `\r` of `\r\n` endings.
            TextSource::File(content) => content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .take(limits.max_items)
                .map(str::to_string)
                .collect(),
        }
    }
}
