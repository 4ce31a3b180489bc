//! Configuration loading for the `sentio` CLI.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag)
//! 2. `~/.sentio/config.toml` (user)
//! 3. `/etc/sentio/config.toml` (system)
//!
//! Built-in defaults apply when no file exists.
//!
//! Secrets are loaded separately with mandatory permission checks:
//! 1. `~/.sentio/secrets.toml` (user, must be 0600)
//! 2. `/etc/sentio/secrets.toml` (system, must be 0600)

use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::classifier::DEFAULT_MODEL;
use crate::input::InputLimits;
use crate::providers::gemini::DEFAULT_BASE_URL;
use crate::{Result, SentioError};

/// CLI configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub input: InputLimits,
}

/// Classification provider configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Model identifier (default: gemini-2.5-flash).
    #[serde(default = "default_model")]
    pub model: String,
    /// API base URL (default: the public Generative Language endpoint).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds. Unset means no timeout.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl ProviderConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Secrets configuration (API keys).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Secrets {
    #[serde(default)]
    pub gemini: Option<ApiKeySecret>,
}

/// A single API key secret.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeySecret {
    pub api_key: String,
}

/// Environment variables consulted for the key, in order.
const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// An explicit path must exist. Otherwise the user file, then the system
    /// file, then built-in defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            if !path.exists() {
                return Err(SentioError::Configuration(format!(
                    "Config file not found: {path:?}"
                )));
            }
            return Self::load_from_file(path);
        }
        match first_existing("config.toml") {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        read_toml(path, "config")
    }
}

impl Secrets {
    /// Load the first secrets file found, rejecting group- or world-readable
    /// files.
    ///
    /// Returns empty secrets if no file exists (the key may come from env vars).
    pub fn load() -> Result<Self> {
        let Some(path) = first_existing("secrets.toml") else {
            return Ok(Secrets::default());
        };
        check_permissions(&path)?;
        read_toml(&path, "secrets")
    }

    /// The Gemini API key, falling back to `GEMINI_API_KEY` then `API_KEY`.
    pub fn api_key(&self) -> Option<String> {
        self.gemini
            .as_ref()
            .map(|s| s.api_key.clone())
            .or_else(|| {
                API_KEY_ENV_VARS
                    .iter()
                    .find_map(|var| std::env::var(var).ok())
                    .filter(|key| !key.is_empty())
            })
    }
}

/// `~/.sentio/{file}` then `/etc/sentio/{file}`.
fn candidate_paths(file: &str) -> Vec<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".sentio").join(file))
        .into_iter()
        .chain(std::iter::once(Path::new("/etc/sentio").join(file)))
        .collect()
}

fn first_existing(file: &str) -> Option<PathBuf> {
    candidate_paths(file).into_iter().find(|path| path.exists())
}

fn read_toml<T: DeserializeOwned>(path: &Path, kind: &str) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        SentioError::Configuration(format!("Failed to read {kind} file {path:?}: {e}"))
    })?;
    toml::from_str(&content).map_err(|e| {
        SentioError::Configuration(format!("Failed to parse {kind} file {path:?}: {e}"))
    })
}

/// Secrets must not be readable by group or others (0600 or 0400).
#[cfg(unix)]
fn check_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = fs::metadata(path)
        .map_err(|e| SentioError::Configuration(format!("Cannot stat {path:?}: {e}")))?
        .permissions()
        .mode();
    match mode & 0o077 {
        0 => Ok(()),
        _ => Err(SentioError::Configuration(format!(
            "Secrets file {path:?} has insecure permissions {:o}. Must be 0600 or 0400.",
            mode & 0o777
        ))),
    }
}

#[cfg(not(unix))]
fn check_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
