//! Configuration management for the noun translator.
//!
//! Handles loading, saving, and validating the TOML configuration from
//! platform-specific config directories, and loading Reddit API
//! credentials from their JSON file.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Application name used for config directory.
const APP_NAME: &str = "reddit-noun-translator";

/// Default config filename.
const CONFIG_FILENAME: &str = "config.toml";

/// Listing sorts served without extra parameters.
const LISTING_SORTS: [&str; 4] = ["hot", "new", "top", "rising"];

/// Placeholder value for unconfigured API keys.
const API_KEY_PLACEHOLDER: &str = "YOUR_API_KEY_HERE";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reddit listing settings.
    pub reddit: RedditConfig,

    /// Translation backend settings.
    pub translation: TranslationConfig,

    /// Run settings.
    pub pipeline: PipelineConfig,

    /// Word list settings.
    pub dictionary: DictionaryConfig,

    /// Log output settings.
    pub logging: LoggingConfig,
}

/// Which listing to read and where the API lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RedditConfig {
    /// Subreddit to list; "all" is the default aggregate feed.
    pub subreddit: String,

    /// Listing sort: hot, new, top or rising.
    pub sort: String,

    /// Base URL for the OAuth token endpoint.
    pub auth_url: String,

    /// Base URL for authenticated API calls.
    pub api_url: String,

    /// Request timeout in seconds.
    pub timeout_sec: u64,
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            subreddit: "all".to_string(),
            sort: "hot".to_string(),
            auth_url: "https://www.reddit.com".to_string(),
            api_url: "https://oauth.reddit.com".to_string(),
            timeout_sec: 30,
        }
    }
}

/// Available translation backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslatorBackend {
    /// Public Google Translate endpoint, no key required.
    #[default]
    Google,
    /// Any OpenAI-compatible chat completions API.
    OpenAi,
}

impl FromStr for TranslatorBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "openai" => Ok(Self::OpenAi),
            other => Err(format!(
                "unknown translator backend '{}' (expected google or openai)",
                other
            )),
        }
    }
}

impl fmt::Display for TranslatorBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Google => f.write_str("google"),
            Self::OpenAi => f.write_str("openai"),
        }
    }
}

/// Translation behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Backend used for every word.
    pub backend: TranslatorBackend,

    /// Language of the extracted nouns.
    pub source_language: String,

    /// Language to translate into.
    pub target_language: String,

    /// Request timeout in seconds.
    pub timeout_sec: u64,

    /// Google endpoint settings.
    pub google: GoogleConfig,

    /// OpenAI-compatible API settings.
    pub openai: ApiConfig,

    /// System prompt for the OpenAI-compatible backend.
    /// `{source}` and `{target}` are replaced with the language codes.
    pub prompt: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            backend: TranslatorBackend::default(),
            source_language: "en".to_string(),
            target_language: "es".to_string(),
            timeout_sec: 30,
            google: GoogleConfig::default(),
            openai: ApiConfig::default(),
            prompt: "You are a dictionary. Translate the given word from the language with code '{source}' to the language with code '{target}'. Reply with the translation only, nothing else.".to_string(),
        }
    }
}

/// Google Translate endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleConfig {
    /// Base URL of the translate endpoint.
    pub base_url: String,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            base_url: "https://translate.googleapis.com".to_string(),
        }
    }
}

/// API configuration for OpenAI-compatible endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API key.
    pub key: String,

    /// Base URL for the API.
    pub base_url: String,

    /// Model identifier.
    pub model: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key: API_KEY_PLACEHOLDER.to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
        }
    }
}

impl ApiConfig {
    /// Checks if the API key is configured (not placeholder).
    pub fn is_configured(&self) -> bool {
        !self.key.is_empty() && self.key != API_KEY_PLACEHOLDER
    }
}

/// Run configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Number of posts whose titles are read.
    pub num_posts: usize,

    /// File receiving the translated pairs.
    pub output_file: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            num_posts: 100,
            output_file: PathBuf::from("output.txt"),
        }
    }
}

/// Word list configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Newline-separated list of English words. The built-in list is used
    /// when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Log output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Console filter, overridden by `RUST_LOG`.
    pub level: String,

    /// Debug log file. Disabled when unset.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: Some(PathBuf::from("debug.log")),
        }
    }
}

impl Config {
    /// Returns the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|p| p.join(APP_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Returns the full path to the config file.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join(CONFIG_FILENAME))
    }

    /// Loads configuration from the default location.
    ///
    /// If the config file doesn't exist, creates a default one.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let config = Config::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Saves configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pipeline.num_posts == 0 {
            return Err(ConfigError::InvalidValue {
                key: "pipeline.num_posts".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        for (key, value) in [
            ("translation.source_language", &self.translation.source_language),
            ("translation.target_language", &self.translation.target_language),
            ("reddit.subreddit", &self.reddit.subreddit),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingValue(key.to_string()));
            }
        }

        if !LISTING_SORTS.contains(&self.reddit.sort.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "reddit.sort".to_string(),
                message: format!("must be one of {}", LISTING_SORTS.join(", ")),
            });
        }

        if self
            .dictionary
            .path
            .as_ref()
            .is_some_and(|path| path.as_os_str().is_empty())
        {
            return Err(ConfigError::MissingValue("dictionary.path".to_string()));
        }

        if self.translation.backend == TranslatorBackend::OpenAi
            && !self.translation.openai.is_configured()
        {
            return Err(ConfigError::MissingValue(
                "translation.openai.key (required by the openai backend)".to_string(),
            ));
        }

        Ok(())
    }
}

/// Reddit script-app credentials, read from a JSON file.
#[derive(Clone, Serialize, Deserialize)]
pub struct RedditCredentials {
    pub user_agent: String,
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl fmt::Debug for RedditCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedditCredentials")
            .field("user_agent", &self.user_agent)
            .field("client_id", &self.client_id)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl RedditCredentials {
    /// Loads and validates credentials from a JSON file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let credentials: RedditCredentials =
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        credentials.validate()?;
        Ok(credentials)
    }

    /// Checks that the mandatory fields are filled in.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("user_agent", &self.user_agent),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingValue(format!("credentials.{}", key)));
            }
        }
        Ok(())
    }

    /// Username and password, when both are set, for the password grant.
    pub fn user_login(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some((username, password))
            }
            _ => None,
        }
    }
}
