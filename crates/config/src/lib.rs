//! Explainer configuration — credentials, model, prompt template.
//!
//! Resolved once at start-up and then passed by value into the client and
//! the view. Nothing downstream reads the process environment.
//!
//! Resolution order (later wins): defaults, YAML file, `.env`, environment,
//! command-line overrides applied by the binary.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default Gemini endpoint host.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model (alias `pro`).
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro-002";

/// Instruction template; `{verse}` is replaced by the raw verse reference.
pub const DEFAULT_PROMPT_TEMPLATE: &str = "You are a knowledgeable scholar of Vedic literature, \
specifically the Srimad Bhagavatam. Please provide a clear, concise explanation of this \
Srimad Bhagavatam verse reference while maintaining the spiritual essence: {verse}";

/// Environment variables consulted for the API key, in order.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "VITE_GEMINI_API_KEY"];

/// Errors loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to load .env: {0}")]
    Dotenv(#[from] dotenvy::Error),
}

/// Everything the explainer needs to talk to the generative API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplainerConfig {
    /// API key sent as the `key` query parameter. Empty is allowed; the
    /// remote call will simply fail.
    pub api_key: String,
    /// Model id or alias (`pro`, `flash`).
    pub model: String,
    pub base_url: String,
    pub prompt_template: String,
    /// Report a success response without candidate text as an error
    /// instead of showing an empty explanation.
    pub strict_response: bool,
    /// Transport timeout. `None` leaves it to reqwest's defaults.
    pub timeout_secs: Option<u64>,
    /// Log file for the TUI (stderr would corrupt the screen).
    pub log_file: Option<PathBuf>,
}

impl Default for ExplainerConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.into(),
            base_url: DEFAULT_BASE_URL.into(),
            prompt_template: DEFAULT_PROMPT_TEMPLATE.into(),
            strict_response: false,
            timeout_secs: None,
            log_file: None,
        }
    }
}

impl ExplainerConfig {
    /// Parse a YAML document. Missing fields take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        // A document with no content (blank or comments only) is null, not a map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str::<Option<Self>>(yaml)?.unwrap_or_default())
    }

    /// Load a YAML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Full start-up resolution: optional file, then `.env`, then the
    /// process environment. A missing API key is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e.into()),
        }
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Overlay environment values using `lookup`. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = API_KEY_VARS.iter().find_map(|name| get(*name)) {
            self.api_key = key;
        }
        if let Some(model) = get("GEMINI_MODEL") {
            self.model = model;
        }
        if let Some(url) = get("GEMINI_BASE_URL") {
            self.base_url = url;
        }
    }

    /// Log file path, falling back to the temp directory.
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("vedabase-explainer.log"))
    }
}
