use std::env;
use std::sync::OnceLock;
use thiserror::Error;

/// Default chat-completions model used when `MODEL` is unset.
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
/// Default OpenAI-compatible endpoint root used when `BACKEND_URL` is unset.
pub const DEFAULT_BACKEND_URL: &str = "https://api.groq.com/openai/v1";
/// Default number of words per chunk.
pub const DEFAULT_CHUNK_WORDS: usize = 1500;
/// Default number of chunks summarized concurrently.
pub const DEFAULT_BATCH_CONCURRENCY: usize = 3;
/// Default ceiling for uploaded payloads (20 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the summarization server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Credential for the chat-completions backend; absence selects fallback summaries.
    pub backend_api_key: Option<String>,
    /// Model identifier sent with every completion request.
    pub backend_model: String,
    /// Base URL of the OpenAI-compatible API (without the `/chat/completions` suffix).
    pub backend_url: String,
    /// Word budget per chunk.
    pub chunk_words: usize,
    /// Width of each concurrency window in the batch scheduler.
    pub batch_concurrency: usize,
    /// Maximum accepted size of an uploaded file in bytes.
    pub max_upload_bytes: usize,
    /// Optional override for the HTTP server port.
    pub server_port: Option<u16>,
}

/// Backend-facing subset of [`Config`] handed to the summarization client factory.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Optional API key; `None` switches the pipeline to fallback mode.
    pub api_key: Option<String>,
    /// Model identifier.
    pub model: String,
    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_api_key: None,
            backend_model: DEFAULT_MODEL.to_string(),
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            chunk_words: DEFAULT_CHUNK_WORDS,
            batch_concurrency: DEFAULT_BATCH_CONCURRENCY,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            server_port: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            backend_api_key: optional("GROQ_API_KEY").map(|value| value.trim().to_string()),
            backend_model: optional("MODEL").unwrap_or(defaults.backend_model),
            backend_url: optional("BACKEND_URL").unwrap_or(defaults.backend_url),
            chunk_words: parse_positive(optional("CHUNK_WORDS"), "CHUNK_WORDS")?
                .unwrap_or(defaults.chunk_words),
            batch_concurrency: parse_positive(optional("BATCH_CONCURRENCY"), "BATCH_CONCURRENCY")?
                .unwrap_or(defaults.batch_concurrency),
            max_upload_bytes: parse_positive(optional("MAX_UPLOAD_BYTES"), "MAX_UPLOAD_BYTES")?
                .unwrap_or(defaults.max_upload_bytes),
            server_port: optional("SERVER_PORT")
                .map(|value| {
                    value
                        .trim()
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".into()))
                })
                .transpose()?,
        })
    }

    /// Extract the settings consumed by the summarization backend.
    pub fn backend(&self) -> BackendConfig {
        BackendConfig {
            api_key: self.backend_api_key.clone(),
            model: self.backend_model.clone(),
            base_url: self.backend_url.clone(),
        }
    }
}

fn parse_positive(value: Option<String>, key: &str) -> Result<Option<usize>, ConfigError> {
    value
        .map(|raw| match raw.trim().parse::<usize>() {
            Ok(parsed) if parsed > 0 => Ok(parsed),
            _ => Err(ConfigError::InvalidValue(key.to_string())),
        })
        .transpose()
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Retrieve the loaded configuration, panicking if initialization has not occurred.
pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Config not initialized")
}

/// Load configuration from the environment and install it in the global cache.
pub fn init_config() {
    dotenvy::dotenv().ok();
    let config = Config::from_env().expect("Failed to load config from environment");
    tracing::debug!(
        model = %config.backend_model,
        backend_url = %config.backend_url,
        fallback_mode = config.backend_api_key.is_none(),
        chunk_words = config.chunk_words,
        batch_concurrency = config.batch_concurrency,
        server_port = ?config.server_port,
        "Loaded configuration"
    );
    CONFIG.set(config).expect("Failed to set config");
}
