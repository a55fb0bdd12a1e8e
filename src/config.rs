use std::env;
use thiserror::Error;
use url::Url;

const HOST: &str = "0.0.0.0";
const ENVIRONMENT: &str = "development";
const PORT: u16 = 8080;
const GEMINI_MODEL: &str = "gemini-1.5-flash";
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const GEMINI_TIMEOUT_SECS: u64 = 30;
const MAX_BODY_BYTES: usize = 256 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GEMINI_API_BASE is not a valid URL ({value}): {source}")]
    InvalidApiBase {
        value: String,
        #[source]
        source: url::ParseError,
    },
}

/// Process configuration, read once at startup and shared read-only with handlers.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub gemini: Option<GeminiConfig>,
    pub cors_origin: Option<String>,
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub api_base: Url,
    pub timeout_secs: u64,
}

impl GeminiConfig {
    pub fn masked_key(&self) -> String {
        let key = &self.api_key;
        if key.len() > 8 && key.is_ascii() {
            format!("{}***{}", &key[0..4], &key[key.len() - 4..])
        } else {
            "***".to_string()
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let host = var("HOST").unwrap_or_else(|| HOST.to_string());
        let port = var("PORT")
            .and_then(|value| value.parse().ok())
            .unwrap_or(PORT);
        let max_body_bytes = var("MAX_BODY_BYTES")
            .and_then(|value| value.parse().ok())
            .unwrap_or(MAX_BODY_BYTES);

        let gemini = match var("GEMINI_API_KEY") {
            Some(api_key) => {
                let base = var("GEMINI_API_BASE").unwrap_or_else(|| GEMINI_API_BASE.to_string());
                let api_base = Url::parse(&base).map_err(|source| ConfigError::InvalidApiBase {
                    value: base.clone(),
                    source,
                })?;

                Some(GeminiConfig {
                    api_key,
                    model: var("GEMINI_MODEL").unwrap_or_else(|| GEMINI_MODEL.to_string()),
                    api_base,
                    timeout_secs: var("GEMINI_TIMEOUT_SECS")
                        .and_then(|value| value.parse().ok())
                        .unwrap_or(GEMINI_TIMEOUT_SECS),
                })
            }
            None => None,
        };

        Ok(Self {
            host,
            port,
            environment: var("RUST_ENV").unwrap_or_else(|| ENVIRONMENT.to_string()),
            gemini,
            cors_origin: var("CORS_ORIGIN"),
            max_body_bytes,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: HOST.to_string(),
            port: PORT,
            environment: ENVIRONMENT.to_string(),
            gemini: None,
            cors_origin: None,
            max_body_bytes: MAX_BODY_BYTES,
        }
    }
}
