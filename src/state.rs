use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::gemini_service::{GeminiClient, GeminiError, TextGenerator};

/// Shared per-process state. Read-only once the server starts.
pub struct AppState {
    pub config: AppConfig,
    pub generator: Option<Arc<dyn TextGenerator>>,
}

impl AppState {
    /// Builds the Gemini client when a credential is configured; otherwise every request takes the fallback path.
    pub fn from_config(config: AppConfig) -> Result<Self, GeminiError> {
        let generator: Option<Arc<dyn TextGenerator>> = match &config.gemini {
            Some(gemini) => {
                log::info!(
                    "Gemini model {} configured (key {})",
                    gemini.model,
                    gemini.masked_key()
                );
                let client: Arc<dyn TextGenerator> = Arc::new(GeminiClient::new(gemini.clone())?);
                Some(client)
            }
            None => {
                log::warn!("GEMINI_API_KEY not set. Plans will use the fallback generator.");
                None
            }
        };

        Ok(Self { config, generator })
    }

    pub fn with_generator(config: AppConfig, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            config,
            generator: Some(generator),
        }
    }
}
