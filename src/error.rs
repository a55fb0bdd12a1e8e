use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::envelope::ErrorEnvelope;

/// Faults that escape the plan handler. Everything else is recovered locally.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to read request body: {0}")]
    Payload(String),

    #[error("Request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("Failed to serialize plan: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        log::error!("Plan request failed: {}", self);
        HttpResponse::build(self.status_code()).json(ErrorEnvelope::new(self.to_string()))
    }
}
