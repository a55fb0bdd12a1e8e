use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::models::plan::Plan;

/// Body of every successful plan response.
#[skip_serializing_none]
#[derive(Debug, Serialize, Clone)]
pub struct PlanEnvelope {
    pub success: bool,
    pub data: Plan,
    #[serde(rename = "fromLLM")]
    pub from_llm: bool,
    pub note: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: String,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}
