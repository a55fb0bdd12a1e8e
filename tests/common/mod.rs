use actix_web::{web, App};
use async_trait::async_trait;
use std::sync::Arc;
use url::Url;

use trip_plan_api::{
    config::{AppConfig, GeminiConfig},
    middleware::cors::cors_headers,
    routes,
    services::gemini_service::{GeminiError, TextGenerator},
    state::AppState,
};

pub struct TestApp {
    pub state: web::Data<AppState>,
}

impl TestApp {
    /// App without a model credential: every plan comes from the fallback generator.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let state = AppState::from_config(config).expect("state builds from config");
        Self {
            state: web::Data::new(state),
        }
    }

    pub fn with_generator(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            state: web::Data::new(AppState::with_generator(AppConfig::default(), generator)),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(cors_headers(self.state.config.cors_origin.as_deref()))
            .app_data(self.state.clone())
            .configure(routes::config)
    }
}

/// Stands in for a model whose call always fails.
pub struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _system: &str, _prompt: &str) -> Result<String, GeminiError> {
        Err(GeminiError::Api {
            status: 503,
            body: "model overloaded".to_string(),
        })
    }

    fn model_name(&self) -> &str {
        "failing-model"
    }
}

/// Returns the same text for every call.
pub struct CannedGenerator(pub String);

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate(&self, _system: &str, _prompt: &str) -> Result<String, GeminiError> {
        Ok(self.0.clone())
    }

    fn model_name(&self) -> &str {
        "canned-model"
    }
}

pub fn gemini_config(api_base: &str) -> GeminiConfig {
    GeminiConfig {
        api_key: "test-key-123456".to_string(),
        model: "gemini-test".to_string(),
        api_base: Url::parse(api_base).expect("mock server url parses"),
        timeout_secs: 5,
    }
}

pub fn plan_json() -> serde_json::Value {
    serde_json::json!({
        "title": "ทริปเชียงใหม่ 2 วัน",
        "dates": "1-2 มีนาคม 2568",
        "participants": 2,
        "totalBudget": 2000,
        "overview": {
            "destinations": ["ดอยสุเทพ", "วัดเจดีย์หลวง"],
            "accommodation": "โรงแรมย่านนิมมาน",
            "transportation": "รถแดงและรถเช่า",
            "totalDistance": "ประมาณ 40 กม."
        },
        "itinerary": [
            {
                "day": 1,
                "date": "2025-03-01",
                "items": [
                    {"time": "09:00", "name": "ดอยสุเทพ", "type": "attraction", "location": "เชียงใหม่", "estCost": 200, "duration": "2 ชั่วโมง"},
                    {"time": "12:00", "name": "ข้าวซอย", "type": "meal", "estCost": 160}
                ]
            }
        ],
        "budgetBreakdown": {
            "transportation": 500,
            "accommodation": 600,
            "attractions": 400,
            "meals": 300,
            "shopping": 100,
            "miscellaneous": 100
        },
        "tips": ["เตรียมเสื้อกันหนาวสำหรับขึ้นดอย"]
    })
}
