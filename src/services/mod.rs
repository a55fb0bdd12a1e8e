pub mod fallback_plan_service;
pub mod gemini_service;
pub mod llm_plan_service;
pub mod plan_service;
pub mod snapshot_service;
