use uuid::Uuid;

use crate::models::{envelope::PlanEnvelope, plan::Plan, snapshot::SnapshotPayload};
use crate::services::{
    fallback_plan_service::generate_fallback_plan, gemini_service::TextGenerator,
    llm_plan_service::generate_llm_plan,
};

pub const NOTE_NO_CREDENTIAL: &str =
    "GEMINI_API_KEY is not configured, so a fallback plan was generated.";
pub const NOTE_LLM_FAILED: &str =
    "Failed to parse the LLM response, so a fallback plan was generated.";

#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub plan: Plan,
    pub from_llm: bool,
    pub note: Option<String>,
}

impl PlanOutcome {
    fn fallback(payload: &SnapshotPayload, note: &str) -> Self {
        Self {
            plan: generate_fallback_plan(payload),
            from_llm: false,
            note: Some(note.to_string()),
        }
    }
}

impl From<PlanOutcome> for PlanEnvelope {
    fn from(outcome: PlanOutcome) -> Self {
        PlanEnvelope {
            success: true,
            data: outcome.plan,
            from_llm: outcome.from_llm,
            note: outcome.note,
        }
    }
}

/// Produces a plan for the payload. Without a generator, or when the model
/// call or its output fails, the deterministic fallback plan is returned.
pub async fn generate_trip_plan(
    generator: Option<&dyn TextGenerator>,
    payload: &SnapshotPayload,
    request_id: Uuid,
) -> PlanOutcome {
    let Some(generator) = generator else {
        log::info!("[{}] No model credential, serving fallback plan", request_id);
        return PlanOutcome::fallback(payload, NOTE_NO_CREDENTIAL);
    };

    log::info!(
        "[{}] Requesting plan from {} ({} votes)",
        request_id,
        generator.model_name(),
        payload.votes_summary.len()
    );

    match generate_llm_plan(generator, payload).await {
        Ok(plan) => {
            log::info!("[{}] Serving LLM plan with {} days", request_id, plan.itinerary.len());
            PlanOutcome {
                plan,
                from_llm: true,
                note: None,
            }
        }
        Err(err) => {
            log::warn!("[{}] LLM plan unavailable, serving fallback: {}", request_id, err);
            PlanOutcome::fallback(payload, NOTE_LLM_FAILED)
        }
    }
}
