use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use thiserror::Error;

use crate::models::{plan::Plan, snapshot::SnapshotPayload};
use crate::services::gemini_service::{GeminiError, TextGenerator};

pub const SYSTEM_INSTRUCTION: &str = r#"You are a travel planner for group trips in Thailand.
Respond with a single JSON object that matches this schema exactly:
{
  "title": string,
  "dates": string,
  "participants": number,
  "totalBudget": number,
  "overview": {
    "destinations": [string],
    "accommodation": string,
    "transportation": string,
    "totalDistance": string
  },
  "itinerary": [
    {
      "day": number,
      "date": string,
      "items": [
        {
          "time": "HH:MM",
          "name": string,
          "type": "travel" | "meal" | "attraction" | "checkin" | "checkout" | "shopping",
          "location": string,
          "estCost": number,
          "duration": string
        }
      ]
    }
  ],
  "budgetBreakdown": {
    "transportation": number,
    "accommodation": number,
    "attractions": number,
    "meals": number,
    "shopping": number,
    "miscellaneous": number
  },
  "tips": [string]
}

Rules:
- Write every text value in Thai.
- Do not wrap the JSON in markdown code fences.
- Do not add any explanation before or after the JSON.
- Give the most-voted places priority in the schedule.
- totalBudget must not exceed the per-person budget multiplied by the number of participants."#;

#[derive(Debug, Error)]
pub enum PlanParseError {
    #[error("response is not a valid plan: {0}")]
    Json(#[from] serde_json::Error),

    #[error("plan failed validation: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum LlmPlanError {
    #[error("failed to build prompt: {0}")]
    Prompt(serde_json::Error),

    #[error("model call failed: {0}")]
    Model(#[from] GeminiError),

    #[error(transparent)]
    Parse(#[from] PlanParseError),
}

/// Asks the model for a plan. Makes exactly one call and never retries.
pub async fn generate_llm_plan(
    generator: &dyn TextGenerator,
    payload: &SnapshotPayload,
) -> Result<Plan, LlmPlanError> {
    let prompt = build_prompt(payload).map_err(LlmPlanError::Prompt)?;
    let raw = generator.generate(SYSTEM_INSTRUCTION, &prompt).await?;
    Ok(parse_plan(&raw)?)
}

pub fn build_prompt(payload: &SnapshotPayload) -> Result<String, serde_json::Error> {
    let constraints = &payload.constraints;

    let group = constraints
        .group_size
        .map(|group| group.to_string())
        .unwrap_or_else(|| "unspecified".to_string());
    let budget = constraints
        .max_budget_per_person
        .map(|budget| format!("{} THB", budget))
        .unwrap_or_else(|| "unspecified".to_string());
    let cap = match (constraints.group_size, constraints.max_budget_per_person) {
        (Some(group), Some(budget)) => format!("{} THB", (budget * group as f64).round()),
        _ => "the per-person budget multiplied by the group size".to_string(),
    };
    let votes = serde_json::to_string_pretty(&payload.votes_summary)?;

    Ok(format!(
        "Plan a group trip from the following snapshot.\n\
         \n\
         Group size: {group}\n\
         Minimum budget per person: {budget}\n\
         Travel styles: {styles}\n\
         Preferred provinces: {provinces}\n\
         Candidate dates: {dates}\n\
         \n\
         Ranked destination votes (highest first):\n\
         {votes}\n\
         \n\
         Requirements:\n\
         1. Follow the vote ranking and give the top-voted places the best slots.\n\
         2. State a time, duration and estimated cost for every activity.\n\
         3. Keep the total budget at or below {cap}.\n\
         4. Order the activities so the travel between them makes sense.\n\
         5. Respond with a JSON object only.",
        styles = json_list(&constraints.travel_styles),
        provinces = json_list(&constraints.preferred_provinces),
        dates = json_list(&constraints.date_window.all_dates),
    ))
}

fn json_list(items: &[String]) -> String {
    Value::from(items.to_vec()).to_string()
}

fn code_fence() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)^```(?:json)?[ \t]*\r?\n?(.*?)\s*```$").expect("code fence pattern is valid")
    })
}

/// Removes a surrounding ``` or ```json fence and trims whitespace.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    match code_fence().captures(trimmed).and_then(|caps| caps.get(1)) {
        Some(inner) => inner.as_str().trim(),
        None => trimmed,
    }
}

pub fn parse_plan(raw: &str) -> Result<Plan, PlanParseError> {
    let plan: Plan = serde_json::from_str(strip_code_fence(raw))?;
    validate_plan(&plan)?;
    Ok(plan)
}

fn validate_plan(plan: &Plan) -> Result<(), PlanParseError> {
    if plan.title.trim().is_empty() {
        return Err(PlanParseError::Invalid("title is empty".to_string()));
    }
    if plan.itinerary.is_empty() {
        return Err(PlanParseError::Invalid("itinerary has no days".to_string()));
    }
    if let Some(day) = plan.itinerary.iter().find(|day| day.items.is_empty()) {
        return Err(PlanParseError::Invalid(format!("day {} has no items", day.day)));
    }
    Ok(())
}
