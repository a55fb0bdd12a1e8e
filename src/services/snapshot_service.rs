//! Lenient decoding of trip snapshots from query strings and request bodies.

use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::models::snapshot::{DateWindow, SnapshotPayload, TripConstraints, VoteSummary};
use crate::services::fallback_plan_service::DEFAULT_GROUP_SIZE;

/// Raw query string parameters, still undecoded beyond URL escaping.
#[derive(Debug, Default, Clone)]
pub struct PlanQuery {
    pub group: Option<String>,
    pub budget: Option<String>,
    pub dates: Option<String>,
    pub provinces: Option<String>,
    pub styles: Option<String>,
    pub votes: Option<String>,
}

pub type PlanBody = Map<String, Value>;

/// Reads the known query parameters. The first occurrence of a repeated key wins; unknown keys are ignored.
pub fn parse_query(query_string: &str) -> PlanQuery {
    let mut query = PlanQuery::default();

    for (key, value) in form_urlencoded::parse(query_string.as_bytes()) {
        let slot = match key.as_ref() {
            "group" => &mut query.group,
            "budget" => &mut query.budget,
            "dates" => &mut query.dates,
            "provinces" => &mut query.provinces,
            "styles" => &mut query.styles,
            "votes" => &mut query.votes,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value.into_owned());
        } else {
            log::debug!("Ignoring repeated query parameter {}", key);
        }
    }

    query
}

/// Parses a request body as a JSON object. Empty, malformed or non-object bodies yield an empty map.
pub fn parse_body(bytes: &[u8]) -> PlanBody {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return PlanBody::new();
    }

    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            log::debug!("Ignoring request body that is not a JSON object");
            PlanBody::new()
        }
        Err(err) => {
            log::debug!("Ignoring malformed request body: {}", err);
            PlanBody::new()
        }
    }
}

/// Merges body and query values into a payload. Body fields win when present.
pub fn normalize(query: &PlanQuery, body: &PlanBody) -> SnapshotPayload {
    let group_size = body_field(body, "group_size")
        .and_then(number_from_value)
        .and_then(group_size_from_number)
        .or_else(|| query.group.as_deref().and_then(parse_group_size));

    let max_budget_per_person = body_field(body, "max_budget_per_person")
        .and_then(number_from_value)
        .and_then(budget_from_number)
        .or_else(|| query.budget.as_deref().and_then(parse_budget));

    let group = f64::from(group_size.unwrap_or(DEFAULT_GROUP_SIZE));
    let max_budget_per_person = max_budget_per_person.filter(|budget| scales_with_group(*budget, group));

    let all_dates = list_field(body, "dates", query.dates.as_deref());
    let preferred_provinces = list_field(body, "preferred_provinces", query.provinces.as_deref());
    let travel_styles = list_field(body, "travel_styles", query.styles.as_deref());

    let votes_summary = match body_field(body, "votes_summary") {
        Some(Value::Array(entries)) => votes_from_json(entries),
        Some(Value::String(raw)) => parse_votes(raw),
        _ => query.votes.as_deref().map(parse_votes).unwrap_or_default(),
    };
    let votes_summary = votes_summary
        .into_iter()
        .map(|vote| VoteSummary {
            estimated_cost: vote.estimated_cost.filter(|cost| scales_with_group(*cost, group)),
            ..vote
        })
        .collect();

    SnapshotPayload {
        constraints: TripConstraints {
            group_size,
            max_budget_per_person,
            travel_styles,
            preferred_provinces,
            date_window: DateWindow { all_dates },
        },
        votes_summary,
    }
}

/// Per-person amounts are multiplied by the group size downstream; an amount that overflows is left unset.
fn scales_with_group(amount: f64, group: f64) -> bool {
    (amount * group).is_finite()
}

fn body_field<'a>(body: &'a PlanBody, key: &str) -> Option<&'a Value> {
    body.get(key).filter(|value| !value.is_null())
}

fn list_field(body: &PlanBody, key: &str, query_value: Option<&str>) -> Vec<String> {
    let from_body = match body_field(body, key) {
        Some(Value::Array(entries)) => Some(
            entries
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        Some(Value::String(raw)) => Some(split_list(raw)),
        _ => None,
    };

    from_body
        .or_else(|| query_value.map(split_list))
        .unwrap_or_default()
}

/// Splits a comma list, trimming entries and dropping empty ones.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn parse_group_size(raw: &str) -> Option<u32> {
    parse_number(raw).and_then(group_size_from_number)
}

pub fn parse_budget(raw: &str) -> Option<f64> {
    parse_number(raw).and_then(budget_from_number)
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => parse_number(raw),
        _ => None,
    }
}

fn group_size_from_number(value: f64) -> Option<u32> {
    if value >= 1.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
        Some(value as u32)
    } else {
        None
    }
}

fn budget_from_number(value: f64) -> Option<f64> {
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Decodes a `votes` value: a JSON array first, then the `name|cost|duration|location;...` form.
pub fn parse_votes(raw: &str) -> Vec<VoteSummary> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(entries)) => votes_from_json(&entries),
        Ok(_) => {
            log::debug!("Ignoring votes JSON that is not an array");
            Vec::new()
        }
        Err(_) => parse_delimited_votes(raw),
    }
}

pub fn votes_from_json(entries: &[Value]) -> Vec<VoteSummary> {
    entries
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|entry| {
            let name = entry.get("name").and_then(Value::as_str).map(str::trim)?;
            if name.is_empty() {
                return None;
            }

            Some(VoteSummary {
                name: name.to_string(),
                location: entry.get("location").and_then(text_from_value),
                estimated_cost: entry
                    .get("estimated_cost")
                    .and_then(number_from_value)
                    .and_then(budget_from_number),
                duration: entry.get("duration").and_then(text_from_value),
            })
        })
        .collect()
}

fn text_from_value(value: &Value) -> Option<String> {
    value.as_str().and_then(non_empty)
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub fn parse_delimited_votes(raw: &str) -> Vec<VoteSummary> {
    raw.split(';')
        .filter_map(|record| {
            let mut fields = record.split('|');
            let name = fields.next().map(str::trim).filter(|name| !name.is_empty())?;
            let estimated_cost = fields.next().and_then(parse_budget);
            let duration = fields.next().and_then(non_empty);
            let location = fields.next().and_then(non_empty);

            Some(VoteSummary {
                name: name.to_string(),
                location,
                estimated_cost,
                duration,
            })
        })
        .collect()
}
