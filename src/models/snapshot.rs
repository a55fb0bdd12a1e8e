use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Normalized trip snapshot, built fresh for every plan request.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SnapshotPayload {
    pub constraints: TripConstraints,
    pub votes_summary: Vec<VoteSummary>,
}

#[skip_serializing_none]
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TripConstraints {
    pub group_size: Option<u32>,
    pub max_budget_per_person: Option<f64>,
    pub travel_styles: Vec<String>,
    pub preferred_provinces: Vec<String>,
    pub date_window: DateWindow,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DateWindow {
    pub all_dates: Vec<String>,
}

/// One ranked destination. `name` is never empty once it reaches a payload.
#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct VoteSummary {
    pub name: String,
    pub location: Option<String>,
    pub estimated_cost: Option<f64>,
    pub duration: Option<String>,
}

impl VoteSummary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: None,
            estimated_cost: None,
            duration: None,
        }
    }
}
