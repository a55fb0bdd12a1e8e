use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_with::skip_serializing_none;
use std::fmt;

/// Non-negative money amount in baht.
///
/// Whole values serialize as JSON integers so that budgets computed by the
/// fallback generator come out as `20000` rather than `20000.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Amount(f64);

impl Amount {
    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() && value >= 0.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Rounds to the nearest whole baht. Negative or non-finite input clamps to zero.
    pub fn rounded(value: f64) -> Self {
        Self::new(value.round()).unwrap_or_default()
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 && self.0 <= u64::MAX as f64 {
            write!(f, "{}", self.0 as u64)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.fract() == 0.0 && self.0 <= u64::MAX as f64 {
            serializer.serialize_u64(self.0 as u64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Amount::new(value).ok_or_else(|| {
            de::Error::invalid_value(de::Unexpected::Float(value), &"a non-negative amount")
        })
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlanItemType {
    Travel,
    Meal,
    Attraction,
    Checkin,
    Checkout,
    Shopping,
}

#[skip_serializing_none]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub title: String,
    pub dates: Option<String>,
    pub participants: Option<u32>,
    pub total_budget: Option<Amount>,
    pub overview: PlanOverview,
    pub itinerary: Vec<PlanDay>,
    pub budget_breakdown: BudgetBreakdown,
    pub tips: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanOverview {
    pub destinations: Vec<String>,
    pub accommodation: String,
    pub transportation: String,
    pub total_distance: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PlanDay {
    pub day: u32,
    /// Display label, normally the calendar date.
    pub date: String,
    pub items: Vec<PlanItem>,
}

#[skip_serializing_none]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanItem {
    pub time: String,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: PlanItemType,
    pub location: Option<String>,
    pub est_cost: Option<Amount>,
    pub duration: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BudgetBreakdown {
    pub transportation: Amount,
    pub accommodation: Amount,
    pub attractions: Amount,
    pub meals: Amount,
    pub shopping: Amount,
    pub miscellaneous: Amount,
}

impl BudgetBreakdown {
    pub fn total(&self) -> f64 {
        [
            self.transportation,
            self.accommodation,
            self.attractions,
            self.meals,
            self.shopping,
            self.miscellaneous,
        ]
        .iter()
        .map(Amount::value)
        .sum()
    }
}
