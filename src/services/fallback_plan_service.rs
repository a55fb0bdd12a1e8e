use crate::models::{
    plan::{Amount, BudgetBreakdown, Plan, PlanDay, PlanItem, PlanItemType, PlanOverview},
    snapshot::{SnapshotPayload, VoteSummary},
};

pub const DEFAULT_GROUP_SIZE: u32 = 2;
const DEFAULT_BUDGET_PER_PERSON: f64 = 10_000.0;
const MAX_DESTINATIONS: usize = 3;

const PLACEHOLDER_DATES: [&str; 2] = ["2025-01-01", "2025-01-02"];
const PLACEHOLDER_DESTINATION: &str = "Recommended local attraction";

const LUNCH_COST_PER_PERSON: f64 = 150.0;
const DINNER_COST_PER_PERSON: f64 = 200.0;

// Share of the total budget per category; sums to 1.0.
const TRANSPORTATION_SHARE: f64 = 0.25;
const ACCOMMODATION_SHARE: f64 = 0.30;
const ATTRACTIONS_SHARE: f64 = 0.20;
const MEALS_SHARE: f64 = 0.15;
const SHOPPING_SHARE: f64 = 0.05;
const MISCELLANEOUS_SHARE: f64 = 0.05;

/// Stand-in for an attraction slot when fewer than three places were voted on.
struct PlaceholderSlot {
    name: &'static str,
    location: &'static str,
    cost_per_person: f64,
    duration: &'static str,
}

const PLACEHOLDER_SLOTS: [PlaceholderSlot; MAX_DESTINATIONS] = [
    PlaceholderSlot {
        name: "Top-rated local attraction",
        location: "City centre",
        cost_per_person: 200.0,
        duration: "2 hours",
    },
    PlaceholderSlot {
        name: "Local market and old town walk",
        location: "Old town",
        cost_per_person: 150.0,
        duration: "2 hours",
    },
    PlaceholderSlot {
        name: "Scenic viewpoint",
        location: "Outskirts",
        cost_per_person: 100.0,
        duration: "2 hours",
    },
];

/// Builds a two-day plan from the snapshot alone. Pure: the same payload always yields the same plan.
pub fn generate_fallback_plan(payload: &SnapshotPayload) -> Plan {
    let constraints = &payload.constraints;
    let group_size = constraints.group_size.unwrap_or(DEFAULT_GROUP_SIZE);
    let budget_per_person = constraints
        .max_budget_per_person
        .unwrap_or(DEFAULT_BUDGET_PER_PERSON);
    let group = f64::from(group_size);

    let total_budget = Amount::rounded(group * budget_per_person);
    let destinations: Vec<&VoteSummary> =
        payload.votes_summary.iter().take(MAX_DESTINATIONS).collect();

    let dates = &constraints.date_window.all_dates;
    let day_label = |index: usize| {
        dates
            .get(index)
            .cloned()
            .unwrap_or_else(|| PLACEHOLDER_DATES[index].to_string())
    };
    let (first_date, second_date) = (day_label(0), day_label(1));

    let attraction = |slot: usize, time: &str| attraction_item(destinations.get(slot).copied(), slot, time, group);

    let day_one = PlanDay {
        day: 1,
        date: first_date.clone(),
        items: vec![
            attraction(0, "09:00"),
            fixed_item("12:00", "Lunch at a local restaurant", PlanItemType::Meal, group * LUNCH_COST_PER_PERSON, "1 hour"),
            attraction(1, "14:00"),
            fixed_item("18:00", "Hotel check-in", PlanItemType::Checkin, 0.0, "30 minutes"),
            fixed_item("19:00", "Dinner", PlanItemType::Meal, group * DINNER_COST_PER_PERSON, "1.5 hours"),
        ],
    };

    let day_two = PlanDay {
        day: 2,
        date: second_date.clone(),
        items: vec![
            fixed_item("08:00", "Breakfast at the hotel", PlanItemType::Meal, 0.0, "1 hour"),
            fixed_item("10:00", "Hotel check-out", PlanItemType::Checkout, 0.0, "30 minutes"),
            attraction(2, "11:00"),
            fixed_item("14:00", "Return trip", PlanItemType::Travel, 0.0, "3 hours"),
        ],
    };

    let mut overview_destinations: Vec<String> =
        destinations.iter().map(|vote| vote.name.clone()).collect();
    overview_destinations.resize(MAX_DESTINATIONS, PLACEHOLDER_DESTINATION.to_string());

    let title = match destinations.first() {
        Some(top) => format!("2-day group trip: {}", top.name),
        None => "2-day group trip".to_string(),
    };

    Plan {
        title,
        dates: Some(format!("{} - {}", first_date, second_date)),
        participants: Some(group_size),
        total_budget: Some(total_budget),
        overview: PlanOverview {
            destinations: overview_destinations,
            accommodation: "Mid-range hotel near the main attractions, 1 night".to_string(),
            transportation: "Private car or rented van for the whole group".to_string(),
            total_distance: "About 150 km round trip".to_string(),
        },
        itinerary: vec![day_one, day_two],
        budget_breakdown: budget_breakdown(total_budget),
        tips: vec![
            "Book accommodation early, especially on long weekends.".to_string(),
            "Carry some cash for local markets and entrance fees.".to_string(),
            "Check the weather forecast before leaving.".to_string(),
            format!(
                "Estimated total budget is {} THB for {} people.",
                total_budget, group_size
            ),
        ],
    }
}

fn attraction_item(vote: Option<&VoteSummary>, slot: usize, time: &str, group: f64) -> PlanItem {
    let placeholder = &PLACEHOLDER_SLOTS[slot];

    match vote {
        Some(vote) => PlanItem {
            time: time.to_string(),
            name: vote.name.clone(),
            item_type: PlanItemType::Attraction,
            location: Some(
                vote.location
                    .clone()
                    .unwrap_or_else(|| placeholder.location.to_string()),
            ),
            est_cost: Some(Amount::rounded(
                vote.estimated_cost.unwrap_or(placeholder.cost_per_person) * group,
            )),
            duration: Some(
                vote.duration
                    .clone()
                    .unwrap_or_else(|| placeholder.duration.to_string()),
            ),
        },
        None => PlanItem {
            time: time.to_string(),
            name: placeholder.name.to_string(),
            item_type: PlanItemType::Attraction,
            location: Some(placeholder.location.to_string()),
            est_cost: Some(Amount::rounded(placeholder.cost_per_person * group)),
            duration: Some(placeholder.duration.to_string()),
        },
    }
}

fn fixed_item(time: &str, name: &str, item_type: PlanItemType, cost: f64, duration: &str) -> PlanItem {
    PlanItem {
        time: time.to_string(),
        name: name.to_string(),
        item_type,
        location: None,
        est_cost: Some(Amount::rounded(cost)),
        duration: Some(duration.to_string()),
    }
}

/// Splits the total by fixed shares. Each share is rounded on its own, so the sum may drift by a baht or two.
fn budget_breakdown(total: Amount) -> BudgetBreakdown {
    let share = |fraction: f64| Amount::rounded(total.value() * fraction);

    BudgetBreakdown {
        transportation: share(TRANSPORTATION_SHARE),
        accommodation: share(ACCOMMODATION_SHARE),
        attractions: share(ATTRACTIONS_SHARE),
        meals: share(MEALS_SHARE),
        shopping: share(SHOPPING_SHARE),
        miscellaneous: share(MISCELLANEOUS_SHARE),
    }
}
