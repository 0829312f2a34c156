use crate::models::{AccommodationTier, BudgetBreakdown, BudgetInputs, BudgetResult, TransportMode};

const PARK_FEE_PER_DAY: u32 = 40;
const MISC_BUFFER: f64 = 0.1;
const DEFAULT_ACTIVITY_COST: u32 = 50;

pub const BUDGET_DISCLAIMER: &str = "These are approximate estimates based on typical market rates. \
Actual costs vary by season, provider, and specific choices. \
Gorilla trekking permits are $700 per person as set by Uganda Wildlife Authority.";

/// Per-person activity prices in USD, keyed by catalog activity id.
const ACTIVITY_COSTS: &[(&str, u32)] = &[
    ("bwi-gorilla-trek", 700),
    ("mg-gorilla", 700),
    ("mg-golden-monkey", 100),
    ("kb-chimp-trek", 200),
    ("kb-chimp-hab", 250),
    ("ji-rafting", 137),
    ("ji-bungee", 115),
    ("ji-horseback", 60),
    ("en-ngamba", 92),
    ("zr-rhino-track", 50),
    ("rw-central-circuit", 2000),
];

/// Nightly accommodation range per person.
fn accommodation_rate(tier: AccommodationTier) -> (u32, u32) {
    match tier {
        AccommodationTier::Budget => (15, 35),
        AccommodationTier::MidRange => (80, 180),
        AccommodationTier::Premium => (250, 600),
    }
}

fn transport_daily(mode: TransportMode) -> u32 {
    match mode {
        TransportMode::Public => 15,
        TransportMode::Shared => 40,
        TransportMode::Private => 120,
    }
}

/// Meals follow the accommodation tier.
fn meals_daily(tier: AccommodationTier) -> u32 {
    match tier {
        AccommodationTier::Budget => 15,
        AccommodationTier::MidRange => 35,
        AccommodationTier::Premium => 70,
    }
}

pub fn activity_cost(activity_id: &str) -> u32 {
    ACTIVITY_COSTS
        .iter()
        .find(|(id, _)| *id == activity_id)
        .map(|(_, cost)| *cost)
        .unwrap_or(DEFAULT_ACTIVITY_COST)
}

/// Estimate trip cost per person and for the whole group.
pub fn calculate_budget(inputs: &BudgetInputs) -> BudgetResult {
    let days = inputs.duration_days;
    let (accommodation_min, accommodation_max) = accommodation_rate(inputs.accommodation_tier);
    let accommodation_avg = (accommodation_min + accommodation_max) / 2;
    let transport = transport_daily(inputs.transport_mode);
    let meals = meals_daily(inputs.accommodation_tier);

    let activities: u32 = inputs
        .selected_activities
        .iter()
        .map(|id| activity_cost(id))
        .sum();
    let park_fees = if inputs.include_permits {
        PARK_FEE_PER_DAY * days
    } else {
        0
    };

    let subtotal = (accommodation_avg + transport + meals) * days + activities + park_fees;
    let miscellaneous = (f64::from(subtotal) * MISC_BUFFER).round() as u32;

    let per_person = BudgetBreakdown {
        accommodation: accommodation_avg * days,
        transport: transport * days,
        park_fees,
        activities,
        meals: meals * days,
        miscellaneous,
        total: subtotal + miscellaneous,
    };

    let n = inputs.travelers;
    let mut total_group = BudgetBreakdown {
        accommodation: per_person.accommodation * n,
        transport: per_person.transport * n,
        park_fees: per_person.park_fees * n,
        activities: per_person.activities * n,
        meals: per_person.meals * n,
        miscellaneous: per_person.miscellaneous * n,
        total: 0,
    };
    total_group.total = total_group.accommodation
        + total_group.transport
        + total_group.park_fees
        + total_group.activities
        + total_group.meals
        + total_group.miscellaneous;

    BudgetResult {
        per_person,
        total_group,
        currency: "USD".to_string(),
        disclaimer: BUDGET_DISCLAIMER.to_string(),
    }
}
