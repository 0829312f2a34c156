use crate::catalog::{month_name, season_for};
use crate::constants::*;
use crate::models::{
    AlternativeKind, AlternativeSuggestion, BudgetStyle, Destination, Itinerary, ItineraryDay,
    QuizAnswers, TripSummary, UsdRange,
};
use crate::services::scoring::ScoredDestination;

/// Deterministic itinerary builder. Total over any non-empty shortlist, so
/// it terminates the fallback chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedGenerator;

/// One backbone stop and the number of days spent there.
struct Stop<'a> {
    destination: &'a Destination,
    days: u32,
}

fn meals_for(style: BudgetStyle) -> &'static str {
    match style {
        BudgetStyle::Budget => "Local cuisine at roadside eateries and markets",
        BudgetStyle::MidRange => "Local cuisine, breakfast and dinner at your lodge",
        BudgetStyle::Premium => "Full board at your lodge",
        BudgetStyle::Luxury => "Chef-prepared full board with premium drinks",
    }
}

fn accommodation_for(style: BudgetStyle) -> &'static str {
    match style {
        BudgetStyle::Budget => "Budget guesthouse or campsite",
        BudgetStyle::MidRange => "Mid-range lodge",
        BudgetStyle::Premium => "Premium lodge",
        BudgetStyle::Luxury => "Luxury lodge or tented camp",
    }
}

/// Assign stay lengths in rank order. Each stop gets its minimum stay,
/// truncated to the days left; stops that no longer fit are dropped. Any
/// unfilled days are then spread up to each stop's maximum, and whatever is
/// still left goes to the top-ranked stop so the trip is always fully covered.
fn allocate_stays<'a>(backbone: &[ScoredDestination<'a>], total_days: u32) -> Vec<Stop<'a>> {
    let mut stops = Vec::with_capacity(backbone.len());
    let mut remaining = total_days;

    for scored in backbone {
        if remaining == 0 {
            break;
        }
        let days = scored.destination.duration_days.min.clamp(1, remaining);
        remaining -= days;
        stops.push(Stop {
            destination: scored.destination,
            days,
        });
    }

    for stop in stops.iter_mut() {
        if remaining == 0 {
            break;
        }
        let room = stop.destination.duration_days.max.saturating_sub(stop.days);
        let extra = room.min(remaining);
        stop.days += extra;
        remaining -= extra;
    }

    if let Some(first) = stops.first_mut() {
        first.days += remaining;
    }

    stops
}

fn arrival_note(stop: &Destination, previous: Option<&Destination>) -> String {
    let mut parts = vec![format!(
        "{}h from Kampala",
        stop.transport_from_kampala.duration_hours
    )];

    if let Some(prev) = previous {
        let km = prev.coordinates.distance_to(&stop.coordinates);
        parts.push(format!("About {:.0} km from {}", km, prev.name));
    }
    if stop.permit_required {
        parts.push("Permits required, book in advance".to_string());
    }

    parts.join(". ")
}

fn seasonal_warnings(stops: &[Stop<'_>], answers: &QuizAnswers) -> Option<Vec<String>> {
    let month = answers.travel_month?;

    let warnings: Vec<String> = stops
        .iter()
        .filter(|s| !s.destination.is_best_month(month))
        .map(|s| {
            let season = season_for(s.destination, month);
            format!(
                "{} is outside its best months in {}. {}",
                s.destination.name,
                month_name(month),
                season.notes
            )
        })
        .collect();

    (!warnings.is_empty()).then_some(warnings)
}

fn alternative(
    kind: AlternativeKind,
    total: &UsdRange,
    duration_days: u32,
    destinations: Vec<String>,
) -> AlternativeSuggestion {
    let (multiplier, title, description, differences) = match kind {
        AlternativeKind::Budget => (
            BUDGET_ALTERNATIVE_MULTIPLIER,
            "Budget Alternative",
            "Same great destinations with budget-friendly options.",
            ["Budget camping", "Shared transport", "Fewer paid activities"],
        ),
        AlternativeKind::Premium => (
            PREMIUM_ALTERNATIVE_MULTIPLIER,
            "Premium Upgrade",
            "Luxury lodges and private guides throughout.",
            ["Premium lodges", "Private vehicle", "Exclusive experiences"],
        ),
        AlternativeKind::Short => (
            SHORT_ALTERNATIVE_MULTIPLIER,
            "Quick Escape",
            "A shorter version hitting the top highlights.",
            ["Fewer destinations", "Less driving", "More focused"],
        ),
    };

    AlternativeSuggestion {
        kind,
        title: title.to_string(),
        description: description.to_string(),
        estimated_budget_usd: total.scaled(multiplier.0, multiplier.1),
        duration_days,
        key_differences: differences.iter().map(|s| s.to_string()).collect(),
        destinations,
    }
}

impl RuleBasedGenerator {
    pub fn new() -> Self {
        RuleBasedGenerator
    }

    pub fn build(&self, shortlist: &[ScoredDestination<'_>], answers: &QuizAnswers) -> Itinerary {
        let total_days = trip_total_days(answers.duration);
        let backbone_len = shortlist.len().min(total_days as usize).min(MAX_BACKBONE_STOPS);
        let stops = allocate_stays(&shortlist[..backbone_len], total_days);

        let interests = answers.interests_phrase(" and ");
        let meals = meals_for(answers.budget_style);
        let accommodation = accommodation_for(answers.budget_style);

        let mut days = Vec::with_capacity(total_days as usize);
        let mut previous: Option<&Destination> = None;
        for stop in &stops {
            let d = stop.destination;
            for i in 0..stop.days {
                let arriving = i == 0;
                days.push(ItineraryDay {
                    day_number: days.len() as u32 + 1,
                    destination_id: d.id.clone(),
                    title: if arriving {
                        format!("Arrive at {}", d.name)
                    } else {
                        format!("Explore {}", d.name)
                    },
                    activities: d.top_activity_names(ACTIVITIES_PER_DAY),
                    estimated_cost_usd: d.daily_budget.mid_range.into(),
                    travel_notes: arriving.then(|| arrival_note(d, previous)),
                    why_this_fits_you: format!(
                        "Based on your interest in {}, {} is an excellent match.",
                        interests, d.name
                    ),
                    meals: Some(meals.to_string()),
                    accommodation: Some(accommodation.to_string()),
                    highlights: None,
                });
            }
            previous = Some(d);
        }

        let total = UsdRange::new(
            days.iter().map(|d| d.estimated_cost_usd.min).sum(),
            days.iter().map(|d| d.estimated_cost_usd.max).sum(),
        );

        let destination_ids: Vec<String> = stops.iter().map(|s| s.destination.id.clone()).collect();

        let summary = TripSummary {
            total_budget_usd: total,
            total_days: days.len() as u32,
            best_value_highlights: stops
                .iter()
                .take(HIGHLIGHT_COUNT)
                .map(|s| s.destination.why_go_here.clone())
                .collect(),
            booking_priorities: stops
                .iter()
                .filter(|s| s.destination.permit_required)
                .map(|s| format!("Book {} permits in advance", s.destination.name))
                .collect(),
            seasonal_warnings: seasonal_warnings(&stops, answers),
            overall_why_this_trip: format!(
                "A curated {}-day {} trip through Uganda's best destinations for {}.",
                total_days,
                answers.group_type,
                answers.interests_phrase(", ")
            ),
        };

        let alternatives = vec![
            alternative(
                AlternativeKind::Budget,
                &total,
                total_days,
                destination_ids.clone(),
            ),
            alternative(
                AlternativeKind::Premium,
                &total,
                total_days,
                destination_ids.clone(),
            ),
            alternative(
                AlternativeKind::Short,
                &total,
                (total_days / 2).max(2),
                destination_ids
                    .iter()
                    .take(SHORT_ALTERNATIVE_STOPS)
                    .cloned()
                    .collect(),
            ),
        ];

        tracing::debug!(
            days = days.len(),
            stops = stops.len(),
            "Built rule-based itinerary: {} days across {} stops",
            days.len(),
            stops.len()
        );

        Itinerary {
            days,
            summary,
            alternatives,
        }
    }
}
