use crate::models::{QuizAnswers, TripDuration};
use crate::services::scoring::ScoredDestination;
use std::fmt::Write;

const SYSTEM_PROMPT: &str = r#"You are Tugende, an expert AI Uganda travel planner. You create personalized trip itineraries based on traveler preferences and a curated database of Uganda destinations.

CRITICAL RULES:
1. ONLY reference destinations that are provided in the shortlist. Never invent destinations.
2. Return ONLY valid JSON matching the exact schema provided. No markdown, no explanations outside JSON.
3. Budget estimates must be realistic ranges, clearly labeled as approximate.
4. Sequence destinations logically based on geography to minimize travel time.
5. Include honest travel time estimates between stops.
6. Mention difficulty levels and physical requirements where relevant.
7. Personalize the "whyThisFitsYou" notes based on the traveler's stated interests.
8. If a destination requires permits, mention it in travelNotes.

OUTPUT FORMAT:
Return a single JSON object with this structure:
{
  "days": [{ dayNumber, destinationId, title, activities, estimatedCostUSD: {min, max}, travelNotes, whyThisFitsYou, meals, accommodation, highlights }],
  "summary": { totalBudgetUSD: {min, max}, totalDays, bestValueHighlights, bookingPriorities, seasonalWarnings, overallWhyThisTrip },
  "alternatives": [{ type: "budget"|"premium"|"short", title, description, estimatedBudgetUSD: {min, max}, durationDays, keyDifferences, destinations }]
}"#;

/// Day-count hint given to the model for each duration bucket.
pub fn duration_hint(duration: TripDuration) -> &'static str {
    match duration {
        TripDuration::Weekend => "2 days",
        TripDuration::ThreeToFiveDays => "4 days",
        TripDuration::OneWeek => "7 days",
        TripDuration::TwoWeeks => "12 days",
    }
}

pub fn build_system_prompt() -> &'static str {
    SYSTEM_PROMPT
}

fn join_display<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn write_shortlist_entry(out: &mut String, rank: usize, scored: &ScoredDestination<'_>) {
    let d = scored.destination;
    let activities = d
        .activities
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    // Writing to a String cannot fail
    let _ = write!(
        out,
        "{rank}. {name} (ID: {id})\n   \
         Region: {region} | Score: {score}/100\n   \
         Categories: {categories}\n   \
         Duration: {min}-{max} days\n   \
         Price Band: {band}\n   \
         Best Months: {months}\n   \
         Key Activities: {activities}\n   \
         Transport from Kampala: {hours}h\n   \
         Summary: {summary}\n   \
         Daily Budget: ${budget_min}-${budget_max}/day mid-range\n   \
         Permit Required: {permit}",
        rank = rank,
        name = d.name,
        id = d.id,
        region = d.region,
        score = scored.display_score(),
        categories = join_display(&d.categories),
        min = d.duration_days.min,
        max = d.duration_days.max,
        band = d.price_band,
        months = join_display(&d.best_months),
        activities = activities,
        hours = d.transport_from_kampala.duration_hours,
        summary = d.summary,
        budget_min = d.daily_budget.mid_range.min,
        budget_max = d.daily_budget.mid_range.max,
        permit = if d.permit_required { "Yes" } else { "No" },
    );
}

pub fn build_user_prompt(answers: &QuizAnswers, shortlist: &[ScoredDestination<'_>]) -> String {
    let hint = duration_hint(answers.duration);
    let month = answers
        .travel_month
        .map(|m| format!("Month {}", m))
        .unwrap_or_else(|| "Flexible".to_string());

    let mut out = String::new();
    let _ = write!(
        out,
        "TRAVELER PROFILE:\n\
         - Origin: {}\n\
         - Group: {}\n\
         - Duration: {}\n\
         - Budget Style: {}\n\
         - Interests: {}\n\
         - Travel Month: {}\n\
         - Style: {}\n\n\
         RANKED DESTINATION SHORTLIST (use these only):\n",
        answers.origin,
        answers.group_type,
        hint,
        answers.budget_style,
        join_display(&answers.interests),
        month,
        answers.travel_style,
    );

    for (i, scored) in shortlist.iter().enumerate() {
        if i > 0 {
            out.push_str("\n\n");
        }
        write_shortlist_entry(&mut out, i + 1, scored);
    }

    let _ = write!(
        out,
        "\n\nCreate a personalized {} itinerary for this {} traveler.\n\
         Include 3 alternatives: one budget option, one premium upgrade, and one shorter option.\n\
         Make the \"whyThisFitsYou\" deeply personal to their stated interests.\n\
         Return ONLY the JSON object, no other text.",
        hint, answers.group_type,
    );

    out
}

/// Full instruction block sent to the generative service as a single turn.
pub fn build_instructions(answers: &QuizAnswers, shortlist: &[ScoredDestination<'_>]) -> String {
    format!(
        "{}\n\n{}",
        build_system_prompt(),
        build_user_prompt(answers, shortlist)
    )
}
