use crate::catalog::Catalog;
use crate::models::{AlternativeKind, Itinerary, UsdRange};
use serde_json::error::Category;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Response is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Schema mismatch at {path}: {message}")]
    Schema { path: String, message: String },

    #[error("Contract violation: {0}")]
    Contract(String),
}

/// Remove a surrounding markdown code fence (```` ``` ```` or ```` ```json ````).
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let rest = match trimmed.strip_prefix("```") {
        Some(rest) => rest,
        None => return trimmed,
    };

    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
        .unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Greedy span from the first `{` to the last `}`.
pub fn extract_braced(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (start < end).then(|| &raw[start..=end])
}

fn deserialize(text: &str) -> Result<Itinerary, ParseError> {
    let deserializer = &mut serde_json::Deserializer::from_str(text);
    serde_path_to_error::deserialize(deserializer).map_err(|e| {
        let path = e.path().to_string();
        let inner = e.into_inner();
        match inner.classify() {
            Category::Data => ParseError::Schema {
                path,
                message: inner.to_string(),
            },
            Category::Syntax | Category::Eof | Category::Io => {
                ParseError::InvalidJson(inner.to_string())
            }
        }
    })
}

fn check_range(label: &str, range: &UsdRange) -> Result<(), ParseError> {
    if !range.min.is_finite() || !range.max.is_finite() || range.min < 0.0 {
        return Err(ParseError::Contract(format!(
            "{} has an invalid amount ({}-{})",
            label, range.min, range.max
        )));
    }
    if range.min > range.max {
        return Err(ParseError::Contract(format!(
            "{} min ({}) exceeds max ({})",
            label, range.min, range.max
        )));
    }
    Ok(())
}

/// Structural rules a typed itinerary must still satisfy before it can be
/// shown to a traveler.
pub fn check_contract(itinerary: &Itinerary, catalog: &Catalog) -> Result<(), ParseError> {
    if itinerary.days.is_empty() {
        return Err(ParseError::Contract("itinerary has no days".to_string()));
    }

    for (i, day) in itinerary.days.iter().enumerate() {
        let expected = i as u32 + 1;
        if day.day_number != expected {
            return Err(ParseError::Contract(format!(
                "days[{}].dayNumber is {}, expected {}",
                i, day.day_number, expected
            )));
        }
        if !catalog.contains(&day.destination_id) {
            return Err(ParseError::Contract(format!(
                "days[{}] references unknown destination '{}'",
                i, day.destination_id
            )));
        }
        if day.why_this_fits_you.trim().is_empty() {
            return Err(ParseError::Contract(format!(
                "days[{}].whyThisFitsYou is empty",
                i
            )));
        }
        check_range(&format!("days[{}].estimatedCostUSD", i), &day.estimated_cost_usd)?;
    }

    let last_day = itinerary.days.len() as u32;
    if itinerary.summary.total_days != last_day {
        return Err(ParseError::Contract(format!(
            "summary.totalDays is {}, but the last day is {}",
            itinerary.summary.total_days, last_day
        )));
    }
    check_range("summary.totalBudgetUSD", &itinerary.summary.total_budget_usd)?;

    let mut kinds = HashSet::new();
    for (i, alternative) in itinerary.alternatives.iter().enumerate() {
        if !kinds.insert(alternative.kind) {
            return Err(ParseError::Contract(format!(
                "alternatives[{}] repeats type '{:?}'",
                i, alternative.kind
            )));
        }
        if let Some(id) = alternative
            .destinations
            .iter()
            .find(|id| !catalog.contains(id))
        {
            return Err(ParseError::Contract(format!(
                "alternatives[{}] references unknown destination '{}'",
                i, id
            )));
        }
        check_range(
            &format!("alternatives[{}].estimatedBudgetUSD", i),
            &alternative.estimated_budget_usd,
        )?;
    }
    if kinds.len() != AlternativeKind::ALL.len() {
        return Err(ParseError::Contract(format!(
            "expected one alternative of each type, got {}",
            itinerary.alternatives.len()
        )));
    }

    Ok(())
}

fn parse_attempt(text: &str, catalog: &Catalog) -> Result<Itinerary, ParseError> {
    let itinerary = deserialize(text)?;
    check_contract(&itinerary, catalog)?;
    Ok(itinerary)
}

/// Turn raw generative output into a trusted itinerary, or `None`.
///
/// Two attempts are made: the trimmed text with any code fence removed, then
/// the first-`{`-to-last-`}` span of the raw text. Each attempt runs the full
/// schema and contract checks. Failures are logged and never propagated.
pub fn parse_itinerary_response(raw: &str, catalog: &Catalog) -> Option<Itinerary> {
    let first_error = match parse_attempt(strip_code_fence(raw), catalog) {
        Ok(itinerary) => return Some(itinerary),
        Err(e) => e,
    };
    tracing::warn!("Failed to parse itinerary response: {}", first_error);

    let candidate = match extract_braced(raw) {
        Some(candidate) => candidate,
        None => {
            tracing::warn!("All parsing attempts failed: no JSON object found");
            return None;
        }
    };

    match parse_attempt(candidate, catalog) {
        Ok(itinerary) => {
            tracing::debug!("Recovered itinerary via brace extraction");
            Some(itinerary)
        }
        Err(e) => {
            tracing::warn!("All parsing attempts failed: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn catalog() -> Catalog {
        Catalog::embedded().unwrap()
    }

    fn valid_itinerary() -> Value {
        json!({
            "days": [
                {
                    "dayNumber": 1,
                    "destinationId": "jinja",
                    "title": "Arrive at Jinja",
                    "activities": ["White Water Rafting on the Nile"],
                    "estimatedCostUSD": {"min": 80, "max": 160},
                    "travelNotes": "2h from Kampala",
                    "whyThisFitsYou": "You asked for adventure.",
                    "meals": ["Breakfast", "Dinner"],
                    "accommodation": "Riverside camp"
                },
                {
                    "dayNumber": 2,
                    "destinationId": "sipi-falls",
                    "title": "Explore Sipi Falls",
                    "activities": ["Three Waterfalls Hike"],
                    "estimatedCostUSD": {"min": 70, "max": 140},
                    "whyThisFitsYou": "Waterfall hikes for an adventurer."
                }
            ],
            "summary": {
                "totalBudgetUSD": {"min": 150, "max": 300},
                "totalDays": 2,
                "bestValueHighlights": "Rafting the Nile",
                "bookingPriorities": [],
                "overallWhyThisTrip": "An adventurous weekend."
            },
            "alternatives": [
                {
                    "type": "budget", "title": "Budget", "description": "Cheaper",
                    "estimatedBudgetUSD": {"min": 90, "max": 180}, "durationDays": 2,
                    "keyDifferences": "Camping", "destinations": ["jinja", "sipi-falls"]
                },
                {
                    "type": "premium", "title": "Premium", "description": "Fancier",
                    "estimatedBudgetUSD": {"min": 300, "max": 750}, "durationDays": 2,
                    "keyDifferences": ["Lodges"], "destinations": ["jinja", "sipi-falls"]
                },
                {
                    "type": "short", "title": "Short", "description": "Shorter",
                    "estimatedBudgetUSD": {"min": 60, "max": 120}, "durationDays": 2,
                    "keyDifferences": ["One stop"], "destinations": ["jinja"]
                }
            ]
        })
    }

    #[test]
    fn test_plain_json_parses() {
        let raw = valid_itinerary().to_string();
        let itinerary = parse_itinerary_response(&raw, &catalog()).unwrap();
        assert_eq!(itinerary.days.len(), 2);
        assert_eq!(itinerary.days[0].meals.as_deref(), Some("Breakfast, Dinner"));
        assert_eq!(
            itinerary.summary.best_value_highlights,
            vec!["Rafting the Nile".to_string()]
        );
        assert_eq!(itinerary.alternatives[0].key_differences, vec!["Camping"]);
    }

    #[test]
    fn test_fenced_json_matches_unfenced() {
        let body = serde_json::to_string_pretty(&valid_itinerary()).unwrap();
        let fenced = format!("  \n```json\n{}\n```\n", body);

        let direct = parse_itinerary_response(&body, &catalog()).unwrap();
        let from_fence = parse_itinerary_response(&fenced, &catalog()).unwrap();
        assert_eq!(direct, from_fence);
    }

    #[test]
    fn test_prose_wrapped_json_recovered() {
        let raw = format!(
            "Sure! Here is your trip:\n{}\nEnjoy Uganda!",
            valid_itinerary()
        );
        assert!(parse_itinerary_response(&raw, &catalog()).is_some());
    }

    #[test]
    fn test_not_json_rejected() {
        assert!(parse_itinerary_response("not json at all", &catalog()).is_none());
        assert!(parse_itinerary_response("", &catalog()).is_none());
        assert!(parse_itinerary_response("} backwards {", &catalog()).is_none());
    }

    #[test]
    fn test_missing_required_field_rejected() {
        let mut value = valid_itinerary();
        value["summary"].as_object_mut().unwrap().remove("totalDays");
        assert!(parse_itinerary_response(&value.to_string(), &catalog()).is_none());

        match deserialize(&value.to_string()) {
            Err(ParseError::Schema { path, .. }) => assert_eq!(path, "summary"),
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_float_day_counts_accepted() {
        let mut value = valid_itinerary();
        value["days"][0]["dayNumber"] = json!(1.0);
        value["days"][1]["dayNumber"] = json!(2.0);
        value["summary"]["totalDays"] = json!(2.0);
        value["alternatives"][0]["durationDays"] = json!(2.0);

        let itinerary = parse_itinerary_response(&value.to_string(), &catalog()).unwrap();
        assert_eq!(itinerary.days[1].day_number, 2);
        assert_eq!(itinerary.summary.total_days, 2);

        value["summary"]["totalDays"] = json!(2.5);
        assert!(parse_itinerary_response(&value.to_string(), &catalog()).is_none());
    }

    #[test]
    fn test_invalid_json_classified() {
        assert!(matches!(
            deserialize("{\"days\": [1, 2"),
            Err(ParseError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_unknown_destination_rejected() {
        let mut value = valid_itinerary();
        value["days"][1]["destinationId"] = json!("narnia");
        assert!(parse_itinerary_response(&value.to_string(), &catalog()).is_none());

        let mut value = valid_itinerary();
        value["alternatives"][2]["destinations"] = json!(["narnia"]);
        assert!(parse_itinerary_response(&value.to_string(), &catalog()).is_none());
    }

    #[test]
    fn test_total_days_mismatch_rejected() {
        let mut value = valid_itinerary();
        value["summary"]["totalDays"] = json!(3);
        let itinerary: Itinerary = serde_json::from_value(value).unwrap();
        assert!(matches!(
            check_contract(&itinerary, &catalog()),
            Err(ParseError::Contract(_))
        ));
    }

    #[test]
    fn test_gap_in_day_numbers_rejected() {
        let mut value = valid_itinerary();
        value["days"][1]["dayNumber"] = json!(3);
        value["summary"]["totalDays"] = json!(3);
        assert!(parse_itinerary_response(&value.to_string(), &catalog()).is_none());
    }

    #[test]
    fn test_alternative_set_enforced() {
        let mut value = valid_itinerary();
        value["alternatives"][2]["type"] = json!("budget");
        assert!(parse_itinerary_response(&value.to_string(), &catalog()).is_none());

        let mut value = valid_itinerary();
        value["alternatives"].as_array_mut().unwrap().pop();
        assert!(parse_itinerary_response(&value.to_string(), &catalog()).is_none());
    }

    #[test]
    fn test_inverted_cost_range_rejected() {
        let mut value = valid_itinerary();
        value["days"][0]["estimatedCostUSD"] = json!({"min": 200, "max": 100});
        assert!(parse_itinerary_response(&value.to_string(), &catalog()).is_none());
    }

    #[test]
    fn test_empty_rationale_rejected() {
        let mut value = valid_itinerary();
        value["days"][0]["whyThisFitsYou"] = json!("   ");
        assert!(parse_itinerary_response(&value.to_string(), &catalog()).is_none());
    }

    #[test]
    fn test_strip_code_fence_variants() {
        assert_eq!(strip_code_fence("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("```\n{}```"), "{}");
        assert_eq!(strip_code_fence("  {} "), "{}");
    }

    #[test]
    fn test_extract_braced() {
        assert_eq!(extract_braced("abc {\"a\": {}} def"), Some("{\"a\": {}}"));
        assert_eq!(extract_braced("no braces"), None);
    }
}
