use serde::{Deserialize, Serialize};
use std::fmt;

/// Approximate USD range. Fractional amounts are accepted from the
/// generative service, the deterministic tiers only produce whole dollars.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct UsdRange {
    pub min: f64,
    pub max: f64,
}

impl UsdRange {
    pub fn new(min: f64, max: f64) -> Self {
        UsdRange { min, max }
    }

    pub fn scaled(&self, min_factor: f64, max_factor: f64) -> Self {
        UsdRange {
            min: (self.min * min_factor).round(),
            max: (self.max * max_factor).round(),
        }
    }
}

impl From<crate::models::CostRange> for UsdRange {
    fn from(range: crate::models::CostRange) -> Self {
        UsdRange {
            min: f64::from(range.min),
            max: f64::from(range.max),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDay {
    #[serde(deserialize_with = "flexible::whole_number")]
    pub day_number: u32,
    pub destination_id: String,
    pub title: String,
    pub activities: Vec<String>,
    #[serde(rename = "estimatedCostUSD")]
    pub estimated_cost_usd: UsdRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_notes: Option<String>,
    pub why_this_fits_you: String,
    #[serde(
        default,
        deserialize_with = "flexible::optional_joined",
        skip_serializing_if = "Option::is_none"
    )]
    pub meals: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accommodation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TripSummary {
    #[serde(rename = "totalBudgetUSD")]
    pub total_budget_usd: UsdRange,
    #[serde(deserialize_with = "flexible::whole_number")]
    pub total_days: u32,
    #[serde(deserialize_with = "flexible::list")]
    pub best_value_highlights: Vec<String>,
    #[serde(deserialize_with = "flexible::list")]
    pub booking_priorities: Vec<String>,
    #[serde(
        default,
        deserialize_with = "flexible::optional_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub seasonal_warnings: Option<Vec<String>>,
    pub overall_why_this_trip: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AlternativeKind {
    Budget,
    Premium,
    Short,
}

impl AlternativeKind {
    pub const ALL: [AlternativeKind; 3] = [
        AlternativeKind::Budget,
        AlternativeKind::Premium,
        AlternativeKind::Short,
    ];
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlternativeSuggestion {
    #[serde(rename = "type")]
    pub kind: AlternativeKind,
    pub title: String,
    pub description: String,
    #[serde(rename = "estimatedBudgetUSD")]
    pub estimated_budget_usd: UsdRange,
    #[serde(deserialize_with = "flexible::whole_number")]
    pub duration_days: u32,
    #[serde(deserialize_with = "flexible::list")]
    pub key_differences: Vec<String>,
    pub destinations: Vec<String>,
}

/// Itinerary body produced by whichever tier of the pipeline succeeds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Itinerary {
    pub days: Vec<ItineraryDay>,
    pub summary: TripSummary,
    pub alternatives: Vec<AlternativeSuggestion>,
}

impl Itinerary {
    /// Distinct destination ids visited, in first-visit order.
    pub fn destination_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        for day in &self.days {
            if !ids.contains(&day.destination_id.as_str()) {
                ids.push(day.destination_id.as_str());
            }
        }
        ids
    }
}

/// Which tier of the fallback chain produced an itinerary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItinerarySource {
    Generative,
    Cached,
    RuleBased,
}

impl fmt::Display for ItinerarySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItinerarySource::Generative => write!(f, "generative"),
            ItinerarySource::Cached => write!(f, "cached"),
            ItinerarySource::RuleBased => write!(f, "rule_based"),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlannedItinerary {
    pub id: String,
    #[serde(flatten)]
    pub itinerary: Itinerary,
    pub generated_at: String,
    pub profile_used: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedDestinationSummary {
    pub id: String,
    pub name: String,
    pub score: u32,
}

/// Success envelope of `POST /api/itinerary`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    pub itinerary: PlannedItinerary,
    pub ranked_destinations: Vec<RankedDestinationSummary>,
    #[serde(skip)]
    pub source: ItinerarySource,
}

/// Fields the generative service may send in more than one shape: one string
/// or a list, and whole numbers written as floats.
mod flexible {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Int(u32),
        Float(f64),
    }

    /// Accepts `3` and `3.0`, rejects `3.5` and negatives.
    pub fn whole_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Count::deserialize(deserializer)? {
            Count::Int(n) => Ok(n),
            Count::Float(f) if f.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&f) => {
                Ok(f as u32)
            }
            Count::Float(f) => Err(D::Error::custom(format!(
                "expected a whole number of days, got {}",
                f
            ))),
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    impl OneOrMany {
        fn into_list(self) -> Vec<String> {
            match self {
                OneOrMany::One(s) => vec![s],
                OneOrMany::Many(v) => v,
            }
        }

        fn into_joined(self) -> String {
            match self {
                OneOrMany::One(s) => s,
                OneOrMany::Many(v) => v.join(", "),
            }
        }
    }

    pub fn list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        OneOrMany::deserialize(deserializer).map(OneOrMany::into_list)
    }

    pub fn optional_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<OneOrMany>::deserialize(deserializer).map(|v| v.map(OneOrMany::into_list))
    }

    pub fn optional_joined<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<OneOrMany>::deserialize(deserializer).map(|v| v.map(OneOrMany::into_joined))
    }
}
