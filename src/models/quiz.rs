use crate::models::DestinationCategory;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TravelerOrigin {
    International,
    #[serde(alias = "ugandan")]
    Local,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GroupType {
    Solo,
    Couple,
    Family,
    Friends,
    Group,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TripDuration {
    #[serde(rename = "weekend")]
    Weekend,
    #[serde(rename = "3-5-days")]
    ThreeToFiveDays,
    #[serde(rename = "one-week")]
    OneWeek,
    #[serde(rename = "two-weeks")]
    TwoWeeks,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetStyle {
    Budget,
    MidRange,
    Premium,
    Luxury,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TravelInterest {
    Wildlife,
    Adventure,
    Culture,
    Relaxation,
    Nature,
    Photography,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TravelStyle {
    Backpacker,
    Comfortable,
    Luxury,
}

impl TravelerOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelerOrigin::International => "international",
            TravelerOrigin::Local => "local",
        }
    }
}

impl GroupType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupType::Solo => "solo",
            GroupType::Couple => "couple",
            GroupType::Family => "family",
            GroupType::Friends => "friends",
            GroupType::Group => "group",
        }
    }
}

impl TripDuration {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripDuration::Weekend => "weekend",
            TripDuration::ThreeToFiveDays => "3-5-days",
            TripDuration::OneWeek => "one-week",
            TripDuration::TwoWeeks => "two-weeks",
        }
    }

    /// Duration token used in cached-itinerary keys.
    pub fn profile_token(&self) -> &'static str {
        match self {
            TripDuration::OneWeek => "week",
            other => other.as_str(),
        }
    }
}

impl BudgetStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetStyle::Budget => "budget",
            BudgetStyle::MidRange => "mid-range",
            BudgetStyle::Premium => "premium",
            BudgetStyle::Luxury => "luxury",
        }
    }
}

impl TravelInterest {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelInterest::Wildlife => "wildlife",
            TravelInterest::Adventure => "adventure",
            TravelInterest::Culture => "culture",
            TravelInterest::Relaxation => "relaxation",
            TravelInterest::Nature => "nature",
            TravelInterest::Photography => "photography",
        }
    }

    /// The destination category tag this interest corresponds to.
    pub fn category(&self) -> DestinationCategory {
        match self {
            TravelInterest::Wildlife => DestinationCategory::Wildlife,
            TravelInterest::Adventure => DestinationCategory::Adventure,
            TravelInterest::Culture => DestinationCategory::Culture,
            TravelInterest::Relaxation => DestinationCategory::Relaxation,
            TravelInterest::Nature => DestinationCategory::Nature,
            TravelInterest::Photography => DestinationCategory::Photography,
        }
    }
}

impl TravelStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelStyle::Backpacker => "backpacker",
            TravelStyle::Comfortable => "comfortable",
            TravelStyle::Luxury => "luxury",
        }
    }
}

macro_rules! display_via_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        })*
    };
}

display_via_as_str!(
    TravelerOrigin,
    GroupType,
    TripDuration,
    BudgetStyle,
    TravelInterest,
    TravelStyle
);

/// Traveler questionnaire, immutable once submitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct QuizAnswers {
    pub origin: TravelerOrigin,
    pub group_type: GroupType,
    pub duration: TripDuration,
    pub budget_style: BudgetStyle,
    pub interests: Vec<TravelInterest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_month: Option<u8>,
    pub travel_style: TravelStyle,
}

impl QuizAnswers {
    /// Semantic checks serde cannot express. Enum membership and field
    /// presence are already enforced during deserialization.
    pub fn validate(&self) -> Result<(), String> {
        if self.interests.is_empty() {
            return Err("interests must contain at least one entry".to_string());
        }

        let mut seen = HashSet::new();
        if let Some(dup) = self.interests.iter().find(|i| !seen.insert(**i)) {
            return Err(format!("interests contains duplicate entry '{}'", dup));
        }

        if let Some(month) = self.travel_month {
            if !(1..=12).contains(&month) {
                return Err(format!(
                    "travelMonth must be between 1 and 12 (got {})",
                    month
                ));
            }
        }

        Ok(())
    }

    /// First-listed interest, used as the primary cache-key component.
    pub fn primary_interest(&self) -> TravelInterest {
        self.interests
            .first()
            .copied()
            .unwrap_or(TravelInterest::Adventure)
    }

    /// Interests joined for human-readable text, e.g. "wildlife and culture".
    pub fn interests_phrase(&self, separator: &str) -> String {
        if self.interests.is_empty() {
            return "exploration".to_string();
        }
        self.interests
            .iter()
            .map(|i| i.as_str())
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Tag echoed back in the response envelope.
    pub fn profile_tag(&self) -> String {
        format!(
            "{}-{}-{}",
            self.group_type, self.budget_style, self.duration
        )
    }
}

/// Inbound body of `POST /api/itinerary`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PlanRequest {
    pub answers: QuizAnswers,
    /// Free text from the homepage search box, used for the ranking boost.
    #[serde(default)]
    pub query: Option<String>,
}

impl PlanRequest {
    /// Parse and validate a raw request body. The error names the offending
    /// JSON path so clients can fix and resubmit.
    pub fn from_slice(body: &[u8]) -> Result<Self, String> {
        let deserializer = &mut serde_json::Deserializer::from_slice(body);
        let request: PlanRequest = serde_path_to_error::deserialize(deserializer).map_err(|e| {
            let path = e.path().to_string();
            if path == "." {
                format!("Invalid quiz answers: {}", e.inner())
            } else {
                format!("Invalid quiz answers at {}: {}", path, e.inner())
            }
        })?;

        request
            .answers
            .validate()
            .map_err(|e| format!("Invalid quiz answers: {}", e))?;

        Ok(request)
    }

    /// The query with surrounding whitespace removed, if anything remains.
    pub fn normalized_query(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }
}
