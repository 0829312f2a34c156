use crate::models::Coordinates;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Region {
    Western,
    Eastern,
    Northern,
    Central,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Region::Western => "Western",
            Region::Eastern => "Eastern",
            Region::Northern => "Northern",
            Region::Central => "Central",
        };
        write!(f, "{}", s)
    }
}

/// Ordinal price band: budget < mid-range < premium.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum PriceBand {
    Budget,
    MidRange,
    Premium,
}

impl fmt::Display for PriceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PriceBand::Budget => "budget",
            PriceBand::MidRange => "mid-range",
            PriceBand::Premium => "premium",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DestinationCategory {
    Wildlife,
    Adventure,
    Culture,
    Relaxation,
    Family,
    Nature,
    Photography,
}

impl fmt::Display for DestinationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DestinationCategory::Wildlife => "wildlife",
            DestinationCategory::Adventure => "adventure",
            DestinationCategory::Culture => "culture",
            DestinationCategory::Relaxation => "relaxation",
            DestinationCategory::Family => "family",
            DestinationCategory::Nature => "nature",
            DestinationCategory::Photography => "photography",
        };
        write!(f, "{}", s)
    }
}

/// Whole-dollar USD range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CostRange {
    pub min: u32,
    pub max: u32,
}

/// Feasible stay length in days.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayRange {
    pub min: u32,
    pub max: u32,
}

impl DayRange {
    pub fn overlaps(&self, lo: u32, hi: u32) -> bool {
        self.min <= hi && self.max >= lo
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyBudget {
    pub budget: CostRange,
    pub mid_range: CostRange,
    pub premium: CostRange,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransportInfo {
    pub duration_hours: f64,
    pub distance_km: f64,
    pub modes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub name: String,
    pub category: DestinationCategory,
    pub difficulty: u8,
    pub cost_band: PriceBand,
    pub duration_hours: f64,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permit_required: Option<bool>,
    #[serde(
        default,
        rename = "costEstimateUSD",
        skip_serializing_if = "Option::is_none"
    )]
    pub cost_estimate_usd: Option<CostRange>,
}

/// Catalog entry. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub region: Region,
    pub coordinates: Coordinates,
    pub categories: Vec<DestinationCategory>,
    pub price_band: PriceBand,
    pub best_months: Vec<u8>,
    pub duration_days: DayRange,
    pub difficulty: u8,
    pub family_score: u8,
    pub adventure_score: u8,
    pub luxury_score: u8,
    pub culture_score: u8,
    pub wildlife_score: u8,
    pub activities: Vec<Activity>,
    pub transport_from_kampala: TransportInfo,
    pub summary: String,
    pub why_go_here: String,
    #[serde(default)]
    pub tips: Vec<String>,
    pub daily_budget: DailyBudget,
    pub permit_required: bool,
    pub best_for: Vec<String>,
}

const MAX_AFFINITY_SCORE: u8 = 5;

impl Destination {
    pub fn has_category(&self, category: DestinationCategory) -> bool {
        self.categories.contains(&category)
    }

    pub fn is_best_month(&self, month: u8) -> bool {
        self.best_months.contains(&month)
    }

    /// Names of the first `n` activities, in catalog order.
    pub fn top_activity_names(&self, n: usize) -> Vec<String> {
        self.activities
            .iter()
            .take(n)
            .map(|a| a.name.clone())
            .collect()
    }

    /// Check the data-model invariants a catalog entry must satisfy.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("destination id must not be empty".to_string());
        }
        if self.duration_days.min > self.duration_days.max {
            return Err(format!(
                "{}: durationDays.min ({}) exceeds max ({})",
                self.id, self.duration_days.min, self.duration_days.max
            ));
        }
        if !(1..=5).contains(&self.difficulty) {
            return Err(format!(
                "{}: difficulty {} outside 1..=5",
                self.id, self.difficulty
            ));
        }

        let scores = [
            ("familyScore", self.family_score),
            ("adventureScore", self.adventure_score),
            ("luxuryScore", self.luxury_score),
            ("cultureScore", self.culture_score),
            ("wildlifeScore", self.wildlife_score),
        ];
        if let Some((name, value)) = scores.iter().find(|(_, v)| *v > MAX_AFFINITY_SCORE) {
            return Err(format!("{}: {} {} outside 0..=5", self.id, name, value));
        }

        if let Some(month) = self.best_months.iter().find(|m| !(1..=12).contains(*m)) {
            return Err(format!("{}: best month {} outside 1..=12", self.id, month));
        }

        self.coordinates
            .validate()
            .map_err(|e| format!("{}: {}", self.id, e))?;

        let tiers = [
            ("budget", &self.daily_budget.budget),
            ("midRange", &self.daily_budget.mid_range),
            ("premium", &self.daily_budget.premium),
        ];
        if let Some((tier, range)) = tiers.iter().find(|(_, r)| r.min > r.max) {
            return Err(format!(
                "{}: dailyBudget.{} min ({}) exceeds max ({})",
                self.id, tier, range.min, range.max
            ));
        }

        Ok(())
    }
}
