use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AccommodationTier {
    Budget,
    MidRange,
    Premium,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Public,
    Shared,
    Private,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BudgetInputs {
    pub travelers: u32,
    pub duration_days: u32,
    pub accommodation_tier: AccommodationTier,
    pub transport_mode: TransportMode,
    #[serde(default)]
    pub selected_activities: Vec<String>,
    #[serde(default)]
    pub include_permits: bool,
}

impl BudgetInputs {
    /// Parse and validate a raw request body.
    pub fn from_slice(body: &[u8]) -> Result<Self, String> {
        let deserializer = &mut serde_json::Deserializer::from_slice(body);
        let inputs: BudgetInputs = serde_path_to_error::deserialize(deserializer).map_err(|e| {
            let path = e.path().to_string();
            if path == "." {
                format!("Invalid budget inputs: {}", e.inner())
            } else {
                format!("Invalid budget inputs at {}: {}", path, e.inner())
            }
        })?;

        inputs
            .validate()
            .map_err(|e| format!("Invalid budget inputs: {}", e))?;

        Ok(inputs)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.travelers == 0 || self.travelers > 50 {
            return Err("travelers must be between 1 and 50".to_string());
        }
        if self.duration_days == 0 || self.duration_days > 60 {
            return Err("durationDays must be between 1 and 60".to_string());
        }
        if self.selected_activities.len() > 100 {
            return Err("selectedActivities must contain at most 100 entries".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BudgetBreakdown {
    pub accommodation: u32,
    pub transport: u32,
    pub park_fees: u32,
    pub activities: u32,
    pub meals: u32,
    pub miscellaneous: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetResult {
    pub per_person: BudgetBreakdown,
    pub total_group: BudgetBreakdown,
    pub currency: String,
    pub disclaimer: String,
}
