use crate::catalog::{Catalog, CatalogError};
use crate::models::{Itinerary, QuizAnswers};
use crate::services::parser::check_contract;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

const EMBEDDED_LIBRARY: &str = include_str!("../../data/cached_itineraries.json");

/// Lookup key for precomputed itineraries:
/// `{primaryInterest}-{groupType}-{durationToken}`, e.g. `wildlife-family-week`.
pub fn profile_key(answers: &QuizAnswers) -> String {
    format!(
        "{}-{}-{}",
        answers.primary_interest(),
        answers.group_type,
        answers.duration.profile_token()
    )
}

#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}

/// Read-only library of precomputed itineraries, keyed by [`profile_key`].
/// Exact-match lookup only.
pub struct ItineraryLibrary {
    entries: HashMap<String, Itinerary>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ItineraryLibrary {
    pub fn new(entries: HashMap<String, Itinerary>) -> Self {
        ItineraryLibrary {
            entries,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Parse a library document and check every entry against the catalog,
    /// so a stale library fails startup instead of reaching a traveler.
    pub fn from_json_str(json: &str, catalog: &Catalog) -> Result<Self, CatalogError> {
        let entries: HashMap<String, Itinerary> = serde_json::from_str(json)?;

        for (key, itinerary) in &entries {
            check_contract(itinerary, catalog)
                .map_err(|e| CatalogError::Invalid(format!("cached itinerary '{}': {}", key, e)))?;
        }

        Ok(Self::new(entries))
    }

    /// The library compiled into the binary.
    pub fn embedded(catalog: &Catalog) -> Result<Self, CatalogError> {
        Self::from_json_str(EMBEDDED_LIBRARY, catalog)
    }

    pub fn lookup(&self, key: &str) -> Option<Itinerary> {
        match self.entries.get(key) {
            Some(itinerary) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("Itinerary library hit: {}", key);
                Some(itinerary.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("Itinerary library miss: {}", key);
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let hit_rate = if hits + misses > 0 {
            (hits as f64 / (hits + misses) as f64) * 100.0
        } else {
            0.0
        };

        CacheStats {
            entries: self.entries.len(),
            hits,
            misses,
            hit_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        BudgetStyle, GroupType, TravelInterest, TravelStyle, TravelerOrigin, TripDuration,
    };

    fn answers(interest: TravelInterest, group: GroupType, duration: TripDuration) -> QuizAnswers {
        QuizAnswers {
            origin: TravelerOrigin::International,
            group_type: group,
            duration,
            budget_style: BudgetStyle::MidRange,
            interests: vec![interest, TravelInterest::Photography],
            travel_month: None,
            travel_style: TravelStyle::Comfortable,
        }
    }

    #[test]
    fn test_profile_key_rewrites_one_week() {
        let key = profile_key(&answers(
            TravelInterest::Wildlife,
            GroupType::Family,
            TripDuration::OneWeek,
        ));
        assert_eq!(key, "wildlife-family-week");

        let key = profile_key(&answers(
            TravelInterest::Culture,
            GroupType::Group,
            TripDuration::ThreeToFiveDays,
        ));
        assert_eq!(key, "culture-group-3-5-days");
    }

    #[test]
    fn test_embedded_library_is_valid() {
        let catalog = Catalog::embedded().unwrap();
        let library = ItineraryLibrary::embedded(&catalog).unwrap();
        assert_eq!(library.len(), 4);
    }

    #[test]
    fn test_exact_match_only() {
        let catalog = Catalog::embedded().unwrap();
        let library = ItineraryLibrary::embedded(&catalog).unwrap();

        let hit = library.lookup("wildlife-family-week").unwrap();
        assert_eq!(hit.summary.total_days, 7);

        assert!(library.lookup("wildlife-family").is_none());
        assert!(library.lookup("Wildlife-Family-Week").is_none());
        assert!(library.lookup("wildlife-family-one-week").is_none());
    }

    #[test]
    fn test_stats_tracking() {
        let catalog = Catalog::embedded().unwrap();
        let library = ItineraryLibrary::embedded(&catalog).unwrap();

        library.lookup("missing");
        library.lookup("adventure-solo-weekend");
        library.lookup("adventure-solo-weekend");

        let stats = library.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert!((stats.hit_rate - 66.666).abs() < 1.0);
    }

    #[test]
    fn test_library_with_dangling_id_rejected() {
        let catalog = Catalog::embedded().unwrap();
        let json = EMBEDDED_LIBRARY.replace("\"sipi-falls\"", "\"mount-doom\"");
        assert!(matches!(
            ItineraryLibrary::from_json_str(&json, &catalog),
            Err(CatalogError::Invalid(_))
        ));
    }
}
