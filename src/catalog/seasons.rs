use crate::models::Destination;
use serde::Serialize;

/// Uganda has two dry seasons (Jun-Sep, Dec-Feb) and two wet seasons
/// (Mar-May, Oct-Nov). March is treated as a transitional month.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SeasonKind {
    Dry,
    PeakWet,
    Transitional,
}

const DRY_MONTHS: [u8; 7] = [1, 2, 6, 7, 8, 9, 12];
const PEAK_WET_MONTHS: [u8; 4] = [4, 5, 10, 11];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn season_for_month(month: u8) -> SeasonKind {
    if DRY_MONTHS.contains(&month) {
        SeasonKind::Dry
    } else if PEAK_WET_MONTHS.contains(&month) {
        SeasonKind::PeakWet
    } else {
        SeasonKind::Transitional
    }
}

pub fn month_name(month: u8) -> &'static str {
    match month {
        1..=12 => MONTH_NAMES[usize::from(month) - 1],
        _ => "Unknown",
    }
}

/// One month of a destination's season calendar. Scores are 1-5.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub month: u8,
    pub kind: SeasonKind,
    pub weather_score: u8,
    pub wildlife_score: u8,
    pub crowd_level: u8,
    pub recommended: bool,
    pub notes: &'static str,
}

struct SeasonOverride {
    destination_id: &'static str,
    month: u8,
    notes: &'static str,
    weather_score: Option<u8>,
    wildlife_score: Option<u8>,
    crowd_level: Option<u8>,
}

const OVERRIDES: &[SeasonOverride] = &[
    SeasonOverride {
        destination_id: "bwindi-impenetrable",
        month: 3,
        notes: "Shoulder season: lower permit demand, occasional rain",
        weather_score: None,
        wildlife_score: None,
        crowd_level: Some(2),
    },
    SeasonOverride {
        destination_id: "bwindi-impenetrable",
        month: 6,
        notes: "Peak gorilla trekking season: book permits early",
        weather_score: None,
        wildlife_score: None,
        crowd_level: Some(5),
    },
    SeasonOverride {
        destination_id: "bwindi-impenetrable",
        month: 7,
        notes: "Peak gorilla trekking season: excellent conditions",
        weather_score: None,
        wildlife_score: None,
        crowd_level: Some(5),
    },
    SeasonOverride {
        destination_id: "bwindi-impenetrable",
        month: 8,
        notes: "Peak gorilla trekking season: dry trails",
        weather_score: None,
        wildlife_score: None,
        crowd_level: Some(5),
    },
    SeasonOverride {
        destination_id: "jinja",
        month: 1,
        notes: "Great rafting conditions year-round",
        weather_score: Some(4),
        wildlife_score: None,
        crowd_level: None,
    },
    SeasonOverride {
        destination_id: "jinja",
        month: 4,
        notes: "Slightly higher water levels make for exciting rapids",
        weather_score: Some(3),
        wildlife_score: None,
        crowd_level: None,
    },
    SeasonOverride {
        destination_id: "kidepo-valley",
        month: 1,
        notes: "Peak dry season: best wildlife viewing",
        weather_score: Some(5),
        wildlife_score: Some(5),
        crowd_level: None,
    },
    SeasonOverride {
        destination_id: "kidepo-valley",
        month: 2,
        notes: "Peak dry season: outstanding conditions",
        weather_score: Some(5),
        wildlife_score: Some(5),
        crowd_level: None,
    },
    SeasonOverride {
        destination_id: "kidepo-valley",
        month: 11,
        notes: "Dry season in Kidepo: wildlife concentrates at water",
        weather_score: Some(4),
        wildlife_score: Some(5),
        crowd_level: None,
    },
    SeasonOverride {
        destination_id: "kidepo-valley",
        month: 12,
        notes: "Excellent game viewing: dry and wildlife-rich",
        weather_score: Some(4),
        wildlife_score: Some(5),
        crowd_level: None,
    },
];

fn default_season(month: u8, recommended: bool) -> Season {
    let kind = season_for_month(month);
    let (weather_score, wildlife_score, notes) = match kind {
        SeasonKind::Dry => (4, 4, "Dry season: good conditions for most activities"),
        SeasonKind::PeakWet => (
            2,
            3,
            "Rainy season: some roads may be difficult, fewer crowds",
        ),
        SeasonKind::Transitional => (
            3,
            3,
            "Transitional season: occasional rain, moderate conditions",
        ),
    };
    let crowd_level = match (kind, recommended) {
        (SeasonKind::Dry, true) => 4,
        (SeasonKind::Dry, false) => 3,
        _ => 2,
    };

    Season {
        month,
        kind,
        weather_score,
        wildlife_score,
        crowd_level,
        recommended,
        notes,
    }
}

/// Season entry for one destination and month, with any
/// destination-specific override applied.
pub fn season_for(destination: &Destination, month: u8) -> Season {
    let mut season = default_season(month, destination.is_best_month(month));

    if let Some(o) = OVERRIDES
        .iter()
        .find(|o| o.destination_id == destination.id && o.month == month)
    {
        season.notes = o.notes;
        if let Some(v) = o.weather_score {
            season.weather_score = v;
        }
        if let Some(v) = o.wildlife_score {
            season.wildlife_score = v;
        }
        if let Some(v) = o.crowd_level {
            season.crowd_level = v;
        }
    }

    season
}

/// Twelve-month calendar for a destination.
pub fn season_calendar(destination: &Destination) -> Vec<Season> {
    (1..=12).map(|m| season_for(destination, m)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_season_classification() {
        assert_eq!(season_for_month(7), SeasonKind::Dry);
        assert_eq!(season_for_month(12), SeasonKind::Dry);
        assert_eq!(season_for_month(4), SeasonKind::PeakWet);
        assert_eq!(season_for_month(11), SeasonKind::PeakWet);
        assert_eq!(season_for_month(3), SeasonKind::Transitional);
    }

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(13), "Unknown");
    }

    #[test]
    fn test_calendar_applies_overrides() {
        let catalog = Catalog::embedded().unwrap();
        let bwindi = catalog.get("bwindi-impenetrable").unwrap();
        let calendar = season_calendar(bwindi);

        assert_eq!(calendar.len(), 12);
        let july = &calendar[6];
        assert_eq!(july.month, 7);
        assert!(july.recommended);
        assert_eq!(july.crowd_level, 5);
        assert!(july.notes.contains("Peak gorilla"));

        let april = &calendar[3];
        assert!(!april.recommended);
        assert_eq!(april.kind, SeasonKind::PeakWet);
        assert_eq!(april.weather_score, 2);
    }

    #[test]
    fn test_default_crowd_levels() {
        let catalog = Catalog::embedded().unwrap();
        let sipi = catalog.get("sipi-falls").unwrap();
        assert_eq!(season_for(sipi, 1).crowd_level, 4);
        assert_eq!(season_for(sipi, 9).crowd_level, 3);
        assert_eq!(season_for(sipi, 10).crowd_level, 2);
    }
}
