//! Stable application-wide constants.
//!
//! Values here are scoring coefficients, lookup tables and default fallbacks
//! for env-var-based configuration. They should rarely change.
//! For knobs of the generative service that benefit from runtime
//! experimentation, see [`GenerationConfig`](crate::config::GenerationConfig).

use crate::models::{BudgetStyle, GroupType, PriceBand, TripDuration};

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "3000";

// --- Planning defaults ---

/// Default shortlist length handed to the generative tier. Overridden by `RANK_LIMIT`.
pub const DEFAULT_RANK_LIMIT: usize = 7;
/// Default request budget per client and window. Overridden by `RATE_LIMIT_MAX_REQUESTS`.
pub const DEFAULT_RATE_LIMIT_MAX_REQUESTS: u32 = 5;
/// Default fixed rate-limit window. Overridden by `RATE_LIMIT_WINDOW_SECS`.
pub const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 60;

// --- Generative service defaults ---

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GEMINI_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_GEMINI_MAX_OUTPUT_TOKENS: u32 = 4096;
/// Hard ceiling on one generative call. The call is abandoned afterwards.
pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 30;

// --- Destination scoring weights (sum to 1.0) ---

pub const WEIGHT_TRAVELER_TYPE: f64 = 0.25;
pub const WEIGHT_BUDGET_FIT: f64 = 0.20;
pub const WEIGHT_DURATION_FIT: f64 = 0.15;
pub const WEIGHT_SEASON: f64 = 0.15;
pub const WEIGHT_INTERESTS: f64 = 0.15;
pub const WEIGHT_STYLE_ALIGNMENT: f64 = 0.10;

/// Budget-fit sub-score when the price band is outside the allowed set.
/// Not zero: an out-of-band destination stays visible, heavily penalized.
pub const BUDGET_MISMATCH_SCORE: f64 = 0.3;
/// Season sub-score when the traveler is flexible on dates.
pub const SEASON_FLEXIBLE_SCORE: f64 = 0.7;
pub const SEASON_OFF_SCORE: f64 = 0.4;
pub const DURATION_PARTIAL_SCORE: f64 = 0.5;
pub const DURATION_MISS_SCORE: f64 = 0.2;
pub const NEUTRAL_SUB_SCORE: f64 = 0.5;

// --- Free-text query boost ---

/// Floor applied when the query names a destination directly.
pub const QUERY_NAME_MATCH_FLOOR: u32 = 99;
/// Bonus applied when the query matches region or summary text.
pub const QUERY_CONTEXT_BONUS: u32 = 20;

// --- Rule-based generator ---

/// Never more than this many distinct stops, regardless of trip length.
pub const MAX_BACKBONE_STOPS: usize = 5;
pub const ACTIVITIES_PER_DAY: usize = 3;
pub const HIGHLIGHT_COUNT: usize = 3;
pub const SHORT_ALTERNATIVE_STOPS: usize = 2;

pub const BUDGET_ALTERNATIVE_MULTIPLIER: (f64, f64) = (0.6, 0.6);
pub const PREMIUM_ALTERNATIVE_MULTIPLIER: (f64, f64) = (2.0, 2.5);
pub const SHORT_ALTERNATIVE_MULTIPLIER: (f64, f64) = (0.4, 0.4);

/// Audience descriptors matched (case-insensitive substring) against a
/// destination's "best for" list.
pub fn traveler_keywords(group: GroupType) -> &'static [&'static str] {
    match group {
        GroupType::Solo => &[
            "adventure seekers",
            "backpackers",
            "photographers",
            "solo travelers",
        ],
        GroupType::Couple => &["couples", "relaxation seekers", "luxury travelers"],
        GroupType::Family => &["families", "first-time visitors", "family explorer"],
        GroupType::Friends => &["friend groups", "adventure seekers", "backpackers"],
        GroupType::Group => &["safari lovers", "cultural travelers", "group travelers"],
    }
}

/// Price bands a budget style accepts without penalty.
pub fn allowed_price_bands(style: BudgetStyle) -> &'static [PriceBand] {
    match style {
        BudgetStyle::Budget => &[PriceBand::Budget],
        BudgetStyle::MidRange => &[PriceBand::Budget, PriceBand::MidRange],
        BudgetStyle::Premium => &[PriceBand::MidRange, PriceBand::Premium],
        BudgetStyle::Luxury => &[PriceBand::Premium],
    }
}

/// Inclusive day range a duration bucket stands for when scoring.
pub fn trip_day_range(duration: TripDuration) -> (u32, u32) {
    match duration {
        TripDuration::Weekend => (1, 2),
        TripDuration::ThreeToFiveDays => (3, 5),
        TripDuration::OneWeek => (6, 8),
        TripDuration::TwoWeeks => (10, 14),
    }
}

/// Concrete day count used when composing an itinerary.
pub fn trip_total_days(duration: TripDuration) -> u32 {
    match duration {
        TripDuration::Weekend => 2,
        TripDuration::ThreeToFiveDays => 4,
        TripDuration::OneWeek => 7,
        TripDuration::TwoWeeks => 12,
    }
}
