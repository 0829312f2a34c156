pub mod budget;
pub mod coordinates;
pub mod destination;
pub mod itinerary;
pub mod quiz;

pub use budget::{AccommodationTier, BudgetBreakdown, BudgetInputs, BudgetResult, TransportMode};
pub use coordinates::Coordinates;
pub use destination::{
    Activity, CostRange, DailyBudget, DayRange, Destination, DestinationCategory, PriceBand,
    Region, TransportInfo,
};
pub use itinerary::{
    AlternativeKind, AlternativeSuggestion, Itinerary, ItineraryDay, ItinerarySource,
    PlanResponse, PlannedItinerary, RankedDestinationSummary, TripSummary, UsdRange,
};
pub use quiz::{
    BudgetStyle, GroupType, PlanRequest, QuizAnswers, TravelInterest, TravelStyle,
    TravelerOrigin, TripDuration,
};
