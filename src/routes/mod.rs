pub mod budget;
pub mod debug;
pub mod destinations;
pub mod itinerary;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::rate_limit::rate_limit;
use crate::AppState;

/// Only itinerary planning is rate limited; it is the route that calls out
/// to the generative service.
pub fn create_router(state: Arc<AppState>) -> Router {
    let planning = Router::new()
        .route("/itinerary", post(itinerary::create_itinerary))
        .route_layer(middleware::from_fn_with_state(
            state.limiter.clone(),
            rate_limit,
        ));

    Router::new()
        .merge(planning)
        .route("/budget", post(budget::estimate_budget))
        .route(
            "/destinations/{id}/seasons",
            get(destinations::season_calendar),
        )
        .route("/debug/health", get(debug::health_check))
        .with_state(state)
}
