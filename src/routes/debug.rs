use crate::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

/// GET /debug/health - Report what the planner is working with
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let library = state.library.stats();

    Json(json!({
        "status": "ok",
        "checks": {
            "catalog_destinations": state.planner.catalog().len(),
            "cached_itineraries": library,
            "generative_enabled": state.generative_enabled,
            "rate_limit": {
                "max_requests": state.limiter.max_requests(),
                "window_secs": state.limiter.window().as_secs(),
            },
        }
    }))
}
