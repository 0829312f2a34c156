use crate::error::Result;
use crate::models::PlanResponse;
use crate::AppState;
use axum::{body::Bytes, extract::State, Json};
use std::sync::Arc;

/// POST /itinerary
/// Rank the catalog for the submitted quiz answers and build an itinerary.
/// The body is taken as raw bytes so malformed input surfaces as a 400 with
/// the offending JSON path.
pub async fn create_itinerary(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<PlanResponse>> {
    tracing::debug!(bytes = body.len(), "Itinerary request received");

    let response = state.planner.plan(&body).await?;
    Ok(Json(response))
}
