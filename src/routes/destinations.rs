use crate::catalog::{season_calendar as calendar_for, Season};
use crate::error::{AppError, Result};
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonCalendarResponse {
    pub destination_id: String,
    pub name: String,
    pub best_months: Vec<u8>,
    pub seasons: Vec<Season>,
}

/// GET /destinations/{id}/seasons
/// Month-by-month conditions for one destination.
pub async fn season_calendar(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SeasonCalendarResponse>> {
    let destination = state
        .planner
        .catalog()
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("Unknown destination '{}'", id)))?;

    Ok(Json(SeasonCalendarResponse {
        destination_id: destination.id.clone(),
        name: destination.name.clone(),
        best_months: destination.best_months.clone(),
        seasons: calendar_for(destination),
    }))
}
