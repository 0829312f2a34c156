use crate::error::{AppError, Result};
use crate::models::{BudgetInputs, BudgetResult};
use crate::services::budget::calculate_budget;
use axum::{body::Bytes, Json};

/// POST /budget
pub async fn estimate_budget(body: Bytes) -> Result<Json<BudgetResult>> {
    let inputs = BudgetInputs::from_slice(&body).map_err(AppError::InvalidRequest)?;

    tracing::info!(
        travelers = inputs.travelers,
        days = inputs.duration_days,
        activities = inputs.selected_activities.len(),
        "Budget estimate: {} travelers, {} days",
        inputs.travelers,
        inputs.duration_days
    );

    Ok(Json(calculate_budget(&inputs)))
}
