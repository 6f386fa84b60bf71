use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::dashboard_controller::DashboardController;
use crate::dto::ApiResponse;
use crate::models::dashboard::DashboardSummary;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn dashboard_router() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard))
}

async fn get_dashboard(State(state): State<AppState>) -> Result<Json<ApiResponse<DashboardSummary>>, AppError> {
    let response = DashboardController::new(state.bookings.clone()).summary().await?;
    Ok(Json(response))
}
