use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};

use crate::controllers::motorcycle_controller::MotorcycleController;
use crate::dto::ApiResponse;
use crate::models::motorcycle::{CreateMotorcycleRequest, Motorcycle, UpdateMotorcycleRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Catálogo público
pub fn public_motorcycle_router() -> Router<AppState> {
    Router::new()
        .route("/motorcycles", get(list_motorcycles))
        .route("/motorcycles/:id", get(get_motorcycle))
}

/// Gestión del catálogo (solo administradores)
pub fn admin_motorcycle_router() -> Router<AppState> {
    Router::new()
        .route("/motorcycles", post(create_motorcycle))
        .route("/motorcycles/:id", put(update_motorcycle).delete(delete_motorcycle))
}

fn controller(state: &AppState) -> MotorcycleController {
    MotorcycleController::new(state.motorcycles.clone())
}

async fn list_motorcycles(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Motorcycle>>>, AppError> {
    let response = controller(&state).list().await?;
    Ok(Json(response))
}

async fn get_motorcycle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Motorcycle>>, AppError> {
    let response = controller(&state).get_by_id(id).await?;
    Ok(Json(response))
}

async fn create_motorcycle(
    State(state): State<AppState>,
    Json(request): Json<CreateMotorcycleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Motorcycle>>), AppError> {
    let response = controller(&state).create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_motorcycle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateMotorcycleRequest>,
) -> Result<Json<ApiResponse<Motorcycle>>, AppError> {
    let response = controller(&state).update(id, request).await?;
    Ok(Json(response))
}

async fn delete_motorcycle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let response = controller(&state).delete(id).await?;
    Ok(Json(response))
}
