use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{AdminInfo, LoginRequest, LoginResponse};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Configura la ruta pública de login
pub fn public_auth_router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Administrador autenticado
pub fn admin_auth_router() -> Router<AppState> {
    Router::new()
        .route("/user", get(current_admin))
        .route("/logout", post(logout))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let controller = AuthController::new(state.config.clone(), state.jwt.clone());
    let response = controller.login(request).await?;
    Ok(Json(response))
}

async fn current_admin(Extension(admin): Extension<AdminInfo>) -> Json<ApiResponse<AdminInfo>> {
    Json(ApiResponse::success(admin))
}

async fn logout(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminInfo>,
) -> Json<ApiResponse<()>> {
    let controller = AuthController::new(state.config.clone(), state.jwt.clone());
    Json(controller.logout(&admin))
}
