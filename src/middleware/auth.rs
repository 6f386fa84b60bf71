//! Middleware de autenticación JWT
//!
//! Protege las rutas de administración: exige `Authorization: Bearer <token>`
//! firmado por este servidor e inyecta el administrador en las extensions.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::dto::auth_dto::AdminInfo;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Middleware de autenticación JWT para administradores
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&request)
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let claims = state.jwt.validate_token(token)?;
    debug!(admin = %claims.sub, "admin request authenticated");

    request.extensions_mut().insert(AdminInfo {
        email: claims.sub,
        role: claims.role,
    });

    Ok(next.run(request).await)
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
