use std::sync::Arc;

use tracing::{info, warn};
use validator::ValidationErrors;

use crate::config::EnvironmentConfig;
use crate::dto::auth_dto::{AdminInfo, LoginRequest, LoginResponse};
use crate::dto::ApiResponse;
use crate::services::jwt_service::ADMIN_ROLE;
use crate::services::JwtService;
use crate::utils::errors::{field_error, AppError};

const LOGIN_FIELDS: [&str; 2] = ["email", "password"];

pub struct AuthController {
    config: Arc<EnvironmentConfig>,
    jwt: JwtService,
}

impl AuthController {
    pub fn new(config: Arc<EnvironmentConfig>, jwt: JwtService) -> Self {
        Self { config, jwt }
    }

    /// Login del administrador contra las credenciales configuradas
    pub async fn login(&self, request: LoginRequest) -> Result<ApiResponse<LoginResponse>, AppError> {
        let mut errors = ValidationErrors::new();
        if request.email.trim().is_empty() {
            errors.add("email", field_error("required", "The email field is required."));
        }
        if request.password.is_empty() {
            errors.add("password", field_error("required", "The password field is required."));
        }
        if !errors.is_empty() {
            return Err(AppError::validation(errors, &LOGIN_FIELDS));
        }

        let email = request.email.trim();
        if !self.credentials_match(email, &request.password)? {
            warn!(email, "❌ Login rechazado");
            return Err(AppError::Unauthorized("Invalid login credentials".to_string()));
        }

        let (token, expires_at) = self.jwt.generate_access_token(&self.config.admin_email)?;
        info!(email, "🔑 Admin login");

        Ok(ApiResponse::success_with_message(
            LoginResponse {
                token,
                token_type: "Bearer".to_string(),
                expires_at,
                admin: AdminInfo {
                    email: self.config.admin_email.clone(),
                    role: ADMIN_ROLE.to_string(),
                },
            },
            "Login successful".to_string(),
        ))
    }

    /// Logout sin estado: el token sigue siendo válido hasta su `exp`,
    /// el cliente es quien lo descarta
    pub fn logout(&self, admin: &AdminInfo) -> ApiResponse<()> {
        info!(email = %admin.email, "🚪 Admin logout");
        ApiResponse::message("Logged out successfully".to_string())
    }

    fn credentials_match(&self, email: &str, password: &str) -> Result<bool, AppError> {
        if self.config.admin_password_hash.is_empty() {
            warn!("⚠️ ADMIN_PASSWORD_HASH no configurado; login deshabilitado");
            return Ok(false);
        }
        if !email.eq_ignore_ascii_case(&self.config.admin_email) {
            return Ok(false);
        }
        bcrypt::verify(password, &self.config.admin_password_hash)
            .map_err(|e| AppError::Internal(format!("Invalid admin password hash: {}", e)))
    }
}
