use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
    pub admin: AdminInfo,
}

// Administrador autenticado
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AdminInfo {
    pub email: String,
    pub role: String,
}
