use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::environment::EnvironmentConfig;
use crate::utils::errors::{AppError, AppResult};

pub const ADMIN_ROLE: &str = "admin";

/// Claims del JWT de administrador
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JwtClaims {
    pub sub: String, // email del administrador
    pub role: String,
    pub jti: String,
    pub exp: i64, // expiration timestamp
    pub iat: i64, // issued at timestamp
}

/// Servicio JWT
#[derive(Clone)]
pub struct JwtService {
    algorithm: Algorithm,
    access_token_duration: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(secret: &str, access_token_duration: Duration) -> Self {
        Self {
            algorithm: Algorithm::HS256,
            access_token_duration,
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
        }
    }

    pub fn from_config(config: &EnvironmentConfig) -> Self {
        let ttl = Duration::try_hours(config.jwt_expiration_hours).unwrap_or_else(Duration::max_value);
        Self::new(&config.jwt_secret, ttl)
    }

    /// Genera un token de acceso para el administrador
    pub fn generate_access_token(&self, email: &str) -> AppResult<(String, DateTime<Utc>)> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(self.access_token_duration)
            .ok_or_else(|| AppError::Internal("Access token expiration is out of range".to_string()))?;

        let claims = JwtClaims {
            sub: email.to_string(),
            role: ADMIN_ROLE.to_string(),
            jti: Uuid::new_v4().to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Error generating access token: {}", e)))?;
        Ok((token, exp))
    }

    /// Valida y decodifica un token; exige rol de administrador
    pub fn validate_token(&self, token: &str) -> AppResult<JwtClaims> {
        let validation = Validation::new(self.algorithm);

        let claims = decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;

        if claims.role != ADMIN_ROLE {
            return Err(AppError::Unauthorized("Token does not grant admin access".to_string()));
        }
        Ok(claims)
    }
}
