//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use chrono::{Duration, Utc};

const DEVELOPMENT_JWT_SECRET: &str = "development-only-jwt-secret-change-me";

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub cors_origins: Vec<String>,
    pub admin_email: String,
    pub admin_password_hash: String,
    pub pending_expiry_hours: Option<i64>,
    pub expiry_sweep_interval_secs: u64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 8000,
            host: "0.0.0.0".to_string(),
            jwt_secret: DEVELOPMENT_JWT_SECRET.to_string(),
            jwt_expiration_hours: 24,
            cors_origins: Vec::new(),
            admin_email: "admin@rental.com".to_string(),
            admin_password_hash: String::new(),
            pending_expiry_hours: None,
            expiry_sweep_interval_secs: 300,
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración de las variables de entorno
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let environment = env::var("ENVIRONMENT").unwrap_or(defaults.environment);

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if environment == "development" => defaults.jwt_secret,
            _ => bail!("JWT_SECRET must be set outside development"),
        };

        let config = Self {
            port: parse_var("PORT")?.unwrap_or(defaults.port),
            host: env::var("HOST").unwrap_or(defaults.host),
            jwt_secret,
            jwt_expiration_hours: parse_var("JWT_EXPIRATION_HOURS")?.unwrap_or(defaults.jwt_expiration_hours),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            admin_email: env::var("ADMIN_EMAIL").unwrap_or(defaults.admin_email),
            admin_password_hash: env::var("ADMIN_PASSWORD_HASH").unwrap_or_default(),
            pending_expiry_hours: parse_var("PENDING_EXPIRY_HOURS")?,
            expiry_sweep_interval_secs: parse_var("EXPIRY_SWEEP_INTERVAL_SECS")?
                .unwrap_or(defaults.expiry_sweep_interval_secs),
            environment,
        };

        config.validate()?;
        Ok(config)
    }

    /// Rechazar valores numéricos que no se pueden usar como duraciones
    pub fn validate(&self) -> Result<()> {
        if self.jwt_expiration_hours <= 0 {
            bail!("JWT_EXPIRATION_HOURS must be a positive number of hours");
        }
        let token_ttl = Duration::try_hours(self.jwt_expiration_hours)
            .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some());
        if token_ttl.is_none() {
            bail!("JWT_EXPIRATION_HOURS is out of range");
        }

        if let Some(hours) = self.pending_expiry_hours {
            if hours <= 0 {
                bail!("PENDING_EXPIRY_HOURS must be a positive number of hours");
            }
            let pending_ttl = Duration::try_hours(hours)
                .filter(|ttl| Utc::now().checked_sub_signed(*ttl).is_some());
            if pending_ttl.is_none() {
                bail!("PENDING_EXPIRY_HOURS is out of range");
            }
        }

        if self.expiry_sweep_interval_secs == 0 {
            bail!("EXPIRY_SWEEP_INTERVAL_SECS must be greater than zero");
        }
        Ok(())
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{} must be a valid number", name)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EnvironmentConfig::default();
        assert!(config.is_development());
        assert!(!config.is_production());
        assert_eq!(config.server_url(), "0.0.0.0:8000");
        assert_eq!(config.pending_expiry_hours, None);
    }

    #[test]
    fn test_validate_rejects_out_of_range_hours() {
        assert!(EnvironmentConfig::default().validate().is_ok());

        let config = EnvironmentConfig {
            pending_expiry_hours: Some(10_000_000_000),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "PENDING_EXPIRY_HOURS is out of range");

        let config = EnvironmentConfig {
            jwt_expiration_hours: 10_000_000_000,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "JWT_EXPIRATION_HOURS is out of range");

        let config = EnvironmentConfig {
            jwt_expiration_hours: 0,
            pending_expiry_hours: Some(72),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        env::set_var("MOTOR_RENTAL_TEST_PORT", "eighty");
        assert!(parse_var::<u16>("MOTOR_RENTAL_TEST_PORT").is_err());

        env::set_var("MOTOR_RENTAL_TEST_PORT", "8080");
        assert_eq!(parse_var::<u16>("MOTOR_RENTAL_TEST_PORT").unwrap(), Some(8080));

        env::remove_var("MOTOR_RENTAL_TEST_PORT");
        assert_eq!(parse_var::<u16>("MOTOR_RENTAL_TEST_PORT").unwrap(), None);
    }
}
