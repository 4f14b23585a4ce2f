//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! Sólo `GEO_ROTA_API_URL` es obligatoria; el resto tiene valores por defecto.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::utils::errors::{AppError, AppResult};

pub const DEFAULT_OSRM_URL: &str = "https://router.project-osrm.org";
pub const DEFAULT_STORAGE_DIR: &str = ".geo-rota";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_NOTIFICATION_MS: i64 = 4000;

/// Configuración del entorno
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub api_base_url: String,
    pub osrm_base_url: String,
    pub storage_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub notification_duration_ms: i64,
}

impl EnvironmentConfig {
    /// Leer la configuración desde el proceso (después de `dotenvy`)
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Leer la configuración desde cualquier fuente clave/valor
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_base_url = read("GEO_ROTA_API_URL")
            .ok_or_else(|| AppError::Config("GEO_ROTA_API_URL must be set".to_string()))?;

        let request_timeout_secs = match read("GEO_ROTA_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.parse().map_err(|_| {
                AppError::Config(format!("GEO_ROTA_REQUEST_TIMEOUT_SECS must be a valid number: {}", raw))
            })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let notification_duration_ms = match read("GEO_ROTA_NOTIFICATION_MS") {
            Some(raw) => raw.parse().map_err(|_| {
                AppError::Config(format!("GEO_ROTA_NOTIFICATION_MS must be a valid number: {}", raw))
            })?,
            None => DEFAULT_NOTIFICATION_MS,
        };

        Ok(Self {
            environment: read("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            api_base_url: trim_trailing_slash(&api_base_url),
            osrm_base_url: trim_trailing_slash(&read("GEO_ROTA_OSRM_URL").unwrap_or_else(|| DEFAULT_OSRM_URL.to_string())),
            storage_dir: read("GEO_ROTA_STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR)),
            request_timeout_secs,
            notification_duration_ms,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn trim_trailing_slash(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
