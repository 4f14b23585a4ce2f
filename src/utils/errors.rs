//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del cliente y la
//! decodificación de los cuerpos de error que devuelve la API de Geo-Rota.

use http::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::models::route::SugestaoVeiculoExtra;

/// Errores principales del cliente
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unauthorized: session expired or invalid")]
    Unauthorized,

    #[error("API error ({status}): {message}")]
    Api {
        status: StatusCode,
        message: String,
        suggestions: Vec<SugestaoVeiculoExtra>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("{0}")]
    Authentication(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Action already in progress: {0}")]
    ActionInFlight(&'static str),

    #[error("No route selected")]
    NoSelection,

    #[error("Directions error: {0}")]
    Directions(String),
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Mensaje legible que el servidor devolvió, si lo hay
    pub fn server_message(&self) -> Option<&str> {
        match self {
            AppError::Api { message, .. } if !message.trim().is_empty() => Some(message.as_str()),
            _ => None,
        }
    }

    /// Sugerencias de vehículos extra devueltas junto al error
    pub fn suggestions(&self) -> &[SugestaoVeiculoExtra] {
        match self {
            AppError::Api { suggestions, .. } => suggestions,
            _ => &[],
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AppError::Api { status, .. } => Some(*status),
            AppError::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            _ => None,
        }
    }
}

/// Construir un `AppError::Api` a partir del cuerpo de una respuesta fallida.
///
/// El backend responde con `{detail}` (FastAPI), con `{mensagem, sugestoes}`
/// en la generación de rutas (suelto o anidado dentro de `detail`), o con un
/// string JSON plano.
pub fn api_error_from_body(status: StatusCode, body: &str) -> AppError {
    let mut message = String::new();
    let mut suggestions = Vec::new();

    match serde_json::from_str::<Value>(body) {
        Ok(Value::String(text)) => message = text,
        Ok(Value::Object(map)) => {
            let nested = match map.get("detail") {
                Some(Value::Object(detail)) => Some(detail),
                _ => None,
            };
            let field = |key: &str| map.get(key).or_else(|| nested.and_then(|detail| detail.get(key)));

            if let Some(Value::String(text)) = field("mensagem") {
                message = text.clone();
            } else if let Some(Value::String(text)) = map.get("detail") {
                message = text.clone();
            }
            if let Some(raw) = field("sugestoes") {
                suggestions = serde_json::from_value(raw.clone()).unwrap_or_default();
            }
        }
        _ => {}
    }

    AppError::Api {
        status,
        message,
        suggestions,
    }
}

/// Función helper para crear errores de validación de un campo
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new("custom");
    error.message = Some(message.into());
    error.add_param("field".into(), &field);

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

/// Función helper para errores de decodificación
pub fn decode_error(context: &str, err: impl std::fmt::Display) -> AppError {
    AppError::Decode(format!("{}: {}", context, err))
}
