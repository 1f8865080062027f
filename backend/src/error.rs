//! Error handling for the AgroSync server
//!
//! Provides consistent error responses in English and Spanish

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::CalculationError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_es: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Quality calculation errors
    #[error(transparent)]
    Calculation(#[from] CalculationError),

    // Business logic errors
    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationError(errors.to_string())
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_es: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    /// Status code and body for this error
    fn to_detail(&self) -> (StatusCode, ErrorDetail) {
        match self {
            AppError::Validation {
                field,
                message,
                message_es,
            } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: message.clone(),
                    message_es: message_es.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: msg.clone(),
                    message_es: format!("Datos inválidos: {}", msg),
                    field: None,
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message_en: format!("{} not found", resource),
                    message_es: format!("No se encontró {}", resource),
                    field: None,
                },
            ),
            AppError::Calculation(CalculationError::InvalidMeasurement { field, reason }) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "INVALID_MEASUREMENT".to_string(),
                    message_en: reason.clone(),
                    message_es: format!("Medición inválida: {}", reason),
                    field: Some(field.clone()),
                },
            ),
            AppError::Calculation(CalculationError::InvalidBasePrice(reason)) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "INVALID_BASE_PRICE".to_string(),
                    message_en: reason.clone(),
                    message_es: "El precio base no puede ser negativo".to_string(),
                    field: Some("base_price_per_kg".to_string()),
                },
            ),
            AppError::Calculation(CalculationError::UnknownQualityTier(name)) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "UNKNOWN_QUALITY_TIER".to_string(),
                    message_en: format!("Quality tier '{}' does not exist", name),
                    message_es: format!("La calidad '{}' no existe", name),
                    field: Some("quality".to_string()),
                },
            ),
            AppError::InvalidStateTransition(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "INVALID_STATE_TRANSITION".to_string(),
                    message_en: msg.clone(),
                    message_es: format!("No se puede cambiar el estado: {}", msg),
                    field: None,
                },
            ),
            AppError::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "DATABASE_ERROR".to_string(),
                    message_en: "A database error occurred".to_string(),
                    message_es: "Ocurrió un error en la base de datos".to_string(),
                    field: None,
                },
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: msg.clone(),
                    message_es: "Error interno del servidor".to_string(),
                    field: None,
                },
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = self.to_detail();

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurement_error_is_bad_request() {
        let err = AppError::from(CalculationError::invalid_measurement(
            "humidity_percent",
            "Percentage cannot exceed 100",
        ));
        let (status, detail) = err.to_detail();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(detail.code, "INVALID_MEASUREMENT");
        assert_eq!(detail.field.as_deref(), Some("humidity_percent"));
    }

    #[test]
    fn test_unknown_tier_is_not_found() {
        let err = AppError::from(CalculationError::UnknownQualityTier("Oro".to_string()));
        let (status, detail) = err.to_detail();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(detail.code, "UNKNOWN_QUALITY_TIER");
    }

    #[test]
    fn test_state_transition_is_unprocessable() {
        let err = AppError::InvalidStateTransition("already evaluated".to_string());
        assert_eq!(err.to_detail().0, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
