use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::verification::{GatewayError, ResolveError, VerificationError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Json(serde_json::Error),
    InvalidOverride(String),
    Resolve(ResolveError),
    Verification(VerificationError),
    Gateway(GatewayError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Json(err) => write!(f, "invalid json: {}", err),
            AppError::InvalidOverride(raw) => {
                write!(f, "override '{}' must look like Field.Path=value", raw)
            }
            AppError::Resolve(err) => write!(f, "field resolution error: {}", err),
            AppError::Verification(err) => write!(f, "verification error: {}", err),
            AppError::Gateway(err) => write!(f, "gateway error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Json(err) => Some(err),
            AppError::InvalidOverride(_) => None,
            AppError::Resolve(err) => Some(err),
            AppError::Verification(err) => Some(err),
            AppError::Gateway(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Json(_) | AppError::InvalidOverride(_) => StatusCode::BAD_REQUEST,
            AppError::Resolve(_)
            | AppError::Verification(VerificationError::Resolve(_))
            | AppError::Verification(VerificationError::Rejected { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Gateway(_) | AppError::Verification(VerificationError::Gateway(_)) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Config(_) | AppError::Telemetry(_) | AppError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = match self {
            AppError::Verification(VerificationError::Rejected { band_text, score }) => json!({
                "error": "identity verification failed",
                "band_text": band_text,
                "score": score,
            }),
            AppError::Resolve(err) | AppError::Verification(VerificationError::Resolve(err)) => {
                json!({ "error": err.to_string() })
            }
            other => json!({ "error": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<ResolveError> for AppError {
    fn from(value: ResolveError) -> Self {
        Self::Resolve(value)
    }
}

impl From<VerificationError> for AppError {
    fn from(value: VerificationError) -> Self {
        Self::Verification(value)
    }
}

impl From<GatewayError> for AppError {
    fn from(value: GatewayError) -> Self {
        Self::Gateway(value)
    }
}
