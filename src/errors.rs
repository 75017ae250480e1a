use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::notion::{NotionError, NotionErrorCode};

/// Error envelope returned for every failed request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub has_error: bool,
    pub status_code: u16,
    pub message: String,
    pub details: String,
}

/// Unified error type for validators, repositories, services and handlers.
///
/// Every variant carries a user-facing message and a details string; the
/// mapping to HTTP status codes lives in [`ServiceError::status_code`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum ServiceError {
    #[error("{message}")]
    Validation { message: String, details: String },

    #[error("{message}")]
    NotFound { message: String, details: String },

    #[error("{message}")]
    Conflict { message: String, details: String },

    #[error("{message}")]
    Unauthorized { message: String, details: String },

    #[error("{message}")]
    RateLimited { message: String, details: String },

    #[error("{message}")]
    UpstreamInternal { message: String, details: String },

    #[error("{message}")]
    UpstreamUnavailable { message: String, details: String },

    #[error("{message}")]
    UpstreamTimeout { message: String, details: String },

    #[error("{message}")]
    Internal { message: String, details: String },
}

impl ServiceError {
    pub fn validation(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            details: details.into(),
        }
    }

    pub fn not_found(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            details: details.into(),
        }
    }

    pub fn conflict(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
            details: details.into(),
        }
    }

    pub fn internal(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            details: details.into(),
        }
    }

    /// Returns the HTTP status code for this error.
    /// This is the single source of truth for error-to-status mapping.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::UpstreamInternal { .. } => StatusCode::BAD_GATEWAY,
            Self::UpstreamUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::UpstreamTimeout { .. } => StatusCode::REQUEST_TIMEOUT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message, .. }
            | Self::NotFound { message, .. }
            | Self::Conflict { message, .. }
            | Self::Unauthorized { message, .. }
            | Self::RateLimited { message, .. }
            | Self::UpstreamInternal { message, .. }
            | Self::UpstreamUnavailable { message, .. }
            | Self::UpstreamTimeout { message, .. }
            | Self::Internal { message, .. } => message,
        }
    }

    pub fn details(&self) -> &str {
        match self {
            Self::Validation { details, .. }
            | Self::NotFound { details, .. }
            | Self::Conflict { details, .. }
            | Self::Unauthorized { details, .. }
            | Self::RateLimited { details, .. }
            | Self::UpstreamInternal { details, .. }
            | Self::UpstreamUnavailable { details, .. }
            | Self::UpstreamTimeout { details, .. }
            | Self::Internal { details, .. } => details,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            has_error: true,
            status_code: status.as_u16(),
            message: self.message().to_string(),
            details: self.details().to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Translates a Notion API error into the service taxonomy.
///
/// The caller-supplied `context` describes the operation that failed and
/// becomes the `details` string of the resulting error.
pub fn map_notion_error(error: NotionError, context: &str) -> ServiceError {
    let details = context.to_string();

    match error {
        NotionError::Api { code, .. } => match code {
            NotionErrorCode::ObjectNotFound => ServiceError::NotFound {
                message: format!("{context} no encontrado"),
                details,
            },
            NotionErrorCode::Unauthorized => ServiceError::Unauthorized {
                message: "Token de Notion inválido".to_string(),
                details,
            },
            NotionErrorCode::ValidationError
            | NotionErrorCode::InvalidRequest
            | NotionErrorCode::InvalidJson => ServiceError::Validation {
                message: "Datos inválidos".to_string(),
                details,
            },
            NotionErrorCode::RateLimited => ServiceError::RateLimited {
                message: "Límite de requests excedido".to_string(),
                details,
            },
            NotionErrorCode::InternalServerError => ServiceError::UpstreamInternal {
                message: "Error interno de Notion".to_string(),
                details,
            },
            NotionErrorCode::ServiceUnavailable => ServiceError::UpstreamUnavailable {
                message: "Servicio de Notion no disponible".to_string(),
                details,
            },
            NotionErrorCode::Unknown => ServiceError::Internal {
                message: "Error desconocido".to_string(),
                details,
            },
        },
        NotionError::Timeout => ServiceError::UpstreamTimeout {
            message: "Timeout de conexión".to_string(),
            details,
        },
        NotionError::Transport(_) | NotionError::Decode(_) => ServiceError::Internal {
            message: "Error desconocido".to_string(),
            details,
        },
    }
}
