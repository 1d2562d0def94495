use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Classification of a failed fetch against the plant data service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport failure: host unreachable, DNS, connection refused, timeout.
    Unreachable,
    /// The service answered with a non-success status code.
    BadResponse(u16),
    /// The body could not be parsed into a sequence of readings.
    MalformedPayload,
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct FetchError {
    kind: ErrorKind,
    message: String,
}

impl FetchError {
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Unreachable,
            message: message.into(),
        }
    }

    pub fn bad_response(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::BadResponse(status),
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::MalformedPayload,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    ViewClosed(#[from] crate::view::ViewClosed),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::ViewClosed(e) => {
                tracing::error!("View runtime error: {e}");
                (StatusCode::SERVICE_UNAVAILABLE, e.to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
