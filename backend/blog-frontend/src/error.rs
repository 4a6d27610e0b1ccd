/// Error types for the blog frontend
///
/// `ApiError` is the single shape every backend call fails with. `AppError`
/// is what page handlers return; it renders as an HTML error page.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

use crate::render;

/// Result type for page handlers
pub type Result<T> = std::result::Result<T, AppError>;

/// Normalized failure of a call to the backend API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Backend answered with a non-2xx status
    #[error("{message}")]
    Status { status: u16, message: String },

    /// DNS failure, refused connection, reset
    #[error("Connection failed - please check your connection")]
    Connection(#[source] reqwest::Error),

    /// No response within the configured timeout
    #[error("Request timed out")]
    Timeout(#[source] reqwest::Error),

    /// 2xx response whose body did not match the expected shape
    #[error("Unexpected response from server (HTTP {status})")]
    InvalidResponse { status: u16 },
}

impl ApiError {
    /// HTTP status carried by the error; 0 for transport failures.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Status { status, .. } | ApiError::InvalidResponse { status } => *status,
            ApiError::Connection(_) | ApiError::Timeout(_) => 0,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == 404
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Connection(_) | ApiError::Timeout(_))
    }

    /// Backend-supplied message, if the backend rejected the call.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => Some(message),
            _ => None,
        }
    }

    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(err)
        } else {
            ApiError::Connection(err)
        }
    }
}

/// Page-level error
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Page not found")]
    NotFound,

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Api(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            AppError::Api(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let page = if status == StatusCode::NOT_FOUND {
            render::pages::not_found()
        } else {
            render::pages::unavailable(&self.to_string())
        };

        HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(page.into_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_carries_status_and_message() {
        let err = ApiError::Status {
            status: 404,
            message: "Blog not found".to_string(),
        };
        assert_eq!(err.status(), 404);
        assert!(err.is_not_found());
        assert!(!err.is_transport());
        assert_eq!(err.detail(), Some("Blog not found"));
        assert_eq!(err.to_string(), "Blog not found");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(AppError::NotFound.status_code(), StatusCode::NOT_FOUND);

        let missing = AppError::from(ApiError::Status {
            status: 404,
            message: "gone".to_string(),
        });
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

        let broken = AppError::from(ApiError::Status {
            status: 500,
            message: "boom".to_string(),
        });
        assert_eq!(broken.status_code(), StatusCode::BAD_GATEWAY);
    }
}
