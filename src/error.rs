use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Application-level failures surfaced to clients.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed")]
    Validation(Vec<String>),

    #[error("User with this email already exists")]
    DuplicateEmail,

    #[error("No such user!")]
    UserNotFound,

    #[error("{0}")]
    Unauthorized(String),

    #[error("Access forbidden!")]
    Forbidden,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn unauthorized() -> Self {
        Self::Unauthorized("User is not authorized!".into())
    }

    pub fn invalid_password() -> Self {
        Self::Unauthorized("Invalid password!".into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::DuplicateEmail => StatusCode::BAD_REQUEST,
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        Self::Internal(e.into())
    }
}

/// Wire shape: `message` is a string, except for validation failures
/// where it is an array of per-field complaints.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    #[serde(rename = "statusCode")]
    status_code: u16,
    message: ErrorMessage,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            Self::Validation(complaints) => ErrorMessage::Many(complaints),
            Self::Internal(e) => {
                error!(error = %e, "internal error");
                ErrorMessage::One("Internal server error".into())
            }
            other => ErrorMessage::One(other.to_string()),
        };
        let body = ErrorBody {
            status_code: status.as_u16(),
            message,
        };
        (status, Json(body)).into_response()
    }
}
