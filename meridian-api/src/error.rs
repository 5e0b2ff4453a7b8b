use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use meridian_exam::{AccountError, AttemptError, AuthoringError};
use meridian_reservation::models::ValidationError;
use meridian_reservation::ReservationError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    AuthorizationError(String),
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
    InternalServerError(String),
    Anyhow(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::AuthorizationError(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Anyhow(err)
    }
}

impl From<ReservationError> for AppError {
    fn from(err: ReservationError) -> Self {
        match err {
            ReservationError::FlightNotFound(_) | ReservationError::ReservationNotFound(_) => {
                Self::NotFoundError(err.to_string())
            }
            ReservationError::AlreadyCancelled(_) => Self::ConflictError(err.to_string()),
            ReservationError::Validation(_) => Self::ValidationError(err.to_string()),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::InvalidCredentials => Self::AuthenticationError(err.to_string()),
            AccountError::EmailTaken(_) => Self::ConflictError(err.to_string()),
            AccountError::MissingFields => Self::ValidationError(err.to_string()),
        }
    }
}

impl From<AuthoringError> for AppError {
    fn from(err: AuthoringError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<AttemptError> for AppError {
    fn from(err: AttemptError) -> Self {
        match err {
            AttemptError::UnknownQuestion(_) => Self::NotFoundError(err.to_string()),
            AttemptError::AlreadyStarted | AttemptError::AlreadySubmitted => {
                Self::ConflictError(err.to_string())
            }
            AttemptError::NotInProgress | AttemptError::OptionOutOfRange { .. } => {
                Self::ValidationError(err.to_string())
            }
        }
    }
}
