use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use std::fmt;

use crate::auth::identity::AuthError;
use crate::store::StoreError;

/// Error body of every JSON endpoint.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ApiErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug)]
pub enum AppError {
    Store(StoreError),
    Auth(AuthError),
    /// Authenticated, but the role may not use the console.
    Role(Option<String>),
    Validation(Vec<String>),
    Hash(String),
    NotFound,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Store(e) => write!(f, "{e}"),
            AppError::Auth(e) => write!(f, "{e}"),
            AppError::Role(Some(role)) => write!(f, "Role '{role}' is not allowed"),
            AppError::Role(None) => write!(f, "No role assigned"),
            AppError::Validation(_) => write!(f, "Validation failed"),
            AppError::Hash(e) => write!(f, "Hash error: {e}"),
            AppError::NotFound => write!(f, "Not found"),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Store(StoreError::Rejected(_)) | AppError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Store(StoreError::Constraint(_)) => StatusCode::CONFLICT,
            AppError::Store(StoreError::Unreachable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::Role(_) => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Hash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Validation(errors) => ApiErrorResponse {
                error: self.to_string(),
                details: Some(errors.join("; ")),
            },
            AppError::Store(_) | AppError::Hash(_) => {
                log::error!("{self}");
                ApiErrorResponse { error: self.to_string(), details: None }
            }
            _ => ApiErrorResponse { error: self.to_string(), details: None },
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Store(e)
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::Auth(e)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Store(StoreError::from(e))
    }
}
