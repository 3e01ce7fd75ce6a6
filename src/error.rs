use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use serde_json::json;

use thiserror::Error;

use crate::domain::ValidationErrors;
use crate::repo::StorageError;

pub type RestResult<T> = Result<T, RestError>;

#[derive(Debug, Error)]
pub enum RestError {
    #[error("Malformed request body: {0}")]
    MalformedRequest(String),

    #[error("{0}")]
    Validation(ValidationErrors),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ValidationErrors> for RestError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl ResponseError for RestError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Storage(_) | Self::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            Self::MalformedRequest(detail) => json!({
                "error": "invalid_json",
                "detail": detail,
            }),
            Self::Validation(errors) => json!({
                "error": "validation_error",
                "detail": errors.violations(),
            }),
            Self::Storage(_) | Self::Other(_) => {
                tracing::error!("Request failed: {}", self);
                json!({ "error": "internal_error" })
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}
