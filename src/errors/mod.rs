//! Application error type mapped onto HTTP responses.

use actix_web::{HttpResponse, ResponseError};
use mongodb::error::{ErrorKind, WriteError, WriteFailure};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Conflict(String),
    TooManyRequests(String),
    InternalServerError(String),
    ValidationError(Vec<String>),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(message) => write!(f, "Bad Request: {}", message),
            ApiError::Unauthorized(message) => write!(f, "Unauthorized: {}", message),
            ApiError::NotFound(message) => write!(f, "Not Found: {}", message),
            ApiError::Conflict(message) => write!(f, "Conflict: {}", message),
            ApiError::TooManyRequests(message) => write!(f, "Too Many Requests: {}", message),
            ApiError::InternalServerError(message) => {
                write!(f, "Internal Server Error: {}", message)
            }
            ApiError::ValidationError(errors) => write!(f, "Validation Error: {:?}", errors),
        }
    }
}

impl ApiError {
    fn body(&self) -> ErrorBody {
        match self {
            ApiError::ValidationError(errors) => ErrorBody {
                success: false,
                message: "Validation failed".to_string(),
                errors: Some(errors.clone()),
            },
            ApiError::BadRequest(message)
            | ApiError::Unauthorized(message)
            | ApiError::NotFound(message)
            | ApiError::Conflict(message)
            | ApiError::TooManyRequests(message)
            | ApiError::InternalServerError(message) => ErrorBody {
                success: false,
                message: message.clone(),
                errors: None,
            },
        }
    }
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        let body = self.body();
        match self {
            ApiError::BadRequest(_) | ApiError::ValidationError(_) => {
                HttpResponse::BadRequest().json(body)
            }
            ApiError::Unauthorized(_) => HttpResponse::Unauthorized().json(body),
            ApiError::NotFound(_) => HttpResponse::NotFound().json(body),
            ApiError::Conflict(_) => HttpResponse::Conflict().json(body),
            ApiError::TooManyRequests(_) => HttpResponse::TooManyRequests().json(body),
            ApiError::InternalServerError(_) => HttpResponse::InternalServerError().json(body),
        }
    }
}

impl From<mongodb::error::Error> for ApiError {
    fn from(err: mongodb::error::Error) -> Self {
        ApiError::InternalServerError(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for ApiError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        ApiError::Unauthorized(err.to_string())
    }
}

/// True when the driver error is a unique index violation (E11000).
pub fn is_duplicate_key_error(err: &mongodb::error::Error) -> bool {
    matches!(
        *err.kind,
        ErrorKind::Write(WriteFailure::WriteError(WriteError { code: 11000, .. }))
    )
}
