//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! It centralizes error management and converts every failure into an HTTP status plus
//! a `{"error": ...}` JSON body via `actix_web::error::ResponseError`.
//!
//! `From` implementations for `sqlx::Error`, `validator::ValidationErrors`,
//! `jsonwebtoken::errors::Error`, and `bcrypt::BcryptError` allow handlers to
//! propagate failures with the `?` operator.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Missing or invalid bearer token (HTTP 401).
    Unauthorized(String),
    /// The authenticated caller is not allowed to act on this resource (HTTP 403).
    Forbidden(String),
    /// Malformed or invalid request (HTTP 400).
    BadRequest(String),
    /// A uniqueness constraint was violated, such as a duplicate email (HTTP 400).
    ///
    /// The register handler surfaces this as a generic creation error, so it
    /// shares the 400 status with `BadRequest` rather than using 409.
    Conflict(String),
    /// A requested resource was not found (HTTP 404).
    NotFound(String),
    /// An unexpected server-side error (HTTP 500).
    InternalServerError(String),
    /// An error originating from the document store (HTTP 500).
    DatabaseError(String),
    /// Failed input validation on a request payload (HTTP 422).
    ValidationError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "error": msg
            })),
            AppError::Forbidden(msg) => HttpResponse::Forbidden().json(json!({
                "error": msg
            })),
            AppError::BadRequest(msg) | AppError::Conflict(msg) => HttpResponse::BadRequest()
                .json(json!({
                    "error": msg
                })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "error": msg
            })),
            AppError::InternalServerError(msg) => HttpResponse::InternalServerError().json(json!({
                "error": msg
            })),
            // Store errors are presented as generic internal server errors to the client.
            AppError::DatabaseError(msg) => HttpResponse::InternalServerError().json(json!({
                "error": msg
            })),
            AppError::ValidationError(msg) => HttpResponse::UnprocessableEntity().json(json!({
                "error": msg
            })),
        }
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` maps to `NotFound`; a unique-constraint violation maps to
/// `Conflict` (the users table enforces email uniqueness); everything else
/// becomes `DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Duplicate value".into())
            }
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// JWT processing failures (malformed or wrongly-signed tokens) are unauthorized.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(error.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}
