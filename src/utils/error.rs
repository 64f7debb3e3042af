use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

/// MongoDB server code for a unique index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("User already exists with this email")]
    DuplicateEmail,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("User does not exist")]
    InvalidReference,

    #[error("Invalid ID format: {0}")]
    InvalidIdentifier(String),

    #[error("{0}")]
    ValidationFailure(String),

    #[error("Database error: {0}")]
    StoreUnavailable(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DuplicateEmail
            | AppError::InvalidReference
            | AppError::InvalidIdentifier(_)
            | AppError::ValidationFailure(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "success": false,
            "error": self.to_string()
        }))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        if is_duplicate_key(&e) {
            AppError::DuplicateEmail
        } else {
            AppError::StoreUnavailable(e.to_string())
        }
    }
}

impl From<mongodb::bson::de::Error> for AppError {
    fn from(e: mongodb::bson::de::Error) -> Self {
        AppError::StoreUnavailable(format!("malformed document: {}", e))
    }
}

// Inserts report the violation as a write error, findAndModify as a command error.
fn is_duplicate_key(e: &mongodb::error::Error) -> bool {
    match e.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}
