use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use sqlx::migrate::MigrateError;
use sqlx::Error as SqlxError;
use std::env::VarError;
use thiserror::Error;

use crate::structs::{ApiResponse, BloodGroup, UserType};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("User is not registered as {0}")]
    RoleMismatch(UserType),

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Auth failed")]
    Unauthorized,

    #[error("Invalid identifier: {0}")]
    MalformedId(String),

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Not a {0}")]
    WrongCounterparty(UserType),

    #[error("Only {available} units of {blood_group} are available")]
    InsufficientStock {
        blood_group: BloodGroup,
        available: i64,
    },

    #[error("{0}")]
    BadRequest(String),

    #[error("Password error: {0}")]
    PasswordError(String),

    #[error("Token error: {0}")]
    TokenError(#[from] jsonwebtoken::errors::Error),

    #[error("Internal server error")]
    InternalServerError,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Environment variable error: {0}")]
    EnvVarError(#[from] VarError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Migration error: {0}")]
    MigrateError(#[from] MigrateError),
}

impl ResponseError for AppError {
    // Failures are reported in the body only; clients branch on `success`.
    fn status_code(&self) -> StatusCode {
        StatusCode::OK
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::DatabaseError(_)
            | AppError::MigrateError(_)
            | AppError::PasswordError(_)
            | AppError::TokenError(_)
            | AppError::InternalServerError => log::error!("Request failed: {}", self),
            _ => log::warn!("Request rejected: {}", self),
        }
        HttpResponse::build(self.status_code()).json(ApiResponse::failure(self.to_string()))
    }
}

impl From<AppError> for std::io::Error {
    fn from(err: AppError) -> Self {
        std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
    }
}
