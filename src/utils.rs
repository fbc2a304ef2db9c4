use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use actix_web::web;

use crate::errors::AppError;

/// Runs CPU-heavy work on actix's blocking thread pool instead of the request worker.
async fn run_blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    web::block(work).await.map_err(|e| {
        log::error!("Blocking task failed: {}", e);
        AppError::InternalServerError
    })?
}

pub async fn hash_password(password: String) -> Result<String, AppError> {
    run_blocking(move || hash_password_sync(&password)).await
}

pub async fn verify_password(provided: String, stored_hash: String) -> Result<bool, AppError> {
    run_blocking(move || verify_password_sync(&provided, &stored_hash)).await
}

fn hash_password_sync(password: &str) -> Result<String, AppError> {
    Argon2::default()
        .hash_password(password.as_bytes(), &SaltString::generate(&mut OsRng))
        .map(|hash| hash.to_string())
        .map_err(|e| {
            log::error!("Failed to hash password: {}", e);
            AppError::PasswordError(e.to_string())
        })
}

/// Checks `provided` against a stored PHC string. A malformed stored hash is an error,
/// a plain mismatch is `Ok(false)`.
fn verify_password_sync(provided: &str, stored_hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| {
        log::error!("Stored password hash is unreadable: {}", e);
        AppError::PasswordError(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(provided.as_bytes(), &parsed)
        .is_ok())
}

pub fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}
