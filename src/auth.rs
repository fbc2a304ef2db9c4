//! Bearer-token gate for protected routes.
//!
//! Handlers take an [`AuthenticatedUser`] parameter; the caller id is resolved here once and
//! passed explicitly to every query that follows.

use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header, web::Data, FromRequest, HttpRequest};

use crate::{errors::AppError, AppState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i64,
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, AppError> {
    let state = req.app_data::<Data<AppState>>().ok_or_else(|| {
        log::error!("AppState missing from application data");
        AppError::InternalServerError
    })?;

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .ok_or(AppError::Unauthorized)?;

    let claims = state.tokens.verify(token)?;
    let user_id = claims
        .user_id
        .parse::<i64>()
        .map_err(|_| AppError::MalformedId(claims.user_id.clone()))?;

    Ok(AuthenticatedUser { user_id })
}

/// Token part of a `Bearer` credential. The scheme name is case-insensitive.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
