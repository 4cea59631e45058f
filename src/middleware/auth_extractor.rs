// src/middleware/auth_extractor.rs
use actix_web::http::header::{AUTHORIZATION, HeaderValue};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures::future::LocalBoxFuture;
use log::debug;

use crate::AppState;
use crate::errors::AppError;
use crate::models::user::User;
use crate::repositories::user_repository::UserRepository;

/// The user behind the request's bearer token.
///
/// Taking this as a handler argument makes the route require authentication.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
pub fn bearer_token(header: Option<&HeaderValue>) -> Result<&str, AppError> {
    let header = header.ok_or_else(|| AppError::unauthorized("Not authenticated"))?;
    let value = header
        .to_str()
        .map_err(|_| AppError::unauthorized("Invalid authorization header"))?;

    let (scheme, token) = value
        .split_once(' ')
        .ok_or_else(|| AppError::unauthorized("Invalid authorization header"))?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AppError::unauthorized("Invalid authorization header"));
    }
    Ok(token)
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = bearer_token(req.headers().get(AUTHORIZATION)).map(str::to_owned);
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let token = token?;
            let state =
                state.ok_or_else(|| AppError::Internal("application state missing".into()))?;

            let email = state.tokens.verify(&token)?;

            let client = state.pg_pool.get().await?;
            let user = UserRepository::find_by_email(&**client, &email)
                .await?
                .ok_or_else(|| {
                    debug!("token subject {} has no account", email);
                    AppError::unauthorized("Could not validate credentials")
                })?;

            Ok(AuthenticatedUser { user })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn accepts_bearer_header() {
        let value = HeaderValue::from_static("Bearer abc.def.ghi");
        assert_eq!(bearer_token(Some(&value)).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn scheme_is_case_insensitive() {
        let value = HeaderValue::from_static("bearer abc");
        assert_eq!(bearer_token(Some(&value)).unwrap(), "abc");
    }

    #[test]
    fn missing_header_is_unauthorized() {
        assert_matches!(bearer_token(None), Err(AppError::Unauthorized(_)));
    }

    #[test]
    fn malformed_headers_are_unauthorized() {
        for raw in ["Basic dXNlcjpwYXNz", "Bearer", "Bearer    ", "abc.def.ghi"] {
            let value = HeaderValue::from_static(raw);
            assert_matches!(
                bearer_token(Some(&value)),
                Err(AppError::Unauthorized(_)),
                "header {:?} should be rejected",
                raw
            );
        }
    }
}
