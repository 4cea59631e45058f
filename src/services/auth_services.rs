// src/services/auth_services.rs
use log::info;
use regex::Regex;
use std::sync::OnceLock;
use tokio_postgres::Transaction;

use crate::dtos::auth_dtos::{LoginIn, RegisterIn, TokenOut};
use crate::errors::{AppError, AppResult};
use crate::models::reject_nul;
use crate::models::user::{NewUser, User};
use crate::repositories::user_repository::UserRepository;
use crate::services::credentials;
use crate::services::token_service::TokenService;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_USERNAME_LEN: usize = 50;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("email pattern is valid")
    })
}

pub fn looks_like_email(email: &str) -> bool {
    email_regex().is_match(email)
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check a registration payload and return it with the email normalized.
pub fn validate_registration(input: RegisterIn) -> AppResult<RegisterIn> {
    reject_nul("username", &input.username)?;
    reject_nul("email", &input.email)?;
    reject_nul("password", &input.password)?;

    let username = input.username.trim().to_string();
    if username.is_empty() {
        return Err(AppError::validation("Username is required"));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(AppError::validation(format!(
            "Username must be at most {} characters",
            MAX_USERNAME_LEN
        )));
    }

    let email = normalize_email(&input.email);
    if !looks_like_email(&email) {
        return Err(AppError::validation("Invalid email format"));
    }

    if input.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LEN
        )));
    }

    Ok(RegisterIn {
        username,
        email,
        password: input.password,
    })
}

/// Create an account. Fails with 400 when the email is already taken.
pub async fn register(tx: &Transaction<'_>, input: RegisterIn) -> AppResult<User> {
    let input = validate_registration(input)?;

    if UserRepository::find_by_email(tx, &input.email).await?.is_some() {
        return Err(AppError::validation("Email already registered"));
    }

    let hashed_password = credentials::hash_password_blocking(input.password).await?;
    let user = UserRepository::insert(
        tx,
        &NewUser {
            username: input.username,
            email: input.email,
            hashed_password,
        },
    )
    .await?;

    info!("registered user {}", user.id);
    Ok(user)
}

/// Exchange email and password for a bearer token.
pub async fn login<C: tokio_postgres::GenericClient>(
    db: &C,
    tokens: &TokenService,
    input: LoginIn,
) -> AppResult<TokenOut> {
    let bad_credentials = || AppError::unauthorized("Incorrect email or password");

    reject_nul("email", &input.email)?;
    let email = normalize_email(&input.email);
    let user = UserRepository::find_by_email(db, &email)
        .await?
        .ok_or_else(bad_credentials)?;

    if !credentials::verify_password_blocking(input.password, user.hashed_password.clone()).await? {
        return Err(bad_credentials());
    }

    let token = tokens.issue(&user.email, TokenService::access_token_ttl())?;
    info!("user {} logged in", user.id);
    Ok(TokenOut::bearer(token))
}
