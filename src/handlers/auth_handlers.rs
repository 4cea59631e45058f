// src/handlers/auth_handlers.rs
use actix_web::{HttpResponse, get, post, web};

use crate::AppState;
use crate::dtos::MessageOut;
use crate::dtos::auth_dtos::{LoginIn, RegisterIn};
use crate::dtos::user_dtos::UserOut;
use crate::errors::AppResult;
use crate::services::auth_services;

/// GET /
#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(MessageOut::new("Welcome to BlogHub API"))
}

/// POST /auth/register
/// Create an account. 400 when the email is already registered.
#[post("/auth/register")]
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterIn>,
) -> AppResult<HttpResponse> {
    let mut client = state.pg_pool.get().await?;
    let tx = client.transaction().await?;
    let user = auth_services::register(&tx, body.into_inner()).await?;
    tx.commit().await?;

    Ok(HttpResponse::Ok().json(UserOut::from(&user)))
}

/// POST /auth/login
/// Returns `{access_token, token_type: "bearer"}`, valid for 30 minutes.
#[post("/auth/login")]
pub async fn login(state: web::Data<AppState>, body: web::Json<LoginIn>) -> AppResult<HttpResponse> {
    let client = state.pg_pool.get().await?;
    let token = auth_services::login(&**client, &state.tokens, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(token))
}
