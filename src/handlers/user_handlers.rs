// src/handlers/user_handlers.rs
use actix_web::{HttpResponse, get, web};
use uuid::Uuid;

use crate::AppState;
use crate::dtos::post_dtos::PageQuery;
use crate::dtos::user_dtos::UserOut;
use crate::errors::AppResult;
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::services::post_services;

/// GET /users/me
#[get("/users/me")]
pub async fn me(auth: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(UserOut::from(&auth.user))
}

/// GET /users/{id}/posts
/// The author also sees their unpublished drafts. Every post is returned
/// unless `skip` or `limit` is given.
#[get("/users/{id}/posts")]
pub async fn user_posts(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<Uuid>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = query.page_or_all()?;
    let client = state.pg_pool.get().await?;
    let posts =
        post_services::list_user_posts(&**client, &auth.user, path.into_inner(), page).await?;
    Ok(HttpResponse::Ok().json(posts))
}
