// src/handlers/post_handlers.rs
use actix_web::{HttpResponse, delete, get, post, put, web};
use uuid::Uuid;

use crate::AppState;
use crate::dtos::MessageOut;
use crate::dtos::post_dtos::{CreatePostDTO, ListPostsQuery, UpdatePostDTO};
use crate::errors::AppResult;
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::services::post_services;

/// GET /posts?skip=&limit=&search=
/// Published posts only, newest first.
#[get("/posts")]
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let page = query.page()?;
    let search = query.search_term()?;
    let client = state.pg_pool.get().await?;
    let posts = post_services::list_posts(&**client, search, page).await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// POST /posts
/// New posts start unpublished.
#[post("/posts")]
pub async fn create_post(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    body: web::Json<CreatePostDTO>,
) -> AppResult<HttpResponse> {
    let mut client = state.pg_pool.get().await?;
    let tx = client.transaction().await?;
    let post = post_services::create_post(&tx, &auth.user, body.into_inner()).await?;
    tx.commit().await?;

    Ok(HttpResponse::Ok().json(post))
}

/// GET /posts/{id}
#[get("/posts/{id}")]
pub async fn get_post(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let client = state.pg_pool.get().await?;
    let post = post_services::get_post(&**client, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// PUT /posts/{id}
/// Partial update, author only.
#[put("/posts/{id}")]
pub async fn update_post(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostDTO>,
) -> AppResult<HttpResponse> {
    let mut client = state.pg_pool.get().await?;
    let tx = client.transaction().await?;
    let post =
        post_services::update_post(&tx, &auth.user, path.into_inner(), body.into_inner()).await?;
    tx.commit().await?;

    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /posts/{id}
/// Removes the post and its comments.
#[delete("/posts/{id}")]
pub async fn delete_post(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let mut client = state.pg_pool.get().await?;
    let tx = client.transaction().await?;
    post_services::delete_post(&tx, &auth.user, path.into_inner()).await?;
    tx.commit().await?;

    Ok(HttpResponse::Ok().json(MessageOut::new("Post deleted successfully")))
}
