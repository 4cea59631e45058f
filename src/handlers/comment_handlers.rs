// src/handlers/comment_handlers.rs
use actix_web::{HttpResponse, delete, get, post, put, web};
use uuid::Uuid;

use crate::AppState;
use crate::dtos::MessageOut;
use crate::dtos::comment_dtos::{CreateCommentDTO, UpdateCommentDTO};
use crate::errors::AppResult;
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::services::comment_services;

/// GET /posts/{id}/comments
#[get("/posts/{id}/comments")]
pub async fn list_comments(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let client = state.pg_pool.get().await?;
    let comments = comment_services::list_comments(&**client, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(comments))
}

/// POST /posts/{id}/comments
#[post("/posts/{id}/comments")]
pub async fn create_comment(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<Uuid>,
    body: web::Json<CreateCommentDTO>,
) -> AppResult<HttpResponse> {
    let mut client = state.pg_pool.get().await?;
    let tx = client.transaction().await?;
    let comment =
        comment_services::create_comment(&tx, &auth.user, path.into_inner(), body.into_inner())
            .await?;
    tx.commit().await?;

    Ok(HttpResponse::Ok().json(comment))
}

/// PUT /comments/{id}
#[put("/comments/{id}")]
pub async fn update_comment(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<Uuid>,
    body: web::Json<UpdateCommentDTO>,
) -> AppResult<HttpResponse> {
    let mut client = state.pg_pool.get().await?;
    let tx = client.transaction().await?;
    let comment =
        comment_services::update_comment(&tx, &auth.user, path.into_inner(), body.into_inner())
            .await?;
    tx.commit().await?;

    Ok(HttpResponse::Ok().json(comment))
}

/// DELETE /comments/{id}
#[delete("/comments/{id}")]
pub async fn delete_comment(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let mut client = state.pg_pool.get().await?;
    let tx = client.transaction().await?;
    comment_services::delete_comment(&tx, &auth.user, path.into_inner()).await?;
    tx.commit().await?;

    Ok(HttpResponse::Ok().json(MessageOut::new("Comment deleted successfully")))
}
