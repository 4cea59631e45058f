// src/services/comment_services.rs
use log::info;
use tokio_postgres::{GenericClient, Transaction};
use uuid::Uuid;

use crate::dtos::comment_dtos::{CommentOut, CreateCommentDTO, UpdateCommentDTO};
use crate::errors::{AppError, AppResult};
use crate::models::require_text;
use crate::models::user::User;
use crate::repositories::comment_repository::CommentRepository;
use crate::repositories::post_repository::PostRepository;
use crate::services::ensure_author;

fn comment_not_found() -> AppError {
    AppError::not_found("Comment not found")
}

/// Comments on a post, oldest first. An unknown post simply has none.
pub async fn list_comments<C: GenericClient>(db: &C, post_id: Uuid) -> AppResult<Vec<CommentOut>> {
    CommentRepository::list_for_post(db, post_id).await
}

pub async fn create_comment(
    tx: &Transaction<'_>,
    author: &User,
    post_id: Uuid,
    dto: CreateCommentDTO,
) -> AppResult<CommentOut> {
    if !PostRepository::exists(tx, post_id).await? {
        return Err(AppError::not_found("Post not found"));
    }
    require_text("content", &dto.content)?;

    let id = CommentRepository::insert(tx, post_id, author.id, &dto.content).await?;
    info!("user {} commented {} on post {}", author.id, id, post_id);
    CommentRepository::fetch(tx, id).await?.ok_or_else(comment_not_found)
}

pub async fn update_comment(
    tx: &Transaction<'_>,
    actor: &User,
    id: Uuid,
    patch: UpdateCommentDTO,
) -> AppResult<CommentOut> {
    let mut comment = CommentRepository::lock(tx, id).await?.ok_or_else(comment_not_found)?;
    ensure_author(actor, comment.author_id, "update this comment")?;

    if comment.apply_patch(patch)? {
        CommentRepository::update(tx, &comment).await?;
        info!("user {} updated comment {}", actor.id, id);
    }
    CommentRepository::fetch(tx, id).await?.ok_or_else(comment_not_found)
}

pub async fn delete_comment(tx: &Transaction<'_>, actor: &User, id: Uuid) -> AppResult<()> {
    let comment = CommentRepository::lock(tx, id).await?.ok_or_else(comment_not_found)?;
    ensure_author(actor, comment.author_id, "delete this comment")?;

    CommentRepository::delete(tx, id).await?;
    info!("user {} deleted comment {}", actor.id, id);
    Ok(())
}
