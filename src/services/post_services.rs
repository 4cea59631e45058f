// src/services/post_services.rs
use log::info;
use tokio_postgres::{GenericClient, Transaction};
use uuid::Uuid;

use crate::dtos::post_dtos::{CreatePostDTO, Page, PostOut, UpdatePostDTO};
use crate::errors::{AppError, AppResult};
use crate::models::post::NewPost;
use crate::models::user::User;
use crate::repositories::post_repository::PostRepository;
use crate::services::ensure_author;

fn post_not_found() -> AppError {
    AppError::not_found("Post not found")
}

/// Create a draft post owned by `author`.
pub async fn create_post(tx: &Transaction<'_>, author: &User, dto: CreatePostDTO) -> AppResult<PostOut> {
    let new_post = NewPost::from_dto(dto, author.id)?;
    let id = PostRepository::insert(tx, &new_post).await?;
    info!("user {} created post {}", author.id, id);
    PostRepository::fetch(tx, id).await?.ok_or_else(post_not_found)
}

pub async fn get_post<C: GenericClient>(db: &C, id: Uuid) -> AppResult<PostOut> {
    PostRepository::fetch(db, id).await?.ok_or_else(post_not_found)
}

/// Published posts only.
pub async fn list_posts<C: GenericClient>(
    db: &C,
    search: Option<&str>,
    page: Page,
) -> AppResult<Vec<PostOut>> {
    PostRepository::list_published(db, search, page).await
}

/// Posts written by `author_id`. Drafts are only included for the author.
pub async fn list_user_posts<C: GenericClient>(
    db: &C,
    viewer: &User,
    author_id: Uuid,
    page: Option<Page>,
) -> AppResult<Vec<PostOut>> {
    PostRepository::list_by_author(db, author_id, viewer.id == author_id, page).await
}

pub async fn update_post(
    tx: &Transaction<'_>,
    actor: &User,
    id: Uuid,
    patch: UpdatePostDTO,
) -> AppResult<PostOut> {
    let mut post = PostRepository::lock(tx, id).await?.ok_or_else(post_not_found)?;
    ensure_author(actor, post.author_id, "update this post")?;

    if post.apply_patch(patch)? {
        PostRepository::update(tx, &post).await?;
        info!("user {} updated post {}", actor.id, id);
    }
    PostRepository::fetch(tx, id).await?.ok_or_else(post_not_found)
}

pub async fn delete_post(tx: &Transaction<'_>, actor: &User, id: Uuid) -> AppResult<()> {
    let post = PostRepository::lock(tx, id).await?.ok_or_else(post_not_found)?;
    ensure_author(actor, post.author_id, "delete this post")?;

    PostRepository::delete(tx, id).await?;
    info!("user {} deleted post {}", actor.id, id);
    Ok(())
}
