pub mod auth_services;
pub mod comment_services;
pub mod credentials;
pub mod post_services;
pub mod token_service;

use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::user::User;

/// Only the author of a resource may change or remove it.
pub fn ensure_author(actor: &User, author_id: Uuid, action: &str) -> AppResult<()> {
    if actor.id != author_id {
        return Err(AppError::forbidden(format!("Not authorized to {}", action)));
    }
    Ok(())
}
