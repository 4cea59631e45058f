pub mod auth_dtos;
pub mod comment_dtos;
pub mod patch;
pub mod post_dtos;
pub mod upload_dtos;
pub mod user_dtos;

use serde::{Deserialize, Serialize};

/// `{"message": "..."}` body used by deletes and the index route.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageOut {
    pub message: String,
}

impl MessageOut {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
