// src/dtos/upload_dtos.rs
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct UploadImageRequest {
    pub image_data: String, // base64, optionally with a data URL prefix
    pub file_name: String,
    pub content_type: String, // "image/jpeg", "image/png", etc.
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadImageResponse {
    pub image_url: String,
}
