// src/handlers/upload_handlers.rs
use actix_web::{HttpResponse, get, post, web};
use base64::{Engine as _, engine::general_purpose};
use log::{debug, info};
use std::path::Path;
use uuid::Uuid;

use crate::AppState;
use crate::dtos::upload_dtos::{UploadImageRequest, UploadImageResponse};
use crate::errors::{AppError, AppResult};
use crate::middleware::auth_extractor::AuthenticatedUser;

/// Public path prefix uploaded files are served under.
pub const UPLOADS_PREFIX: &str = "/uploads";
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
/// Request body cap: a full-size image as base64 plus the JSON around it.
pub const MAX_JSON_BODY_BYTES: usize = 8 * 1024 * 1024;

/// File extension for an accepted image content type.
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type.to_ascii_lowercase().as_str() {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

/// Content type to serve a stored file with, from its extension.
pub fn content_type_for(filename: &str) -> mime::Mime {
    match Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => mime::IMAGE_JPEG,
        Some("png") => mime::IMAGE_PNG,
        Some("gif") => mime::IMAGE_GIF,
        Some("webp") => "image/webp".parse().unwrap_or(mime::APPLICATION_OCTET_STREAM),
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}

/// Last path component only, so requests cannot leave the uploads directory.
pub fn safe_file_name(requested: &str) -> Option<&str> {
    Path::new(requested)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.starts_with('.'))
}

/// Decode base64 image data, with or without a `data:...;base64,` prefix.
pub fn decode_image(image_data: &str) -> AppResult<Vec<u8>> {
    let encoded = match image_data.split_once(',') {
        Some((_, data)) => data,
        None => image_data,
    };
    let bytes = general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|_| AppError::validation("Invalid base64 image data"))?;

    if bytes.is_empty() {
        return Err(AppError::validation("Image is empty"));
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::validation("Image must be at most 5 MiB"));
    }
    Ok(bytes)
}

/// POST /uploads
/// Store an image and return the url to put in a post's `image_url`.
#[post("/uploads")]
pub async fn upload_image(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    body: web::Json<UploadImageRequest>,
) -> AppResult<HttpResponse> {
    let extension = extension_for(&body.content_type).ok_or_else(|| {
        AppError::validation("Invalid file type. Only JPEG, PNG, GIF, and WEBP are allowed.")
    })?;
    let image_bytes = decode_image(&body.image_data)?;
    debug!(
        "upload from user {}: {} ({} bytes)",
        auth.user.id,
        body.file_name,
        image_bytes.len()
    );

    tokio::fs::create_dir_all(&state.upload_dir).await?;
    let filename = format!("{}.{}", Uuid::new_v4(), extension);
    tokio::fs::write(state.upload_dir.join(&filename), &image_bytes).await?;

    info!("user {} uploaded {}", auth.user.id, filename);
    Ok(HttpResponse::Ok().json(UploadImageResponse {
        image_url: format!("{}/{}", UPLOADS_PREFIX, filename),
    }))
}

/// GET /uploads/{filename}
#[get("/uploads/{filename}")]
pub async fn serve_upload(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let requested = path.into_inner();
    let filename = safe_file_name(&requested).ok_or_else(|| AppError::not_found("File not found"))?;

    match tokio::fs::read(state.upload_dir.join(filename)).await {
        Ok(data) => Ok(HttpResponse::Ok()
            .content_type(content_type_for(filename))
            .body(data)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(AppError::not_found("File not found"))
        }
        Err(e) => Err(e.into()),
    }
}
