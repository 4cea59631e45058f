pub mod config;
pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;

use std::path::PathBuf;

use actix_cors::Cors;
use actix_web::web;
use deadpool_postgres::Pool;

use crate::errors::AppError;
use crate::handlers::{
    auth_handlers, comment_handlers, post_handlers, upload_handlers, user_handlers,
};
use crate::services::token_service::TokenService;

#[derive(Clone)]
pub struct AppState {
    pub pg_pool: Pool,
    pub tokens: TokenService,
    pub upload_dir: PathBuf,
}

/// Register every route plus the body/query error handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(upload_handlers::MAX_JSON_BODY_BYTES)
            .error_handler(|err, _req| AppError::validation(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::validation(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|_err, _req| AppError::not_found("Not found").into()),
    )
    .service(auth_handlers::index)
    .service(auth_handlers::register) // POST /auth/register
    .service(auth_handlers::login) // POST /auth/login
    .service(user_handlers::me) // GET /users/me
    .service(user_handlers::user_posts) // GET /users/{id}/posts
    .service(post_handlers::list_posts) // GET /posts
    .service(post_handlers::create_post) // POST /posts
    .service(comment_handlers::list_comments) // GET /posts/{id}/comments
    .service(comment_handlers::create_comment) // POST /posts/{id}/comments
    .service(post_handlers::get_post) // GET /posts/{id}
    .service(post_handlers::update_post) // PUT /posts/{id}
    .service(post_handlers::delete_post) // DELETE /posts/{id}
    .service(comment_handlers::update_comment) // PUT /comments/{id}
    .service(comment_handlers::delete_comment) // DELETE /comments/{id}
    .service(upload_handlers::upload_image) // POST /uploads
    .service(upload_handlers::serve_upload); // GET /uploads/{filename}
}

pub fn cors(allowed_origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec!["authorization", "content-type", "accept", "x-requested-with"])
        .supports_credentials()
        .max_age(3600);

    for origin in allowed_origins {
        cors = cors.allowed_origin(origin);
    }
    cors
}
