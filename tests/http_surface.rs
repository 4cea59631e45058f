//! HTTP behaviour that does not need a database: auth rejection, input
//! rejection and static upload serving.

#[macro_use]
mod common;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test};
use bloghub_be::configure;
use bloghub_be::services::token_service::TokenService;
use chrono::Duration;
use serde_json::json;
use uuid::Uuid;

use common::{TEST_SECRET, offline_state, scratch_upload_dir};

#[actix_web::test]
async fn index_greets() {
    let app = test::init_service(
        App::new()
            .app_data(offline_state(scratch_upload_dir()))
            .configure(configure),
    )
    .await;

    let (status, body) = call!(app, test::TestRequest::get().uri("/"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to BlogHub API");
}

#[actix_web::test]
async fn protected_routes_require_a_token() {
    let app = test::init_service(
        App::new()
            .app_data(offline_state(scratch_upload_dir()))
            .configure(configure),
    )
    .await;
    let id = Uuid::new_v4();

    let requests = vec![
        test::TestRequest::get().uri("/users/me"),
        test::TestRequest::get().uri(&format!("/users/{}/posts", id)),
        test::TestRequest::post()
            .uri("/posts")
            .set_json(json!({"title": "t", "content": "c"})),
        test::TestRequest::put()
            .uri(&format!("/posts/{}", id))
            .set_json(json!({"is_published": true})),
        test::TestRequest::delete().uri(&format!("/posts/{}", id)),
        test::TestRequest::post()
            .uri(&format!("/posts/{}/comments", id))
            .set_json(json!({"content": "hi"})),
        test::TestRequest::delete().uri(&format!("/comments/{}", id)),
    ];

    for req in requests {
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(resp.headers().get(header::WWW_AUTHENTICATE).unwrap(), "Bearer");
    }
}

#[actix_web::test]
async fn bad_tokens_are_rejected_before_lookup() {
    let app = test::init_service(
        App::new()
            .app_data(offline_state(scratch_upload_dir()))
            .configure(configure),
    )
    .await;

    let expired = TokenService::new(TEST_SECRET)
        .issue("alice@example.com", Duration::minutes(-1))
        .unwrap();
    let foreign = TokenService::new("another-secret")
        .issue("alice@example.com", TokenService::access_token_ttl())
        .unwrap();

    for token in [expired, foreign, "garbage".to_string()] {
        let (status, body) = call!(
            app,
            test::TestRequest::get()
                .uri("/users/me")
                .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        );
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["detail"], "Could not validate credentials");
    }
}

#[actix_web::test]
async fn malformed_input_is_a_bad_request() {
    let app = test::init_service(
        App::new()
            .app_data(offline_state(scratch_upload_dir()))
            .configure(configure),
    )
    .await;

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/auth/register")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{not json")
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");

    let (status, _) = call!(app, test::TestRequest::get().uri("/posts?limit=ten"));
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call!(app, test::TestRequest::get().uri("/posts?skip=-1"));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "skip must not be negative");

    let (status, body) = call!(app, test::TestRequest::get().uri("/posts?search=a%00b"));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "search must not contain NUL characters");
}

#[actix_web::test]
async fn malformed_ids_are_not_found() {
    let app = test::init_service(
        App::new()
            .app_data(offline_state(scratch_upload_dir()))
            .configure(configure),
    )
    .await;

    let (status, body) = call!(app, test::TestRequest::get().uri("/posts/not-a-uuid"));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "error");
}

#[actix_web::test]
async fn serves_uploaded_files() {
    let dir = scratch_upload_dir();
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("cover.png"), b"\x89PNG fake").unwrap();

    let app = test::init_service(
        App::new()
            .app_data(offline_state(dir.clone()))
            .configure(configure),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/uploads/cover.png").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "image/png");
    assert_eq!(test::read_body(resp).await.as_ref(), b"\x89PNG fake");

    let (status, _) = call!(app, test::TestRequest::get().uri("/uploads/missing.png"));
    assert_eq!(status, StatusCode::NOT_FOUND);

    let _ = std::fs::remove_dir_all(dir);
}
