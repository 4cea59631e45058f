#![allow(dead_code)]

use std::path::PathBuf;

use actix_web::web;
use bloghub_be::AppState;
use bloghub_be::config;
use bloghub_be::services::token_service::TokenService;
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-test-secret-that-is-long-enough";

/// Send a request and return the status with the JSON body (`Null` if not JSON).
#[macro_export]
macro_rules! call {
    ($app:expr, $req:expr) => {{
        let resp = actix_web::test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body = actix_web::test::read_body(resp).await;
        let json: serde_json::Value =
            serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        (status, json)
    }};
}

pub fn scratch_upload_dir() -> PathBuf {
    std::env::temp_dir().join(format!("bloghub-uploads-{}", Uuid::new_v4()))
}

/// State whose pool points at nothing; fine for requests rejected before any query.
pub fn offline_state(upload_dir: PathBuf) -> web::Data<AppState> {
    let pool = config::pool_from_url("postgres://nobody@127.0.0.1:1/none", 1)
        .expect("pool config is valid");
    web::Data::new(AppState {
        pg_pool: pool,
        tokens: TokenService::new(TEST_SECRET),
        upload_dir,
    })
}

/// State backed by `TEST_DATABASE_URL`, or `None` when it is unset.
pub async fn database_state() -> Option<web::Data<AppState>> {
    let url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("TEST_DATABASE_URL not set; skipping database test");
            return None;
        }
    };
    let pool = config::pool_from_url(&url, 4).expect("valid TEST_DATABASE_URL");
    config::run_migrations(&pool).await.expect("migrations apply");
    Some(web::Data::new(AppState {
        pg_pool: pool,
        tokens: TokenService::new(TEST_SECRET),
        upload_dir: scratch_upload_dir(),
    }))
}

pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, Uuid::new_v4().simple())
}
