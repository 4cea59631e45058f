// src/main.rs
use actix_web::{App, HttpServer, middleware::Logger, web};
use log::{error, info};

use bloghub_be::config::{self, AppConfig};
use bloghub_be::services::token_service::TokenService;
use bloghub_be::{AppState, configure, cors};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let app_config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    let pg_pool = match config::get_pg_pool(&app_config.pg) {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to create PG pool: {:#}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = config::run_migrations(&pg_pool).await {
        error!("Failed to prepare database schema: {:#}", e);
        std::process::exit(1);
    }

    let state = web::Data::new(AppState {
        pg_pool,
        tokens: TokenService::new(&app_config.jwt_secret),
        upload_dir: app_config.upload_dir.clone(),
    });

    let bind_address = format!("0.0.0.0:{}", app_config.port);
    info!("Starting server on {}", bind_address);
    info!("Serving uploads from {}", app_config.upload_dir.display());

    let allowed_origins = app_config.allowed_origins.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(cors(&allowed_origins))
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind(&bind_address)?
    .run()
    .await
}
