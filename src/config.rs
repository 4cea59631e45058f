use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use deadpool_postgres::{
    Config, Manager, ManagerConfig, Pool, PoolConfig, RecyclingMethod, Runtime,
};
use tokio_postgres::NoTls;

const INIT_SQL: &str = include_str!("../migrations/001_init.sql");
/// Key for the advisory lock held while the schema is applied.
const MIGRATION_LOCK_ID: i64 = 0x626c_6f67;

const DEFAULT_POOL_SIZE: usize = 16;
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";
const DEFAULT_UPLOAD_DIR: &str = "uploads";

#[derive(Debug, Clone)]
pub struct PgSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Option<String>,
    pub dbname: String,
    pub pool_size: usize,
}

/// Everything the server reads from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub pg: PgSettings,
    pub jwt_secret: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub upload_dir: PathBuf,
}

fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow!("{} has an invalid value: {:?}", name, raw)),
        Err(_) => Ok(default),
    }
}

pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let pg = PgSettings {
            host: env::var("PG_HOST").context("PG_HOST not set")?,
            port: parse_or("PG_PORT", 5432)?,
            user: env::var("PG_USER").context("PG_USER not set")?,
            password: env::var("PG_PASS").ok(),
            dbname: env::var("PG_DB").context("PG_DB not set")?,
            pool_size: parse_or("PG_POOL_SIZE", DEFAULT_POOL_SIZE)?,
        };

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET not set")?;
        if jwt_secret.trim().is_empty() {
            bail!("JWT_SECRET must not be empty");
        }

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string());

        Ok(Self {
            pg,
            jwt_secret,
            port: parse_or("PORT", DEFAULT_PORT)?,
            allowed_origins: parse_origins(&allowed_origins),
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_UPLOAD_DIR)),
        })
    }
}

pub fn get_pg_pool(settings: &PgSettings) -> Result<Pool> {
    let mut cfg = Config::new();
    cfg.host = Some(settings.host.clone());
    cfg.port = Some(settings.port);
    cfg.user = Some(settings.user.clone());
    cfg.password = settings.password.clone();
    cfg.dbname = Some(settings.dbname.clone());

    let mut pool_cfg = PoolConfig::default();
    pool_cfg.max_size = settings.pool_size;
    cfg.pool = Some(pool_cfg);

    cfg.create_pool(Some(Runtime::Tokio1), NoTls)
        .context("failed to create postgres pool")
}

/// Build a pool from a `postgres://` url.
pub fn pool_from_url(url: &str, max_size: usize) -> Result<Pool> {
    let pg_config: tokio_postgres::Config = url.parse().context("invalid postgres url")?;
    let manager = Manager::from_config(
        pg_config,
        NoTls,
        ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        },
    );
    Pool::builder(manager)
        .max_size(max_size)
        .build()
        .map_err(|e| anyhow!("failed to build postgres pool: {}", e))
}

/// Create the tables if they do not exist yet.
pub async fn run_migrations(pool: &Pool) -> Result<()> {
    let mut client = pool.get().await.context("no database connection")?;
    let tx = client.transaction().await?;
    tx.execute("SELECT pg_advisory_xact_lock($1)", &[&MIGRATION_LOCK_ID])
        .await?;
    tx.batch_execute(INIT_SQL).await.context("schema migration failed")?;
    tx.commit().await?;
    Ok(())
}
