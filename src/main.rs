use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use anyhow::{Context, Result};
use chrono::Local;
use std::sync::Arc;

mod api;
mod bootstrap;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod repository;
mod routes;
mod tracker;

use config::{Config, StorageBackend};
use db::{init_db, init_sqlite};

use crate::repository::{MySqlStore, SqliteStore, Store};
use tracing::{info, warn};
use tracing_appender::rolling;
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Employee Activity Tracker"
}

async fn open_store(config: &Config) -> Result<Arc<dyn Store>> {
    match config.storage {
        StorageBackend::Mysql => {
            let pool = init_db(&config.database_url).await?;
            Ok(Arc::new(MySqlStore::new(pool)))
        }
        StorageBackend::Sqlite => {
            if config.database_url.contains(":memory:") {
                warn!("Using an in-memory SQLite database, data is lost on shutdown");
            }
            let pool = init_sqlite(&config.database_url).await?;
            Ok(Arc::new(SqliteStore::new(pool)))
        }
    }
}

#[actix_web::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!(storage = %config.storage, "Server starting...");

    let store = open_store(&config).await?;

    if config.seed_fixtures {
        bootstrap::seed_if_empty(store.as_ref(), Local::now().date_naive())
            .await
            .context("Failed to load demo fixtures")?;
    }

    let limiter = routes::build_limiter(config.rate_per_min)?;
    let openapi = docs::api_doc(&config.api_prefix);
    let server_addr = config.server_addr.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", openapi.clone()),
            )
            .app_data(Data::from(store.clone()))
            .service(index)
            .configure(|cfg| routes::configure(cfg, &config, &limiter))
    })
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {}", server_addr))?
    .run()
    .await?;

    Ok(())
}
