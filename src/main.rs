use std::str::FromStr;

use actix_web::{
    middleware,
    web::{self, Data},
    App, HttpServer,
};
use log::info;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode},
    SqlitePool,
};

mod auth;
mod config;
mod db;
mod errors;
mod routes;
mod stock;
mod structs;
#[cfg(test)]
mod test_utils;
mod token;
mod utils;

use config::Config;
use errors::AppError;
use token::TokenSigner;

#[derive(Debug, Clone)]
pub struct AppState {
    db_pool: SqlitePool,
    tokens: TokenSigner,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env()?;

    let opts = SqliteConnectOptions::from_str(&config.database_url)
        .map_err(AppError::from)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .read_only(false)
        .busy_timeout(std::time::Duration::from_secs(5));

    let db_pool = SqlitePool::connect_with(opts).await.map_err(AppError::from)?;

    sqlx::migrate!().run(&db_pool).await.map_err(AppError::from)?;

    info!("Database migrated successfully");

    let state = AppState {
        db_pool,
        tokens: TokenSigner::new(&config.token_secret, config.token_ttl_days),
    };

    info!(
        "Starting HTTP server on http://{}:{}/",
        config.host, config.port
    );

    HttpServer::new(move || {
        App::new()
            // enable automatic response compression - usually register this first
            .wrap(middleware::Compress::default())
            // enable logger - always register Actix Web Logger middleware last
            .wrap(middleware::Logger::default())
            .app_data(Data::new(state.clone()))
            .configure(routes::configure)
            .default_service(web::to(routes::default_handler))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
