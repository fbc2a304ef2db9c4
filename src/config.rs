use std::env;

use crate::errors::AppError;

const DEFAULT_DATABASE_URL: &str = "sqlite://blood_bank.db";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TOKEN_TTL_DAYS: i64 = 7;

/// Runtime settings, read from the environment (and `.env` through dotenvy).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub token_secret: String,
    pub host: String,
    pub port: u16,
    pub token_ttl_days: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let token_secret = env::var("TOKEN_SECRET").map_err(|e| {
            log::error!("FATAL: TOKEN_SECRET environment variable not set");
            AppError::EnvVarError(e)
        })?;
        if token_secret.is_empty() {
            return Err(AppError::ConfigError("TOKEN_SECRET must not be empty".into()));
        }

        Ok(Config {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned()),
            token_secret,
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_owned()),
            port: parse_or("PORT", env::var("PORT").ok(), DEFAULT_PORT)?,
            token_ttl_days: parse_or(
                "TOKEN_TTL_DAYS",
                env::var("TOKEN_TTL_DAYS").ok(),
                DEFAULT_TOKEN_TTL_DAYS,
            )?,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &str,
    raw: Option<String>,
    default: T,
) -> Result<T, AppError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| AppError::ConfigError(format!("{} has an invalid value: {}", name, value))),
    }
}
