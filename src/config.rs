use std::env;

use crate::errors::AppError;

pub const DEFAULT_POOL_SIZE: u32 = 5;

/// Settings read from the environment (and `.env`, when present).
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub pool_size: u32,
}

impl Settings {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_vars(
            env::var("DATABASE_URL").ok(),
            env::var("DATABASE_POOL_SIZE").ok(),
        )
    }

    fn from_vars(database_url: Option<String>, pool_size: Option<String>) -> Result<Self, AppError> {
        let database_url = database_url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| AppError::Config("DATABASE_URL must be set".into()))?;
        let pool_size = match pool_size {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or_else(|| {
                    AppError::Config(format!("DATABASE_POOL_SIZE must be a positive number, got '{}'", raw))
                })?,
            None => DEFAULT_POOL_SIZE,
        };
        Ok(Self {
            database_url,
            pool_size,
        })
    }
}
