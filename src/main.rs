use std::env;

use order_schema::config::Settings;
use order_schema::{create_pool, migration_status, revert_last_migration, run_migrations, AppError};

const USAGE: &str = "usage: orders-migrate [up|down|status]";

fn main() -> Result<(), AppError> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let command = env::args().nth(1).unwrap_or_else(|| "up".to_string());
    let settings = Settings::from_env()?;
    let pool = create_pool(&settings.database_url, settings.pool_size)?;

    match command.as_str() {
        "up" => {
            let applied = run_migrations(&pool)?;
            if applied.is_empty() {
                log::info!("database is up to date");
            }
        }
        "down" => {
            revert_last_migration(&pool)?;
        }
        "status" => {
            let status = migration_status(&pool)?;
            for version in &status.applied {
                log::info!("[applied] {}", version);
            }
            for version in &status.pending {
                log::info!("[pending] {}", version);
            }
        }
        other => {
            return Err(AppError::Config(format!("unknown command '{}'; {}", other, USAGE)));
        }
    }
    Ok(())
}
