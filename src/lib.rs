pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod infrastructure;
pub mod schema;

use diesel::pg::Pg;
use diesel::migration::{Migration, MigrationName, MigrationSource};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

pub use application::order_service::OrderService;
pub use db::{create_pool, DbPool};
pub use errors::AppError;
pub use infrastructure::order_repo::DieselOrderRepository;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Applied and pending migration versions, oldest first.
#[derive(Debug, Clone, Default)]
pub struct MigrationStatus {
    pub applied: Vec<String>,
    pub pending: Vec<String>,
}

/// Run any pending migrations and return the versions that were applied.
pub fn run_migrations(pool: &DbPool) -> Result<Vec<String>, AppError> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    let applied: Vec<String> = applied.iter().map(ToString::to_string).collect();
    for version in &applied {
        log::info!("applied migration {}", version);
    }
    Ok(applied)
}

/// Revert the most recently applied migration and return its version.
pub fn revert_last_migration(pool: &DbPool) -> Result<String, AppError> {
    let mut conn = pool.get()?;
    let version = conn.revert_last_migration(MIGRATIONS)?.to_string();
    log::info!("reverted migration {}", version);
    Ok(version)
}

pub fn migration_status(pool: &DbPool) -> Result<MigrationStatus, AppError> {
    let mut conn = pool.get()?;
    let mut applied: Vec<String> = conn
        .applied_migrations()?
        .iter()
        .map(ToString::to_string)
        .collect();
    applied.sort();
    let known = MigrationSource::<Pg>::migrations(&MIGRATIONS)?;
    let pending = known
        .iter()
        .map(|m| m.name().version().to_string())
        .filter(|version| !applied.contains(version))
        .collect();
    Ok(MigrationStatus { applied, pending })
}
