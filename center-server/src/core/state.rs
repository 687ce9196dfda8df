use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;

/// Server state - shared by every handler
///
/// Holds the configuration and the database pool. `SqlitePool` is itself an
/// `Arc` internally, so cloning the state is cheap.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
}

impl ServerState {
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        Self { config, pool }
    }

    /// Initialize server state: working directory structure, then database.
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_file();
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        Self::new(config.clone(), db_service.pool)
    }
}
