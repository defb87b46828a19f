//! Server State
//!
//! `ServerState` holds the shared handles every handler needs: the
//! immutable config, the SQLite pool, and the holiday provider. It is
//! `Clone`-cheap and used directly as the axum router state.

use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::services::HolidayService;
use crate::utils::AppError;

#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub holidays: HolidayService,
}

impl ServerState {
    /// Open the database, run migrations, seed the default admin and
    /// build the state.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        std::fs::create_dir_all(&config.work_dir)
            .map_err(|e| AppError::internal(format!("Failed to create work dir: {e}")))?;

        let db_path = config.db_path();
        let db_path = db_path
            .to_str()
            .ok_or_else(|| AppError::internal("Non-UTF8 database path"))?;
        let db = DbService::new(db_path).await?;

        let state = Self {
            config: config.clone(),
            pool: db.pool,
            holidays: HolidayService::new(&config.holiday_api_url, &config.holiday_country),
        };

        crate::core::provisioning::seed_default_admin(&state).await?;

        Ok(state)
    }

    /// Build a state over an existing pool. Test constructor.
    pub fn with_pool(config: Config, pool: SqlitePool) -> Self {
        let holidays = HolidayService::new(&config.holiday_api_url, &config.holiday_country);
        Self {
            config,
            pool,
            holidays,
        }
    }
}
