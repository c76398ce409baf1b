use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use spacetrouble_core::CollaboratorError;
use std::time::Duration;
use tracing::info;

use crate::app_config::DatabaseConfig;

const EXCLUSION_VIOLATION: &str = "23P01";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const CHECK_VIOLATION: &str = "23514";

#[derive(Clone)]
pub struct DbClient {
    pub pool: Pool<Postgres>,
}

impl DbClient {
    pub async fn new(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .connect(&config.connection_url())
            .await?;

        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        info!("Running database migrations...");
        sqlx::migrate!("../migrations")
            .run(&self.pool)
            .await?;
        info!("Migrations completed successfully.");
        Ok(())
    }
}

pub(crate) fn map_sqlx_error(err: sqlx::Error) -> CollaboratorError {
    if let sqlx::Error::Database(db_err) = &err {
        let violated = matches!(
            db_err.code().as_deref(),
            Some(EXCLUSION_VIOLATION | FOREIGN_KEY_VIOLATION | CHECK_VIOLATION)
        );
        if violated {
            return CollaboratorError::Constraint(db_err.message().to_string());
        }
    }
    if matches!(err, sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_)) {
        return CollaboratorError::Decode(err.to_string());
    }
    CollaboratorError::io(err)
}
