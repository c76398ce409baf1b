use async_trait::async_trait;
use sqlx::PgPool;
use spacetrouble_core::repository::{CollaboratorResult, DestinationCatalog};
use spacetrouble_core::Destination;

use crate::database::map_sqlx_error;

pub struct StoreDestinationCatalog {
    pool: PgPool,
}

impl StoreDestinationCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct DestinationRow {
    id: i32,
    name: String,
}

#[async_trait]
impl DestinationCatalog for StoreDestinationCatalog {
    async fn list(&self) -> CollaboratorResult<Vec<Destination>> {
        let rows = sqlx::query_as::<_, DestinationRow>("SELECT id, name FROM destinations ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows
            .into_iter()
            .map(|row| Destination { id: row.id, name: row.name })
            .collect())
    }
}
