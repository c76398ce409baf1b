use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, QueryBuilder};
use spacetrouble_core::models::{Booking, BookingFilter, BookingId, NewBooking};
use spacetrouble_core::repository::{BookingStore, CollaboratorError, CollaboratorResult};

use crate::database::map_sqlx_error;

const SELECT_BOOKINGS: &str =
    "SELECT id, first_name, last_name, gender, birthday, launchpad_id, destination_id, launch_date FROM bookings";

pub struct StoreBookingRepository {
    pool: PgPool,
}

impl StoreBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    id: i32,
    first_name: String,
    last_name: String,
    gender: String,
    birthday: NaiveDate,
    launchpad_id: String,
    destination_id: i32,
    launch_date: NaiveDate,
}

impl TryFrom<BookingRow> for Booking {
    type Error = CollaboratorError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let gender = row.gender.parse().map_err(|_| {
            CollaboratorError::Decode(format!("booking {} has unknown gender {:?}", row.id, row.gender))
        })?;

        Ok(Booking {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            gender,
            birthday: row.birthday,
            launchpad_id: row.launchpad_id,
            destination_id: row.destination_id,
            launch_date: row.launch_date,
        })
    }
}

fn build_find_query(filter: &BookingFilter) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(SELECT_BOOKINGS);
    if let Some(launch_date) = filter.launch_date {
        query.push(" WHERE launch_date = ").push_bind(launch_date);
    }
    query.push(" ORDER BY id");
    if let Some(limit) = filter.limit {
        query.push(" LIMIT ").push_bind(i64::from(limit));
    }
    if let Some(offset) = filter.offset {
        query.push(" OFFSET ").push_bind(i64::from(offset));
    }
    query
}

#[async_trait]
impl BookingStore for StoreBookingRepository {
    async fn find(&self, filter: &BookingFilter) -> CollaboratorResult<Vec<Booking>> {
        let mut query = build_find_query(filter);
        let rows: Vec<BookingRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn create(&self, booking: &NewBooking) -> CollaboratorResult<()> {
        sqlx::query(
            r#"
            INSERT INTO bookings (first_name, last_name, gender, birthday, launchpad_id, destination_id, launch_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&booking.first_name)
        .bind(&booking.last_name)
        .bind(booking.gender.as_str())
        .bind(booking.birthday)
        .bind(&booking.launchpad_id)
        .bind(booking.destination_id)
        .bind(booking.launch_date)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn exists_by_id(&self, id: BookingId) -> CollaboratorResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM bookings WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn delete_by_id(&self, id: BookingId) -> CollaboratorResult<()> {
        sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}
