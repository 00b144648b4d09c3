//! Reservation repository for database operations.

use crate::entities::Reservation;
use crate::types::DatabaseResult;
use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;

/// Repository for reservation database operations
#[derive(Clone)]
pub struct ReservationRepository {
    pool: SqlitePool,
}

impl ReservationRepository {
    /// Create a new reservation repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Reservations for a guest, skipping any that start today (UTC).
    pub async fn find_for_guest(&self, guest_id: i64, limit: u32) -> DatabaseResult<Vec<Reservation>> {
        self.find_for_guest_as_of(guest_id, Utc::now().date_naive(), limit)
            .await
    }

    /// Reservations for a guest whose start date differs from `today`,
    /// ordered by start date and id.
    pub async fn find_for_guest_as_of(
        &self,
        guest_id: i64,
        today: NaiveDate,
        limit: u32,
    ) -> DatabaseResult<Vec<Reservation>> {
        let reservations = sqlx::query_as::<_, Reservation>(
            r#"
            SELECT id, start_date, end_date, property_id, guest_id
            FROM reservations
            WHERE guest_id = ? AND start_date <> ?
            ORDER BY start_date, id
            LIMIT ?
            "#,
        )
        .bind(guest_id)
        .bind(today)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        debug!(guest_id, %today, limit, count = reservations.len(), "fetched reservations");
        Ok(reservations)
    }
}
