//! Reservation entity definitions

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reservation {
    pub id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub property_id: i64,
    pub guest_id: i64,
}
