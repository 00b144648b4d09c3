//! LightBnB Database Crate
//!
//! Data access for the LightBnB rental application: connection setup,
//! migrations, row entities, and the user, reservation and property queries.

pub mod access;
pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repos;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use access::{LightBnb, DEFAULT_LIMIT};
pub use connection::{prepare_database, DatabaseConnection};
pub use migrations::run_migrations;

pub use repos::{PropertyRepository, ReservationRepository, UserRepository};

pub use entities::{
    property::{NewProperty, Property, PropertyListing, PropertySearch},
    reservation::Reservation,
    user::{NewUser, User},
};

pub use types::{errors::DatabaseError, DatabaseResult};

pub use sqlx::SqlitePool;

use lightbnb_config::DatabaseConfig;

/// Connect to the configured database and bring its schema up to date
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::Connection(format!("{e:#}")))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::Migration(format!("{e:#}")))?;

    Ok(pool)
}
