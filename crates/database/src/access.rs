//! The LightBnB data access facade.
//!
//! One method per query the web application issues. Each method runs a
//! single statement against the pool the caller handed in and returns the
//! mapped rows; failures come back as [`DatabaseError::Query`] carrying the
//! driver error.
//!
//! [`DatabaseError::Query`]: crate::types::DatabaseError::Query

use crate::entities::{NewProperty, NewUser, Property, PropertyListing, PropertySearch, Reservation, User};
use crate::repos::{PropertyRepository, ReservationRepository, UserRepository};
use crate::types::DatabaseResult;
use lightbnb_config::DEFAULT_QUERY_LIMIT;
use sqlx::SqlitePool;

/// Row cap applied by the `*_default` list helpers.
pub const DEFAULT_LIMIT: u32 = DEFAULT_QUERY_LIMIT;

/// Entry point for the application's queries, backed by one shared pool.
#[derive(Clone)]
pub struct LightBnb {
    users: UserRepository,
    reservations: ReservationRepository,
    properties: PropertyRepository,
}

impl LightBnb {
    /// Build the facade and its repositories on top of `pool`
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            reservations: ReservationRepository::new(pool.clone()),
            properties: PropertyRepository::new(pool),
        }
    }

    /// The user registered under exactly this email, if any.
    pub async fn get_user_with_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        self.users.find_by_email(email).await
    }

    /// The user with this id, if any.
    pub async fn get_user_with_id(&self, id: i64) -> DatabaseResult<Option<User>> {
        self.users.find_by_id(id).await
    }

    /// Insert a user and return the stored row with its generated id.
    pub async fn add_user(&self, user: &NewUser) -> DatabaseResult<User> {
        self.users.create(user).await
    }

    /// Up to `limit` reservations for `guest_id`, leaving out any that start today.
    pub async fn get_all_reservations(
        &self,
        guest_id: i64,
        limit: u32,
    ) -> DatabaseResult<Vec<Reservation>> {
        self.reservations.find_for_guest(guest_id, limit).await
    }

    /// [`Self::get_all_reservations`] capped at [`DEFAULT_LIMIT`].
    pub async fn get_all_reservations_default(
        &self,
        guest_id: i64,
    ) -> DatabaseResult<Vec<Reservation>> {
        self.get_all_reservations(guest_id, DEFAULT_LIMIT).await
    }

    /// Up to `limit` listings matching `options`, cheapest first, each with
    /// its average review rating.
    pub async fn get_all_properties(
        &self,
        options: &PropertySearch,
        limit: u32,
    ) -> DatabaseResult<Vec<PropertyListing>> {
        self.properties.search(options, limit).await
    }

    /// [`Self::get_all_properties`] capped at [`DEFAULT_LIMIT`].
    pub async fn get_all_properties_default(
        &self,
        options: &PropertySearch,
    ) -> DatabaseResult<Vec<PropertyListing>> {
        self.get_all_properties(options, DEFAULT_LIMIT).await
    }

    /// Insert a property and return the persisted row, generated id included.
    pub async fn add_property(&self, property: &NewProperty) -> DatabaseResult<Property> {
        self.properties.create(property).await
    }
}
