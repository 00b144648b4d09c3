//! Domain entities for the database layer
//!
//! Row shapes mirror the `users`, `properties` and `reservations` tables.

pub mod property;
pub mod reservation;
pub mod user;

pub use property::{NewProperty, Property, PropertyListing, PropertySearch};
pub use reservation::Reservation;
pub use user::{NewUser, User};
