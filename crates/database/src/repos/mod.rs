//! Database repository implementations

pub mod property_repository;
pub mod reservation_repository;
pub mod user_repository;

pub use property_repository::*;
pub use reservation_repository::*;
pub use user_repository::*;
