//! Fixtures shared by the unit tests.

use crate::connection::prepare_database;
use crate::entities::NewProperty;
use crate::migrations::run_migrations;
use crate::repos::property_repository::city_search_key;
use chrono::{Duration, NaiveDate};
use lightbnb_config::DatabaseConfig;
use sqlx::SqlitePool;
use tempfile::TempDir;

pub(crate) async fn create_test_pool() -> (SqlitePool, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("lightbnb_test.db");

    let config = DatabaseConfig {
        url: format!("sqlite://{}", db_path.display()),
        max_connections: 1,
    };

    let pool = prepare_database(&config).await.unwrap();
    run_migrations(&pool).await.unwrap();
    (pool, temp_dir)
}

pub(crate) async fn insert_user(pool: &SqlitePool, email: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO users (name, email, password) VALUES (?, ?, 'password') RETURNING id")
        .bind(email.split('@').next().unwrap_or(email))
        .bind(email)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub(crate) fn new_property_request(owner_id: i64, city: &str, cost_per_night: i64) -> NewProperty {
    NewProperty {
        owner_id,
        title: format!("Cozy place in {city}"),
        description: "description".to_string(),
        thumbnail_photo_url: "https://images.example.com/thumb.jpg".to_string(),
        cover_photo_url: "https://images.example.com/cover.jpg".to_string(),
        cost_per_night,
        street: "536 Namsub Highway".to_string(),
        city: city.to_string(),
        province: "British Columbia".to_string(),
        post_code: "V6B 1A1".to_string(),
        country: "Canada".to_string(),
        parking_spaces: 1,
        number_of_bathrooms: 2,
        number_of_bedrooms: 3,
    }
}

pub(crate) async fn insert_property(pool: &SqlitePool, owner_id: i64, city: &str, cost_per_night: i64) -> i64 {
    let request = new_property_request(owner_id, city, cost_per_night);
    sqlx::query_scalar(
        "INSERT INTO properties (owner_id, title, thumbnail_photo_url, cover_photo_url, cost_per_night, country, street, city, city_search, province, post_code) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(request.owner_id)
    .bind(request.title)
    .bind(request.thumbnail_photo_url)
    .bind(request.cover_photo_url)
    .bind(request.cost_per_night)
    .bind(request.country)
    .bind(request.street)
    .bind(city_search_key(&request.city))
    .bind(request.city)
    .bind(request.province)
    .bind(request.post_code)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub(crate) async fn insert_reservation(
    pool: &SqlitePool,
    guest_id: i64,
    property_id: i64,
    start_date: NaiveDate,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO reservations (start_date, end_date, property_id, guest_id) VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(start_date)
    .bind(start_date + Duration::days(3))
    .bind(property_id)
    .bind(guest_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub(crate) async fn insert_review(
    pool: &SqlitePool,
    guest_id: i64,
    property_id: i64,
    reservation_id: i64,
    rating: i64,
) {
    sqlx::query(
        "INSERT INTO property_reviews (guest_id, property_id, reservation_id, rating, message) VALUES (?, ?, ?, ?, 'messages')",
    )
    .bind(guest_id)
    .bind(property_id)
    .bind(reservation_id)
    .bind(rating)
    .execute(pool)
    .await
    .unwrap();
}
