//! Property repository for database operations.

use crate::entities::{NewProperty, Property, PropertyListing, PropertySearch};
use crate::types::DatabaseResult;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

const LISTING_SELECT: &str = "SELECT properties.*, AVG(property_reviews.rating) AS average_rating \
     FROM properties \
     LEFT JOIN property_reviews ON properties.id = property_reviews.property_id";

/// Repository for property database operations
#[derive(Clone)]
pub struct PropertyRepository {
    pool: SqlitePool,
}

impl PropertyRepository {
    /// Create a new property repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Search listings, cheapest first
    pub async fn search(
        &self,
        search: &PropertySearch,
        limit: u32,
    ) -> DatabaseResult<Vec<PropertyListing>> {
        let mut builder = build_search_query(search, limit);
        debug!(sql = builder.sql(), ?search, limit, "searching properties");

        let listings = builder
            .build_query_as::<PropertyListing>()
            .fetch_all(&self.pool)
            .await?;

        Ok(listings)
    }

    /// Insert a property and return the stored row
    pub async fn create(&self, request: &NewProperty) -> DatabaseResult<Property> {
        let property = sqlx::query_as::<_, Property>(
            r#"
            INSERT INTO properties (
                owner_id, title, description, thumbnail_photo_url, cover_photo_url,
                cost_per_night, street, city, city_search, province, post_code, country,
                parking_spaces, number_of_bathrooms, number_of_bedrooms
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(request.owner_id)
        .bind(&request.title)
        .bind(&request.description)
        .bind(&request.thumbnail_photo_url)
        .bind(&request.cover_photo_url)
        .bind(request.cost_per_night)
        .bind(&request.street)
        .bind(&request.city)
        .bind(city_search_key(&request.city))
        .bind(&request.province)
        .bind(&request.post_code)
        .bind(&request.country)
        .bind(request.parking_spaces)
        .bind(request.number_of_bathrooms)
        .bind(request.number_of_bedrooms)
        .fetch_one(&self.pool)
        .await?;

        debug!(property_id = property.id, owner_id = property.owner_id, "property created");
        Ok(property)
    }
}

/// Folded form of a city name stored in `city_search` and used for matching.
/// SQLite's `LOWER` only folds ASCII, so folding happens here for both sides.
pub(crate) fn city_search_key(city: &str) -> String {
    city.to_lowercase()
}

/// Build the listing query for `search`. Each present filter contributes one
/// bound predicate; the rating floor is applied after grouping.
fn build_search_query(search: &PropertySearch, limit: u32) -> QueryBuilder<'static, Sqlite> {
    let mut builder = QueryBuilder::new(LISTING_SELECT);
    let mut keyword = " WHERE ";

    if let Some(city) = &search.city {
        builder.push(keyword).push("properties.city_search LIKE ");
        builder.push_bind(format!("%{}%", city_search_key(city)));
        keyword = " AND ";
    }

    if let Some(owner_id) = search.owner_id {
        builder.push(keyword).push("properties.owner_id = ");
        builder.push_bind(owner_id);
        keyword = " AND ";
    }

    if let Some(minimum) = search.minimum_price_per_night {
        builder.push(keyword).push("properties.cost_per_night >= ");
        builder.push_bind(minimum);
        keyword = " AND ";
    }

    if let Some(maximum) = search.maximum_price_per_night {
        builder.push(keyword).push("properties.cost_per_night <= ");
        builder.push_bind(maximum);
    }

    builder.push(" GROUP BY properties.id");

    if let Some(rating) = search.minimum_rating {
        builder.push(" HAVING AVG(property_reviews.rating) >= ");
        builder.push_bind(rating);
    }

    builder.push(" ORDER BY properties.cost_per_night, properties.id LIMIT ");
    builder.push_bind(i64::from(limit));
    builder
}
