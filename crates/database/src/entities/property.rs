//! Property entity definitions

use serde::{Deserialize, Serialize};

/// A row of the `properties` table as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Property {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    /// Nightly price in the smallest currency unit.
    pub cost_per_night: i64,
    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub active: bool,
}

/// A property listing together with the mean of its review ratings.
///
/// `average_rating` is `None` for properties nobody has reviewed yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PropertyListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub property: Property,
    pub average_rating: Option<f64>,
}

/// Request for creating a new property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProperty {
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: i64,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub country: String,
    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,
}

/// Optional filters for the property search. Every field left as `None`
/// is ignored; the rest are combined with `AND`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertySearch {
    /// Case-insensitive substring of the city name.
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub owner_id: Option<i64>,
    #[serde(default)]
    pub minimum_price_per_night: Option<i64>,
    #[serde(default)]
    pub maximum_price_per_night: Option<i64>,
    /// Excludes unreviewed properties when set.
    #[serde(default)]
    pub minimum_rating: Option<f64>,
}

impl PropertySearch {
    pub fn in_city(city: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
            ..Self::default()
        }
    }

    pub fn owned_by(owner_id: i64) -> Self {
        Self {
            owner_id: Some(owner_id),
            ..Self::default()
        }
    }
}
