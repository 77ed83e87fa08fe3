//! Database operations for the `hotels` table.

use chrono::{DateTime, Utc};
use hoteldb_core::HotelEntity;
use sqlx::PgPool;

use crate::DbError;

/// A row from the `hotels` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct HotelRow {
    pub id: i64,
    pub city: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub price: Option<f64>,
    /// Empty when no image was downloaded.
    pub image_path: String,
    pub rating: Option<f64>,
    pub room_type: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl From<HotelRow> for HotelEntity {
    fn from(row: HotelRow) -> Self {
        Self {
            city: row.city,
            title: row.title,
            location: row.location,
            price: row.price,
            image_path: row.image_path,
            rating: row.rating,
            room_type: row.room_type,
            latitude: row.latitude,
            longitude: row.longitude,
        }
    }
}

/// Inserts one hotel and returns its generated `id`.
///
/// Every call inserts a new row; re-crawling a city stores its hotels again.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_hotel(pool: &PgPool, hotel: &HotelEntity) -> Result<i64, DbError> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO hotels \
             (city, title, location, price, image_path, rating, room_type, latitude, longitude) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
         RETURNING id",
    )
    .bind(hotel.city.as_deref())
    .bind(hotel.title.as_deref())
    .bind(hotel.location.as_deref())
    .bind(hotel.price)
    .bind(&hotel.image_path)
    .bind(hotel.rating)
    .bind(hotel.room_type.as_deref())
    .bind(hotel.latitude)
    .bind(hotel.longitude)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Returns the most recently stored hotels, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_recent_hotels(pool: &PgPool, limit: i64) -> Result<Vec<HotelRow>, DbError> {
    let rows = sqlx::query_as::<_, HotelRow>(
        "SELECT id, city, title, location, price, image_path, rating, room_type, \
                latitude, longitude, created_at \
         FROM hotels \
         ORDER BY created_at DESC, id DESC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Total number of stored hotels.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_hotels(pool: &PgPool) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM hotels")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
