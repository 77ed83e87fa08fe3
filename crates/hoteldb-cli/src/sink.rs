//! Postgres-backed hotel sink.

use hoteldb_core::HotelEntity;
use hoteldb_scraper::{HotelSink, SinkError};

/// Inserts each hotel as a new `hotels` row.
pub(crate) struct PgHotelSink {
    pool: sqlx::PgPool,
}

impl PgHotelSink {
    pub(crate) fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

impl HotelSink for PgHotelSink {
    async fn store(&self, hotel: &HotelEntity) -> Result<(), SinkError> {
        let id = hoteldb_db::insert_hotel(&self.pool, hotel)
            .await
            .map_err(|e| SinkError::new(hotel, e))?;
        tracing::debug!(id, hotel = ?hotel.title, "inserted hotel");
        Ok(())
    }
}
