//! Persistence boundary for normalized hotels.

use std::future::Future;
use std::sync::{Mutex, PoisonError};

use hoteldb_core::HotelEntity;
use thiserror::Error;

/// A store call failed. The sink's own error is kept as the source.
#[derive(Debug, Error)]
#[error("failed to store hotel {}: {source}", .title.as_deref().unwrap_or("<untitled>"))]
pub struct SinkError {
    pub title: Option<String>,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl SinkError {
    pub fn new(
        hotel: &HotelEntity,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            title: hotel.title.clone(),
            source: source.into(),
        }
    }
}

/// Durable storage for hotels. One call per hotel; implementations must be
/// safe to share between concurrent crawl units.
pub trait HotelSink: Send + Sync {
    fn store(&self, hotel: &HotelEntity) -> impl Future<Output = Result<(), SinkError>> + Send;
}

/// Keeps stored hotels in memory, for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    hotels: Mutex<Vec<HotelEntity>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything stored so far, in store order.
    #[must_use]
    pub fn hotels(&self) -> Vec<HotelEntity> {
        self.hotels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hotels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl HotelSink for MemorySink {
    async fn store(&self, hotel: &HotelEntity) -> Result<(), SinkError> {
        self.hotels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(hotel.clone());
        Ok(())
    }
}
