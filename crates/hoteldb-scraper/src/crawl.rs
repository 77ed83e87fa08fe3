//! Crawl-unit orchestration.
//!
//! A crawl unit is one landing-page visit, the single city chosen from it,
//! and that city's first listing page. The unit runs sequentially:
//!
//! ```text
//! Discovering --(city found)--> Listing --> Done
//!      \--------(no city)-------------------^
//! ```
//!
//! Each hotel's normalize → image → store sequence runs to completion before
//! cancellation is checked again, so a cancelled unit never leaves a partly
//! written record behind.

use std::path::PathBuf;

use hoteldb_core::HotelEntity;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::discover::{city_listing_url, discover_city, CitySelector};
use crate::error::ScraperError;
use crate::fetch::{fetch_success, PageFetcher};
use crate::image::ImageFetcher;
use crate::listing::{extract_listings, RawHotelRecord};
use crate::normalize::normalize_listing;
use crate::payload::{extract_from_html, IBU_HOTEL_MARKER};
use crate::sink::HotelSink;

/// Where a crawl unit currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlState {
    Discovering,
    Listing { city_url: String },
    Done,
}

/// Settings shared by every crawl unit.
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// City listing endpoint; the city id is appended as `?city=<id>`.
    pub listing_endpoint: String,
    pub image_dir: PathBuf,
    /// Global the page state is assigned to.
    pub marker: String,
}

impl CrawlOptions {
    pub fn new(listing_endpoint: impl Into<String>, image_dir: impl Into<PathBuf>) -> Self {
        Self {
            listing_endpoint: listing_endpoint.into(),
            image_dir: image_dir.into(),
            marker: IBU_HOTEL_MARKER.to_string(),
        }
    }
}

/// Outcome of crawling one city's listing page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CityReport {
    /// Hotels handed to the sink successfully.
    pub stored: usize,
    /// Records dropped because a numeric field was malformed.
    pub skipped: usize,
    /// Stored hotels that have a downloaded image.
    pub images: usize,
    /// `true` if the crawl stopped early on cancellation.
    pub cancelled: bool,
}

/// Outcome of a full crawl unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitReport {
    /// The city listing URL that was crawled, if discovery found one.
    pub city_url: Option<String>,
    pub city: CityReport,
}

enum RecordOutcome {
    Stored { has_image: bool },
    Skipped,
}

/// Drives crawl units against a page fetcher and a hotel sink.
///
/// All methods take `&self`, so one `Crawler` can serve several concurrent
/// units sharing the same sink.
pub struct Crawler<F, S> {
    fetcher: F,
    images: ImageFetcher<F>,
    sink: S,
    options: CrawlOptions,
}

impl<F, S> Crawler<F, S>
where
    F: PageFetcher + Clone,
    S: HotelSink,
{
    pub fn new(fetcher: F, sink: S, options: CrawlOptions) -> Self {
        let images = ImageFetcher::new(fetcher.clone(), options.image_dir.clone());
        Self {
            fetcher,
            images,
            sink,
            options,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Runs one crawl unit from `landing_url` through to its chosen city.
    ///
    /// # Errors
    ///
    /// Propagates page-fetch failures, an invalid listing endpoint, and sink
    /// failures. Parse failures and malformed records are logged and absorbed.
    pub async fn run_unit<C>(
        &self,
        landing_url: &str,
        selector: &mut C,
        cancel: &CancellationToken,
    ) -> Result<UnitReport, ScraperError>
    where
        C: CitySelector + ?Sized,
    {
        let mut report = UnitReport::default();
        let mut state = CrawlState::Discovering;

        loop {
            state = match state {
                CrawlState::Discovering if cancel.is_cancelled() => {
                    report.city.cancelled = true;
                    CrawlState::Done
                }
                CrawlState::Discovering => match self.discover(landing_url, &mut *selector).await? {
                    Some(city_url) => CrawlState::Listing { city_url },
                    None => CrawlState::Done,
                },
                CrawlState::Listing { .. } if cancel.is_cancelled() => {
                    report.city.cancelled = true;
                    CrawlState::Done
                }
                CrawlState::Listing { city_url } => {
                    report.city = self.crawl_city(&city_url, cancel).await?;
                    report.city_url = Some(city_url);
                    CrawlState::Done
                }
                CrawlState::Done => return Ok(report),
            };
        }
    }

    /// Fetches the landing page and picks the city listing URL to crawl.
    ///
    /// Returns `Ok(None)` when no payload offers a city with an id.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Http`] / [`ScraperError::UnexpectedStatus`]: the
    ///   landing page could not be fetched.
    /// - [`ScraperError::InvalidUrl`]: the listing endpoint is not a URL.
    pub async fn discover<C>(
        &self,
        landing_url: &str,
        selector: &mut C,
    ) -> Result<Option<String>, ScraperError>
    where
        C: CitySelector + ?Sized,
    {
        let html = fetch_success(&self.fetcher, landing_url).await?.text();

        for payload in self.payloads(&html, landing_url) {
            if let Some(city) = discover_city(&payload, &mut *selector) {
                let city_url = city_listing_url(&self.options.listing_endpoint, &city.id)?;
                tracing::info!(
                    city_id = %city.id,
                    city_name = city.name.as_deref().unwrap_or(""),
                    city_url = %city_url,
                    "selected city"
                );
                return Ok(Some(city_url));
            }
        }

        tracing::info!(landing_url, "landing page offered no cities; ending crawl unit");
        Ok(None)
    }

    /// Fetches one city listing page and stores each of its hotels.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Http`] / [`ScraperError::UnexpectedStatus`]: the
    ///   listing page could not be fetched.
    /// - [`ScraperError::Persistence`]: the sink rejected a hotel; hotels
    ///   stored before it stay stored.
    pub async fn crawl_city(
        &self,
        city_url: &str,
        cancel: &CancellationToken,
    ) -> Result<CityReport, ScraperError> {
        let html = fetch_success(&self.fetcher, city_url).await?.text();
        let records: Vec<RawHotelRecord> = self
            .payloads(&html, city_url)
            .iter()
            .flat_map(extract_listings)
            .collect();

        tracing::info!(city_url, hotels = records.len(), "parsed listing page");

        let mut report = CityReport::default();
        for raw in &records {
            if cancel.is_cancelled() {
                tracing::info!(city_url, stored = report.stored, "crawl cancelled");
                report.cancelled = true;
                break;
            }
            match self.process_record(raw).await? {
                RecordOutcome::Stored { has_image } => {
                    report.stored += 1;
                    if has_image {
                        report.images += 1;
                    }
                }
                RecordOutcome::Skipped => report.skipped += 1,
            }
        }

        Ok(report)
    }

    /// Normalize → fetch image → store, for a single record.
    async fn process_record(&self, raw: &RawHotelRecord) -> Result<RecordOutcome, ScraperError> {
        // Malformed records are rejected before any image download.
        let draft = match normalize_listing(raw) {
            Ok(hotel) => hotel,
            Err(e @ ScraperError::MalformedField { .. }) => {
                tracing::warn!(
                    hotel = ?raw.title,
                    error = %e,
                    "skipping hotel with malformed field"
                );
                return Ok(RecordOutcome::Skipped);
            }
            Err(e) => return Err(e),
        };

        let image_path = self
            .images
            .fetch(draft.title.as_deref(), raw.image_url())
            .await;
        let hotel = HotelEntity { image_path, ..draft };

        self.sink.store(&hotel).await?;
        tracing::debug!(hotel = ?hotel.title, image = hotel.has_image(), "stored hotel");

        Ok(RecordOutcome::Stored {
            has_image: hotel.has_image(),
        })
    }

    /// Parses every embedded payload on a page, logging the ones that fail.
    fn payloads(&self, html: &str, url: &str) -> Vec<Value> {
        extract_from_html(html, &self.options.marker)
            .into_iter()
            .filter_map(|result| match result {
                Ok(payload) => Some(payload),
                Err(e) => {
                    tracing::error!(url, error = %e, "failed to decode embedded payload");
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "crawl_test.rs"]
mod tests;
