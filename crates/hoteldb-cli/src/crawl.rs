//! `crawl` command handler.
//!
//! Runs the requested number of crawl units, at most
//! `HOTELDB_CRAWL_MAX_CONCURRENT_UNITS` at a time. A failed unit is logged
//! and counted; it does not stop the others.

use futures::stream::{self, StreamExt};
use hoteldb_core::AppConfig;
use hoteldb_scraper::{
    CrawlOptions, Crawler, HotelSink, HttpFetcher, MemorySink, PageFetcher, RandomSelector,
    ScraperError, UnitReport,
};
use tokio_util::sync::CancellationToken;

use crate::sink::PgHotelSink;

/// Aggregated outcome of a `crawl` run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CrawlTotals {
    pub units: usize,
    pub failed_units: usize,
    /// Units that reached a city listing page.
    pub cities: usize,
    pub stored: usize,
    pub skipped: usize,
    pub images: usize,
    pub cancelled: bool,
}

impl CrawlTotals {
    fn record(&mut self, unit: usize, outcome: &Result<UnitReport, ScraperError>) {
        self.units += 1;
        match outcome {
            Ok(report) => {
                if report.city_url.is_some() {
                    self.cities += 1;
                }
                self.stored += report.city.stored;
                self.skipped += report.city.skipped;
                self.images += report.city.images;
                self.cancelled |= report.city.cancelled;
            }
            Err(e) => {
                self.failed_units += 1;
                tracing::error!(unit, error = %e, "crawl unit failed");
            }
        }
    }

    fn print_summary(&self) {
        println!(
            "crawl complete: {} unit(s), {} city page(s), {} hotel(s) stored, {} skipped, {} image(s), {} failed unit(s){}",
            self.units,
            self.cities,
            self.stored,
            self.skipped,
            self.images,
            self.failed_units,
            if self.cancelled { " (interrupted)" } else { "" }
        );
    }
}

/// Crawl `units` cities and write their hotels to Postgres.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built. Per-unit failures
/// are logged and counted in the summary, not propagated.
pub(crate) async fn run_crawl(
    pool: &sqlx::PgPool,
    config: &AppConfig,
    start_url: &str,
    units: usize,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    let crawler = build_crawler(config, PgHotelSink::new(pool.clone()))?;
    let totals = run_units(
        &crawler,
        start_url,
        units,
        config.crawl_max_concurrent_units,
        cancel,
    )
    .await;
    totals.print_summary();
    Ok(())
}

/// Crawl `units` cities and print the normalized hotels as JSON.
///
/// Images are still downloaded to the configured directory; nothing is
/// written to the database.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or the hotels cannot
/// be serialized.
pub(crate) async fn run_crawl_dry(
    config: &AppConfig,
    start_url: &str,
    units: usize,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    let crawler = build_crawler(config, MemorySink::new())?;
    let totals = run_units(
        &crawler,
        start_url,
        units,
        config.crawl_max_concurrent_units,
        cancel,
    )
    .await;

    println!("{}", serde_json::to_string_pretty(&crawler.sink().hotels())?);
    totals.print_summary();
    Ok(())
}

fn build_crawler<S: HotelSink>(
    config: &AppConfig,
    sink: S,
) -> anyhow::Result<Crawler<HttpFetcher, S>> {
    let fetcher = HttpFetcher::new(
        config.scraper_request_timeout_secs,
        &config.scraper_user_agent,
    )?;
    let options = CrawlOptions::new(config.listing_endpoint.as_str(), config.image_dir.clone());
    Ok(Crawler::new(fetcher, sink, options))
}

pub(crate) async fn run_units<F, S>(
    crawler: &Crawler<F, S>,
    start_url: &str,
    units: usize,
    max_concurrent: usize,
    cancel: &CancellationToken,
) -> CrawlTotals
where
    F: PageFetcher + Clone,
    S: HotelSink,
{
    let outcomes: Vec<(usize, Result<UnitReport, ScraperError>)> = stream::iter(1..=units)
        .map(|unit| async move {
            let mut selector = RandomSelector;
            let outcome = crawler.run_unit(start_url, &mut selector, cancel).await;
            (unit, outcome)
        })
        .buffer_unordered(max_concurrent.max(1))
        .collect()
        .await;

    let mut totals = CrawlTotals::default();
    for (unit, outcome) in &outcomes {
        totals.record(*unit, outcome);
    }
    totals
}
