pub mod crawl;
pub mod discover;
pub mod error;
pub mod fetch;
pub mod image;
pub mod json_path;
pub mod listing;
pub mod normalize;
pub mod payload;
pub mod sink;

pub use crawl::{CityReport, CrawlOptions, CrawlState, Crawler, UnitReport};
pub use discover::{CityCandidate, CitySelector, FixedSelector, RandomSelector};
pub use error::{ExtractionError, ScraperError};
pub use fetch::{FetchedPage, HttpFetcher, PageFetcher};
pub use image::ImageFetcher;
pub use listing::RawHotelRecord;
pub use normalize::{normalize_listing, normalize_record};
pub use payload::{extract_payloads, IBU_HOTEL_MARKER};
pub use sink::{HotelSink, MemorySink, SinkError};
