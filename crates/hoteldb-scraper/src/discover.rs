//! City discovery from the landing-page payload.
//!
//! The landing page lists inbound and outbound cities. One crawl unit visits
//! a single city chosen by a [`CitySelector`], which keeps the load per run
//! bounded and lets tests pin the choice.

use serde_json::Value;

use crate::error::ScraperError;
use crate::json_path::array_at;

const INBOUND_CITIES: &[&str] = &["initData", "htlsData", "inboundCities"];
const OUTBOUND_CITIES: &[&str] = &["initData", "htlsData", "outboundCities"];

/// A city offered on the landing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityCandidate {
    /// City identifier as used by the listing endpoint's `city` parameter.
    pub id: String,
    pub name: Option<String>,
}

/// Picks one index out of `len` candidates. `len` is always at least 1.
pub trait CitySelector {
    fn select(&mut self, len: usize) -> usize;
}

/// Uniformly random choice.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSelector;

impl CitySelector for RandomSelector {
    fn select(&mut self, len: usize) -> usize {
        rand::random_range(0..len)
    }
}

/// Always picks the same position, wrapping around when out of range.
#[derive(Debug, Clone, Copy)]
pub struct FixedSelector(pub usize);

impl CitySelector for FixedSelector {
    fn select(&mut self, len: usize) -> usize {
        self.0 % len
    }
}

/// Collects inbound then outbound cities, dropping entries without an id.
pub fn city_candidates(payload: &Value) -> Vec<CityCandidate> {
    array_at(payload, INBOUND_CITIES)
        .iter()
        .chain(array_at(payload, OUTBOUND_CITIES))
        .filter_map(parse_candidate)
        .collect()
}

fn parse_candidate(entry: &Value) -> Option<CityCandidate> {
    // Ids show up both as strings and as bare numbers.
    let id = match entry.get("id")? {
        Value::String(s) if !s.trim().is_empty() => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let name = entry
        .get("name")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    Some(CityCandidate { id, name })
}

/// Chooses the city to crawl next, or `None` when the payload offers none.
pub fn discover_city<S>(payload: &Value, selector: &mut S) -> Option<CityCandidate>
where
    S: CitySelector + ?Sized,
{
    let mut candidates = city_candidates(payload);
    if candidates.is_empty() {
        return None;
    }
    let index = selector.select(candidates.len()).min(candidates.len() - 1);
    Some(candidates.swap_remove(index))
}

/// Builds `<endpoint>?city=<id>`, keeping any query the endpoint already has.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] if `endpoint` is not an absolute URL.
pub fn city_listing_url(endpoint: &str, city_id: &str) -> Result<String, ScraperError> {
    let mut url = reqwest::Url::parse(endpoint).map_err(|e| ScraperError::InvalidUrl {
        url: endpoint.to_owned(),
        reason: e.to_string(),
    })?;
    url.query_pairs_mut().append_pair("city", city_id);
    Ok(url.to_string())
}
